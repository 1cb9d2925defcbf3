// ABOUTME: Per-owner snapshot of the three workout stores taken in a single listing pass
// ABOUTME: Derives lifecycle states and the active-plan and mesocycle views from that snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::constants::views::{MESOCYCLE_COMPLETED_LIMIT, MESOCYCLE_PLANNED_LIMIT};
use crate::models::{
    sort_by_date, sort_by_name_desc, DateOrder, LifecycleState, WorkoutFileName,
};

/// Plans and tracking copies an athlete can work on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveListing {
    /// Plans not yet being tracked, descending by filename
    pub plans: Vec<String>,
    /// In-progress tracking files, descending by filename
    pub tracked: Vec<String>,
}

/// Recent history and upcoming plans for one athlete
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MesocycleView {
    /// Most recently dated finished records
    pub completed: Vec<String>,
    /// Soonest dated plans that are not being tracked
    pub planned: Vec<String>,
}

/// Files owned by one athlete in each store, listed once
#[derive(Debug, Clone, Default)]
pub struct OwnerSnapshot {
    /// Owner the snapshot was taken for
    pub owner: String,
    /// Planned store entries
    pub planned: Vec<WorkoutFileName>,
    /// In-progress store entries
    pub in_progress: Vec<WorkoutFileName>,
    /// Finished store entries
    pub finished: Vec<WorkoutFileName>,
}

impl OwnerSnapshot {
    fn bases(files: &[WorkoutFileName]) -> HashSet<&str> {
        files.iter().map(|f| f.base.as_str()).collect()
    }

    /// Plans are keyed by the filename as stored; tracked files by their base
    fn plan_names(&self) -> HashSet<&str> {
        self.planned.iter().map(|f| f.raw.as_str()).collect()
    }

    /// Plans with no tracking copy in progress
    #[must_use]
    pub fn untracked_plans(&self) -> Vec<WorkoutFileName> {
        let tracking = Self::bases(&self.in_progress);
        self.planned
            .iter()
            .filter(|p| !tracking.contains(p.raw.as_str()))
            .cloned()
            .collect()
    }

    /// Lifecycle state of every workout the owner has, keyed by plan filename
    #[must_use]
    pub fn states(&self) -> BTreeMap<String, LifecycleState> {
        let planned = self.plan_names();
        let in_progress = Self::bases(&self.in_progress);
        let finished = Self::bases(&self.finished);

        planned
            .iter()
            .chain(in_progress.iter())
            .chain(finished.iter())
            .filter_map(|base| {
                LifecycleState::classify(
                    planned.contains(base),
                    in_progress.contains(base),
                    finished.contains(base),
                )
                .map(|state| ((*base).to_owned(), state))
            })
            .collect()
    }

    /// Lifecycle state of one workout by its plan filename
    #[must_use]
    pub fn state_of(&self, base: &str) -> Option<LifecycleState> {
        let present = |files: &[WorkoutFileName]| files.iter().any(|f| f.base == base);
        LifecycleState::classify(
            self.planned.iter().any(|f| f.raw == base),
            present(&self.in_progress),
            present(&self.finished),
        )
    }

    /// Untracked plans and in-progress files, both descending by filename
    #[must_use]
    pub fn active_listing(&self) -> ActiveListing {
        let mut plans = self.untracked_plans();
        let mut tracked = self.in_progress.clone();
        sort_by_name_desc(&mut plans);
        sort_by_name_desc(&mut tracked);
        ActiveListing {
            plans: plans.into_iter().map(|f| f.raw).collect(),
            tracked: tracked.into_iter().map(|f| f.raw).collect(),
        }
    }

    /// Latest finished records and soonest untracked plans
    #[must_use]
    pub fn mesocycle_view(&self) -> MesocycleView {
        let mut completed = self.finished.clone();
        sort_by_date(&mut completed, DateOrder::Descending);
        completed.truncate(MESOCYCLE_COMPLETED_LIMIT);

        let mut planned = self.untracked_plans();
        sort_by_date(&mut planned, DateOrder::Ascending);
        planned.truncate(MESOCYCLE_PLANNED_LIMIT);

        MesocycleView {
            completed: completed.into_iter().map(|f| f.raw).collect(),
            planned: planned.into_iter().map(|f| f.raw).collect(),
        }
    }
}
