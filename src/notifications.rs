// ABOUTME: Best-effort athlete notifications sent after a workout is completed
// ABOUTME: Defines the sender trait, a tracing-backed default sender and the spawned dispatch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

//! # Notifications
//!
//! Completing a workout may notify the athlete. The address comes from the
//! contacts directory; delivery goes through a [`NotificationSender`]. The
//! completion request never waits for or observes the outcome: dispatch
//! happens on a spawned task and failures are only logged. There are no
//! retries.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::contacts::AthleteDirectory;
use crate::errors::AppResult;
use crate::models::WorkoutFileName;

/// One message to one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Recipient address
    pub recipient: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
    /// File to attach, if any
    pub attachment: Option<PathBuf>,
}

impl Notification {
    /// Message announcing a finished workout, with the record attached
    #[must_use]
    pub fn workout_completed(
        recipient: impl Into<String>,
        finished: &WorkoutFileName,
        path: PathBuf,
    ) -> Self {
        let when = finished
            .date_string()
            .map_or_else(String::new, |d| format!(" on {d}"));
        Self {
            recipient: recipient.into(),
            subject: format!("Workout completed: {}", finished.raw),
            body: format!(
                "Hi {},\n\nYour workout{when} has been recorded. The completed log is attached.\n",
                finished.owner
            ),
            attachment: Some(path),
        }
    }
}

/// Delivery channel for notifications
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Deliver one notification
    async fn send(&self, notification: Notification) -> AppResult<()>;
}

/// Sender that only records the notification in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

#[async_trait]
impl NotificationSender for TracingNotifier {
    async fn send(&self, notification: Notification) -> AppResult<()> {
        info!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            attachment = ?notification.attachment,
            "notification sent"
        );
        Ok(())
    }
}

/// Look up the athlete's address and send the completion notice in the background.
///
/// The returned handle is only useful to tests; callers drop it.
pub fn spawn_completion_notice(
    contacts: Arc<AthleteDirectory>,
    sender: Arc<dyn NotificationSender>,
    finished: WorkoutFileName,
    path: PathBuf,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let athlete = finished.owner.clone();
        let recipient = match contacts.email_for(&athlete).await {
            Ok(Some(address)) => address,
            Ok(None) => {
                debug!(athlete = %athlete, "no contact address, skipping notification");
                return;
            }
            Err(e) => {
                warn!(athlete = %athlete, error = %e, "contact lookup failed");
                return;
            }
        };

        let notification = Notification::workout_completed(recipient, &finished, path);
        if let Err(e) = sender.send(notification).await {
            warn!(athlete = %athlete, error = %e, "completion notification failed");
        }
    })
}
