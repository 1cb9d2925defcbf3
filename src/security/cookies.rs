// ABOUTME: Session cookie helpers for the coachbook login flow
// ABOUTME: Builds HttpOnly SameSite auth cookies, clears them on logout and reads them back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Coachbook Contributors

use std::env;
use std::fmt::Write;

use axum::http::{header, HeaderMap, HeaderValue};

use crate::constants::session::AUTH_COOKIE_NAME;

/// Attributes of a `Set-Cookie` header
#[derive(Debug, Clone)]
pub struct SessionCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Max-Age in seconds; zero expires the cookie
    pub max_age_secs: i64,
    /// Sent over HTTPS only
    pub secure: bool,
}

impl SessionCookie {
    /// Auth cookie carrying `token`. `Secure` follows `BASE_URL`.
    #[must_use]
    pub fn auth(token: &str, max_age_secs: i64) -> Self {
        Self {
            name: AUTH_COOKIE_NAME.to_owned(),
            value: token.to_owned(),
            max_age_secs,
            secure: infer_secure_flag(),
        }
    }

    /// Header value; always `HttpOnly`, `SameSite=Lax`, `Path=/`
    #[must_use]
    pub fn build(&self) -> String {
        let mut cookie = format!("{}={}", self.name, self.value);
        let _ = write!(cookie, "; Max-Age={}; Path=/; HttpOnly", self.max_age_secs);
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str("; SameSite=Lax");
        cookie
    }
}

/// Attach the auth cookie for `token`
pub fn set_auth_cookie(headers: &mut HeaderMap, token: &str, max_age_secs: i64) {
    let cookie = SessionCookie::auth(token, max_age_secs);
    if let Ok(value) = HeaderValue::from_str(&cookie.build()) {
        headers.insert(header::SET_COOKIE, value);
    }
}

/// Expire the auth cookie
pub fn clear_auth_cookie(headers: &mut HeaderMap) {
    set_auth_cookie(headers, "", 0);
}

/// `https://` or unset `BASE_URL` means `Secure`
fn infer_secure_flag() -> bool {
    env::var("BASE_URL").map_or(true, |url| url.starts_with("https://"))
}

/// Value of the named cookie in the request headers
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name.trim() == cookie_name).then(|| value.trim().to_owned())
        })
}
