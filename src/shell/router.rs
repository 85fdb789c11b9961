//! Path routing
//!
//! Two pages exist: the dashboard at `/` and the public invitation page at
//! `/invite/{token}`. Full links are accepted too, so a pasted invitation
//! URL opens the same page as its path.

use std::fmt;
use regex::Regex;
use tracing::debug;

const INVITE_PATTERN: &str = r"^/invite/([^/]+)$";

/// Page selected by a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Invite(String),
    NotFound,
}

impl Route {
    /// Resolve a path or absolute link
    ///
    /// Query string and fragment are ignored, a trailing slash is tolerated
    /// and the token is percent-decoded.
    pub fn parse(input: &str) -> Self {
        let path = match url::Url::parse(input) {
            Ok(url) if url.has_host() => url.path().to_string(),
            _ => input
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_string(),
        };

        let path = path.trim();
        let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };

        let route = if path.is_empty() || path == "/" {
            Route::Dashboard
        } else {
            Self::invite_token(path).map_or(Route::NotFound, Route::Invite)
        };

        debug!(input = input, route = %route, "Route resolved");
        route
    }

    fn invite_token(path: &str) -> Option<String> {
        let pattern = Regex::new(INVITE_PATTERN).ok()?;
        let raw = pattern.captures(path)?.get(1)?.as_str();
        let token = urlencoding::decode(raw).ok()?.into_owned();
        (!token.trim().is_empty()).then_some(token)
    }

    /// Canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Invite(token) => format!("/invite/{}", urlencoding::encode(token)),
            Route::NotFound => "/404".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Dashboard => f.write_str("dashboard"),
            Route::Invite(token) => write!(f, "invite:{}", token),
            Route::NotFound => f.write_str("not-found"),
        }
    }
}
