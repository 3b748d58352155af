//! Route table and navigation values.

use std::fmt;
use std::time::Duration;

/// The three pages of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Register,
    Login,
    Home,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Register, Route::Login, Route::Home];

    pub fn path(self) -> &'static str {
        match self {
            Route::Register => "/register",
            Route::Login => "/login",
            Route::Home => "/home",
        }
    }

    /// Route for `path`. Unknown paths (including `/`) fall back to
    /// registration.
    pub fn resolve(path: &str) -> Route {
        Self::match_path(path).unwrap_or(Route::Register)
    }

    /// Exact route for `path`, ignoring a trailing slash.
    pub fn match_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Self::ALL.into_iter().find(|r| r.path() == normalized)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What a page asks the front end to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Switch to another page after a delay.
    Redirect { to: Route, after: Duration },
    /// Re-mount the current page after a delay, dropping its local state.
    Reload { after: Duration },
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Navigation::Redirect {
            to: route,
            after: Duration::ZERO,
        }
    }

    pub fn delayed(route: Route, after: Duration) -> Self {
        Navigation::Redirect { to: route, after }
    }

    pub fn delay(&self) -> Duration {
        match self {
            Navigation::Redirect { after, .. } | Navigation::Reload { after } => *after,
        }
    }
}
