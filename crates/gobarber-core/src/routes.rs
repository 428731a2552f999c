//! Screens and the access rule that guards them.

use std::fmt;
use std::str::FromStr;

/// A screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    SignIn,
    SignUp,
    ForgotPassword,
    ResetPassword,
    Dashboard,
    Profile,
}

impl Route {
    /// All routes, public first.
    pub const ALL: [Self; 6] =
        [Self::SignIn, Self::SignUp, Self::ForgotPassword, Self::ResetPassword, Self::Dashboard, Self::Profile];

    /// Returns the URL path of this route.
    pub fn path(self) -> &'static str {
        match self {
            Self::SignIn => "/",
            Self::SignUp => "/signup",
            Self::ForgotPassword => "/forgot-password",
            Self::ResetPassword => "/reset-password",
            Self::Dashboard => "/dashboard",
            Self::Profile => "/profile",
        }
    }

    /// Returns `true` if the route requires a signed-in user.
    pub fn is_private(self) -> bool {
        matches!(self, Self::Dashboard | Self::Profile)
    }

    /// Looks a route up by path, ignoring any query string.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split('?').next().unwrap_or(path);
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s).ok_or_else(|| format!("Unknown route: {}", s))
    }
}

/// What to do when a route is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Show the requested screen.
    Render(Route),
    /// Send the user elsewhere.
    Redirect(Route),
}

/// Decides whether `route` may be shown.
///
/// Private screens need a signed-in user and public screens need an
/// anonymous one. Anonymous users asking for a private screen go to sign-in;
/// signed-in users asking for a public screen go to the dashboard.
pub fn guard(route: Route, authenticated: bool) -> RouteDecision {
    match (route.is_private(), authenticated) {
        (true, true) | (false, false) => RouteDecision::Render(route),
        (true, false) => RouteDecision::Redirect(Route::SignIn),
        (false, true) => RouteDecision::Redirect(Route::Dashboard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/reset-password?token=abc"), Some(Route::ResetPassword));
        assert_eq!(Route::from_path("/nowhere"), None);
        assert!("/nowhere".parse::<Route>().is_err());
    }

    #[test]
    fn test_private_routes() {
        let private: Vec<_> = Route::ALL.into_iter().filter(|r| r.is_private()).collect();
        assert_eq!(private, vec![Route::Dashboard, Route::Profile]);
    }

    #[test]
    fn test_guard() {
        assert_eq!(guard(Route::Dashboard, true), RouteDecision::Render(Route::Dashboard));
        assert_eq!(guard(Route::Dashboard, false), RouteDecision::Redirect(Route::SignIn));
        assert_eq!(guard(Route::Profile, false), RouteDecision::Redirect(Route::SignIn));
        assert_eq!(guard(Route::SignIn, false), RouteDecision::Render(Route::SignIn));
        assert_eq!(guard(Route::SignIn, true), RouteDecision::Redirect(Route::Dashboard));
        assert_eq!(guard(Route::ResetPassword, true), RouteDecision::Redirect(Route::Dashboard));
    }
}
