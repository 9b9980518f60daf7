//! Shell routing
//!
//! Maps a location such as `/auth/reset-password?token=abc` onto the page the
//! shell should mount. The auth module owns `/auth/*`; blog, profile and admin
//! are mounted as module pages that keep their remaining sub-path.

use reqwest::Url;
use std::fmt;

/// Origin used to resolve shell-relative locations
const SHELL_ORIGIN: &str = "http://shell.local/";

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/auth/login";
pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";

#[derive(Debug, thiserror::Error)]
#[error("invalid location {location:?}: {reason}")]
pub struct RouteError {
    pub location: String,
    pub reason: String,
}

/// Independently built modules mounted under their own prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteModule {
    Blog,
    Profile,
    Admin,
}

impl RemoteModule {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Profile => "profile",
            Self::Admin => "admin",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Blog => "Blog",
            Self::Profile => "Profile",
            Self::Admin => "Admin",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "blog" => Some(Self::Blog),
            "profile" => Some(Self::Profile),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Pages inside the auth module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRoute {
    Login,
    ForgotPassword,
    ResetPassword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Auth(AuthRoute),
    Module {
        module: RemoteModule,
        subpath: String,
    },
    NotFound,
}

impl Route {
    fn resolve(segments: &[&str]) -> Self {
        match segments {
            [] => Route::Home,
            ["auth"] | ["auth", "login"] => Route::Auth(AuthRoute::Login),
            ["auth", "forgot-password"] => Route::Auth(AuthRoute::ForgotPassword),
            ["auth", "reset-password"] => Route::Auth(AuthRoute::ResetPassword),
            [prefix, rest @ ..] => match RemoteModule::from_prefix(prefix) {
                Some(module) => Route::Module {
                    module,
                    subpath: rest.join("/"),
                },
                None => Route::NotFound,
            },
        }
    }

    /// Whether the route mounts a form page
    pub fn is_form(&self) -> bool {
        matches!(self, Route::Auth(_))
    }
}

/// Decoded query parameters in their original order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// First value for `name`, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value for `name`, treating an empty value as absent
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A parsed shell location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    href: String,
    pub route: Route,
    pub query: QueryParams,
}

impl Location {
    /// Parse a shell location. Relative inputs are resolved against `/`.
    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let input = input.trim();
        let base = Url::parse(SHELL_ORIGIN).map_err(|e| RouteError {
            location: input.to_string(),
            reason: e.to_string(),
        })?;
        let url = base.join(input).map_err(|e| RouteError {
            location: input.to_string(),
            reason: e.to_string(),
        })?;

        if url.origin() != base.origin() {
            return Err(RouteError {
                location: input.to_string(),
                reason: "locations must stay inside the shell".to_string(),
            });
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        let route = Route::resolve(&segments);
        let query = url.query_pairs().into_owned().collect();

        let href = match url.query() {
            Some(q) if !q.is_empty() => format!("{}?{}", url.path(), q),
            _ => url.path().to_string(),
        };

        Ok(Self { href, route, query })
    }

    pub fn home() -> Self {
        Self {
            href: HOME_PATH.to_string(),
            route: Route::Home,
            query: QueryParams::default(),
        }
    }

    /// Normalized `path[?query]` form of this location
    pub fn href(&self) -> &str {
        &self.href
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href)
    }
}
