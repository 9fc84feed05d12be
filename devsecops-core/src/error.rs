//! Reasons a route could not be resolved.
//!
//! These never escape the public navigation entry points: the store and
//! [`crate::parse_fragment`] log them and fall back to the dashboard. The
//! strict `try_*` helpers return them so callers and tests can tell *why* a
//! link was rejected.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unknown route name `{0}`")]
    UnknownRoute(String),
    #[error("fragment `{0}` matches no known route")]
    MalformedFragment(String),
    #[error("route `{route}` takes {expected} id(s) but {found} were supplied")]
    MissingId {
        route: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid route id `{0}`")]
    InvalidId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = RouteError::MissingId {
            route: "incident-detail",
            expected: 1,
            found: 0,
        };
        assert_eq!(
            err.to_string(),
            "route `incident-detail` takes 1 id(s) but 0 were supplied"
        );
        assert!(
            RouteError::UnknownRoute("nope".into())
                .to_string()
                .contains("nope")
        );
    }
}
