//! Breadcrumb trails derived from a route's parent chain.

use crate::route::Route;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub label: String,
    pub route: Route,
    /// Set on the last crumb only.
    pub current: bool,
}

/// Dashboard first, current screen last.
#[must_use]
pub fn breadcrumbs(route: &Route) -> Vec<Crumb> {
    let mut chain = vec![route.clone()];
    while let Some(parent) = chain.last().and_then(Route::parent) {
        chain.push(parent);
    }
    chain.reverse();

    let last = chain.len() - 1;
    chain
        .into_iter()
        .enumerate()
        .map(|(idx, route)| Crumb {
            label: route.label(),
            route,
            current: idx == last,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::parse_fragment;

    fn labels(fragment: &str) -> Vec<String> {
        breadcrumbs(&parse_fragment(fragment))
            .into_iter()
            .map(|crumb| crumb.label)
            .collect()
    }

    #[test]
    fn dashboard_is_a_single_crumb() {
        let crumbs = breadcrumbs(&Route::dashboard());
        assert_eq!(crumbs.len(), 1);
        assert!(crumbs[0].current);
        assert_eq!(crumbs[0].label, "Dashboard");
    }

    #[test]
    fn edit_screens_include_the_record() {
        assert_eq!(
            labels("incident/INC-003/edit"),
            ["Dashboard", "Incidents", "INC-003", "Edit"]
        );
    }

    #[test]
    fn nested_apps_hang_off_their_project() {
        assert_eq!(
            labels("project-app/PROJ-001/app-002"),
            ["Dashboard", "Projects", "PROJ-001", "app-002"]
        );
        assert_eq!(
            labels("project-apps/app-001"),
            ["Dashboard", "Projects", "Applications", "app-001"]
        );
    }

    #[test]
    fn crumbs_link_to_parseable_routes() {
        for crumb in breadcrumbs(&parse_fragment("change-request/CR-9/edit")) {
            assert_eq!(parse_fragment(&crumb.route.fragment()), crumb.route);
        }
    }

    #[test]
    fn only_the_last_crumb_is_current() {
        let crumbs = breadcrumbs(&parse_fragment("risk-register/R-1"));
        let flags: Vec<bool> = crumbs.iter().map(|crumb| crumb.current).collect();
        assert_eq!(flags, [false, false, true]);
    }
}
