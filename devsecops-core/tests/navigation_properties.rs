use devsecops_core::{
    FragmentSink, MemoryHistory, Route, RouteKind, RouteStore, parse_fragment,
};

fn sample_ids(kind: RouteKind) -> (Option<&'static str>, Option<&'static str>) {
    match kind.required_params() {
        0 => (None, None),
        1 => (Some("INC-003"), None),
        _ => (Some("PROJ-001"), Some("app-001")),
    }
}

fn prefix(kind: RouteKind) -> &'static str {
    match kind.template().first() {
        Some(devsecops_core::Segment::Literal(text)) => *text,
        _ => panic!("templates start with a literal"),
    }
}

#[test]
fn flat_routes_parse_to_themselves() {
    for kind in RouteKind::ALL {
        if kind.required_params() == 0 {
            let route = parse_fragment(kind.name());
            assert_eq!(route.kind(), kind);
            assert_eq!(route.primary_id(), None);
            assert_eq!(route.secondary_id(), None);
        }
    }
}

#[test]
fn single_id_routes_extract_the_id() {
    for kind in RouteKind::ALL {
        if kind.template().len() == 2 {
            let route = parse_fragment(&format!("{}/X", prefix(kind)));
            assert_eq!(route.kind(), kind, "{}", kind.name());
            assert_eq!(route.primary_id(), Some("X"));
            assert_eq!(route.secondary_id(), None);
        }
    }
}

#[test]
fn two_id_routes_extract_both_ids() {
    for kind in RouteKind::ALL {
        if kind.required_params() == 2 {
            let route = parse_fragment(&format!("{}/X/Y", prefix(kind)));
            assert_eq!(route.kind(), kind);
            assert_eq!(route.primary_id(), Some("X"));
            assert_eq!(route.secondary_id(), Some("Y"));
        }
    }
}

#[test]
fn empty_and_garbage_fragments_resolve_to_dashboard() {
    assert_eq!(parse_fragment(""), Route::dashboard());
    assert_eq!(parse_fragment("garbage-not-a-route"), Route::dashboard());
    assert_eq!(parse_fragment("").name(), "dashboard");
}

#[test]
fn navigation_is_readable_without_waiting() {
    let mut store = RouteStore::new(MemoryHistory::default());
    store.navigate_to_route("incident-detail", Some("INC-003"), None);
    let current = store.current();
    assert_eq!(current.kind(), RouteKind::IncidentDetail);
    assert_eq!(current.primary_id(), Some("INC-003"));
}

#[test]
fn every_navigable_route_round_trips_through_its_fragment() {
    let mut store = RouteStore::new(MemoryHistory::default());
    for kind in RouteKind::ALL {
        let (primary, secondary) = sample_ids(kind);
        let route = store
            .navigate_to_route(kind.name(), primary, secondary)
            .clone();
        assert_eq!(route.kind(), kind);
        let written = store.sink().read_fragment();
        assert_eq!(parse_fragment(&written), route);
        assert_eq!(parse_fragment(&route.href()), route);
    }
}

#[test]
fn cold_deep_link_to_incidents() {
    let store = RouteStore::new(MemoryHistory::new("incidents"));
    assert_eq!(store.current().kind(), RouteKind::Incidents);
    assert_eq!(store.current().primary_id(), None);
}

#[test]
fn nested_deep_link_to_an_app() {
    let store = RouteStore::new(MemoryHistory::new("project-apps/app-001"));
    assert_eq!(store.current().kind(), RouteKind::AppDetail);
    assert_eq!(store.current().name(), "app-detail");
    assert_eq!(store.current().primary_id(), Some("app-001"));
}

#[test]
fn back_navigation_restores_the_previous_list() {
    let mut store = RouteStore::new(MemoryHistory::default());
    store.navigate_to_route("change-requests", None, None);
    store.navigate_to_route("project-apps", None, None);

    // The browser fires a fragment change carrying the previous entry.
    store.handle_fragment_change("change-requests");

    let expected = Route::try_new(RouteKind::ChangeRequests, None, None).unwrap();
    assert_eq!(store.current(), &expected);
}

#[test]
fn unknown_app_ids_still_resolve() {
    let store = RouteStore::new(MemoryHistory::new("project-apps/invalid-app"));
    assert_eq!(store.current().kind(), RouteKind::AppDetail);
    assert_eq!(store.current().primary_id(), Some("invalid-app"));
}

#[test]
fn stores_are_independent_and_resettable() {
    let mut first = RouteStore::new(MemoryHistory::new("projects"));
    let second = RouteStore::new(MemoryHistory::new("incidents"));
    first.reset();
    assert_eq!(first.current(), &Route::dashboard());
    assert_eq!(second.current().kind(), RouteKind::Incidents);
}

#[test]
fn ids_survive_the_browser_encoding_their_fragment() {
    let mut store = RouteStore::new(MemoryHistory::default());
    let route = store
        .navigate_to_route("incident-detail", Some("INC<é>"), None)
        .clone();
    assert_eq!(route.primary_id(), Some("INC<é>"));
    // The browser reports the hash percent-encoded.
    assert_eq!(parse_fragment("incident/INC%3C%C3%A9%3E"), route);
    store.handle_fragment_change("#incident/INC%3C%C3%A9%3E");
    assert_eq!(store.current(), &route);

    let cold = RouteStore::new(MemoryHistory::new("#incident/INC%3C%C3%A9%3E"));
    assert_eq!(cold.current().primary_id(), Some("INC<é>"));
}
