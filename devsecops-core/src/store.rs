//! The route store: single source of truth for which screen is showing.
//!
//! The store owns the current [`Route`] and a [`FragmentSink`] standing in for
//! the platform's addressable fragment. Programmatic navigation writes the
//! fragment and updates state in one synchronous step; fragment changes coming
//! from the platform (back/forward, manual edits) arrive through
//! [`RouteStore::handle_fragment_change`].
//!
//! The store is an ordinary value. Construct one per application instance and
//! share it the way the host UI shares state; call [`RouteStore::reset`]
//! between tests.

use crate::error::RouteError;
use crate::fragment::parse_fragment;
use crate::route::{Route, RouteKind};

/// Where the current fragment lives: `window.location.hash` in a browser, an
/// in-memory history in tests.
pub trait FragmentSink {
    /// The fragment as currently shown, with or without a leading `#`.
    fn read_fragment(&self) -> String;

    /// Replace the fragment. Implementations model a user-visible URL change.
    fn write_fragment(&mut self, fragment: &str);

    /// Return to a pristine, empty fragment.
    fn reset(&mut self) {
        self.write_fragment("");
    }
}

impl<S: FragmentSink + ?Sized> FragmentSink for Box<S> {
    fn read_fragment(&self) -> String {
        (**self).read_fragment()
    }

    fn write_fragment(&mut self, fragment: &str) {
        (**self).write_fragment(fragment);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Handle returned by [`RouteStore::subscribe`]; pass it to
/// [`RouteStore::unsubscribe`] to stop receiving updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Route)>;

pub struct RouteStore<S> {
    sink: S,
    current: Route,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl<S: FragmentSink> RouteStore<S> {
    /// Build a store whose initial route is derived from the fragment already
    /// present in `sink`, so cold deep links resolve without interaction.
    pub fn new(sink: S) -> Self {
        let current = parse_fragment(&sink.read_fragment());
        log::debug!("initial route `{}`", current.fragment());
        Self {
            sink,
            current,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    #[must_use]
    pub const fn current(&self) -> &Route {
        &self.current
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Navigate by route name.
    ///
    /// Unknown names and missing or unusable ids send the user to the
    /// dashboard; the reason is logged, never returned.
    pub fn navigate_to_route(
        &mut self,
        name: &str,
        primary_id: Option<&str>,
        secondary_id: Option<&str>,
    ) -> &Route {
        let route = RouteKind::from_name(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))
            .and_then(|kind| Route::try_new(kind, primary_id, secondary_id));
        self.navigate_or_fallback(route)
    }

    /// Navigate to a known kind; same fallback rules as
    /// [`Self::navigate_to_route`] for the ids.
    pub fn navigate_kind(
        &mut self,
        kind: RouteKind,
        primary_id: Option<&str>,
        secondary_id: Option<&str>,
    ) -> &Route {
        let route = Route::try_new(kind, primary_id, secondary_id);
        self.navigate_or_fallback(route)
    }

    /// Write the route's fragment and make it current before returning.
    pub fn navigate(&mut self, route: Route) -> &Route {
        let fragment = route.fragment();
        log::debug!("navigate `{}` -> `{fragment}`", self.current.fragment());
        self.sink.write_fragment(&fragment);
        self.replace_current(route);
        &self.current
    }

    /// The platform reported a new fragment (back/forward or a manual edit).
    pub fn handle_fragment_change(&mut self, fragment: &str) -> &Route {
        let route = parse_fragment(fragment);
        self.replace_current(route);
        &self.current
    }

    /// Register a listener called with the new route after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Route) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Drop all listeners and return to the dashboard with an empty fragment.
    pub fn reset(&mut self) {
        self.listeners.clear();
        self.sink.reset();
        self.current = Route::dashboard();
    }

    fn navigate_or_fallback(&mut self, route: Result<Route, RouteError>) -> &Route {
        let route = route.unwrap_or_else(|err| {
            log::warn!("{err}; navigating to the dashboard instead");
            Route::dashboard()
        });
        self.navigate(route)
    }

    fn replace_current(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        self.current = route;
        let current = &self.current;
        for (_, listener) in &mut self.listeners {
            listener(current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store_at(fragment: &str) -> RouteStore<MemoryHistory> {
        RouteStore::new(MemoryHistory::new(fragment))
    }

    #[test]
    fn initial_route_comes_from_the_fragment() {
        assert_eq!(store_at("incidents").current().kind(), RouteKind::Incidents);
        assert_eq!(store_at("").current(), &Route::dashboard());
    }

    #[test]
    fn navigation_is_visible_immediately() {
        let mut store = store_at("");
        store.navigate_to_route("project-detail", Some("PROJ-001"), None);
        assert_eq!(store.current().kind(), RouteKind::ProjectDetail);
        assert_eq!(store.current().primary_id(), Some("PROJ-001"));
        assert_eq!(store.sink().read_fragment(), "project/PROJ-001");
    }

    #[test]
    fn unknown_names_fall_back_to_dashboard() {
        let mut store = store_at("incidents");
        let route = store.navigate_to_route("no-such-screen", Some("x"), None);
        assert_eq!(route, &Route::dashboard());
        assert_eq!(store.sink().read_fragment(), "dashboard");
    }

    #[test]
    fn missing_ids_fall_back_to_dashboard() {
        let mut store = store_at("incidents");
        store.navigate_to_route("incident-detail", None, None);
        assert_eq!(store.current(), &Route::dashboard());
        store.navigate_kind(RouteKind::IncidentDetail, Some("bad/id"), None);
        assert_eq!(store.current(), &Route::dashboard());
    }

    #[test]
    fn later_navigation_wins() {
        let mut store = store_at("");
        store.navigate_to_route("incidents", None, None);
        store.navigate_to_route("change-requests", None, None);
        assert_eq!(store.current().kind(), RouteKind::ChangeRequests);
    }

    #[test]
    fn listeners_see_changes_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = store_at("");
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |route| sink.borrow_mut().push(route.name()));

        store.navigate_to_route("incidents", None, None);
        store.navigate_to_route("incidents", None, None);
        store.handle_fragment_change("risk-registers");
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.navigate_to_route("projects", None, None);

        assert_eq!(*seen.borrow(), vec!["incidents", "risk-registers"]);
    }

    #[test]
    fn fragment_changes_update_state() {
        let mut store = store_at("incidents");
        store.handle_fragment_change("#incident/INC-003");
        assert_eq!(store.current().kind(), RouteKind::IncidentDetail);
        store.handle_fragment_change("total nonsense");
        assert_eq!(store.current(), &Route::dashboard());
    }

    #[test]
    fn reset_restores_a_clean_store() {
        let mut store = store_at("incidents");
        store.subscribe(|_| {});
        store.navigate_to_route("projects", None, None);
        store.reset();
        assert_eq!(store.current(), &Route::dashboard());
        assert_eq!(store.listener_count(), 0);
        assert_eq!(store.sink().read_fragment(), "");
    }

    #[test]
    fn boxed_sinks_are_sinks() {
        let sink: Box<dyn FragmentSink> = Box::new(MemoryHistory::new("projects"));
        let mut store = RouteStore::new(sink);
        assert_eq!(store.current().kind(), RouteKind::Projects);
        store.navigate_to_route("dashboard", None, None);
        assert_eq!(store.sink().read_fragment(), "dashboard");
    }
}
