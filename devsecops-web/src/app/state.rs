use devsecops_core::{FragmentSink, Route, RouteStore};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

pub type SharedStore = Rc<RefCell<RouteStore<Box<dyn FragmentSink>>>>;

/// What screens see: the route to render plus a handle for navigating.
///
/// Rendering only reads `route`; the store is borrowed from callbacks.
#[derive(Clone)]
pub struct RouteContext {
    pub route: Route,
    store: SharedStore,
}

impl PartialEq for RouteContext {
    fn eq(&self, other: &Self) -> bool {
        self.route == other.route && Rc::ptr_eq(&self.store, &other.store)
    }
}

impl RouteContext {
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        let route = store.borrow().current().clone();
        Self { route, store }
    }

    #[must_use]
    pub fn store(&self) -> SharedStore {
        Rc::clone(&self.store)
    }

    pub fn navigate_to_route(&self, name: &str, primary_id: Option<&str>, secondary_id: Option<&str>) {
        self.store
            .borrow_mut()
            .navigate_to_route(name, primary_id, secondary_id);
    }

    pub fn navigate(&self, route: Route) {
        self.store.borrow_mut().navigate(route);
    }

    /// Navigate to `target` only while the store still shows `origin`.
    /// Returns `false` when the user has already moved on.
    pub fn navigate_from(&self, origin: &Route, target: Route) -> bool {
        let mut store = self.store.borrow_mut();
        if store.current() != origin {
            log::debug!(
                "left `{}` before it finished; staying on `{}`",
                origin.fragment(),
                store.current().fragment()
            );
            return false;
        }
        store.navigate(target);
        true
    }
}

/// Create the app's route store once and keep `RouteContext::route` in step
/// with it.
#[hook]
pub fn use_route_store(fragment: Option<AttrValue>) -> RouteContext {
    let store: SharedStore = use_mut_ref(move || {
        RouteStore::new(crate::router::initial_sink(fragment.as_deref()))
    });
    let initial = Rc::clone(&store);
    let route = use_state(move || initial.borrow().current().clone());

    let subscribed = Rc::clone(&store);
    let setter = route.clone();
    use_effect_with((), move |()| {
        let id = subscribed
            .borrow_mut()
            .subscribe(move |next: &Route| setter.set(next.clone()));
        move || {
            subscribed.borrow_mut().unsubscribe(id);
        }
    });

    RouteContext {
        route: (*route).clone(),
        store,
    }
}

#[hook]
pub fn use_route_context() -> Option<RouteContext> {
    use_context::<RouteContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use devsecops_core::{MemoryHistory, RouteKind};

    fn shared(fragment: &str) -> SharedStore {
        let sink: Box<dyn FragmentSink> = Box::new(MemoryHistory::new(fragment));
        Rc::new(RefCell::new(RouteStore::new(sink)))
    }

    #[test]
    fn context_snapshots_the_current_route() {
        let ctx = RouteContext::new(shared("incident/INC-003"));
        assert_eq!(ctx.route.kind(), RouteKind::IncidentDetail);
    }

    #[test]
    fn navigation_goes_through_the_shared_store() {
        let store = shared("");
        let ctx = RouteContext::new(Rc::clone(&store));
        ctx.navigate_to_route("project-app-detail", Some("PROJ-001"), Some("app-002"));
        assert_eq!(store.borrow().current().kind(), RouteKind::ProjectAppDetail);
        assert_eq!(store.borrow().sink().read_fragment(), "project-app/PROJ-001/app-002");
    }

    #[test]
    fn completions_only_navigate_from_their_own_screen() {
        let store = shared("incident/INC-003/edit");
        let ctx = RouteContext::new(Rc::clone(&store));
        let origin = ctx.route.clone();
        let target = origin.parent().unwrap();

        store.borrow_mut().navigate_to_route("projects", None, None);
        assert!(!ctx.navigate_from(&origin, target.clone()));
        assert_eq!(store.borrow().current().kind(), RouteKind::Projects);

        store.borrow_mut().navigate(origin.clone());
        assert!(ctx.navigate_from(&origin, target));
        assert_eq!(store.borrow().current().kind(), RouteKind::IncidentDetail);
    }

    #[test]
    fn equality_tracks_route_and_store_identity() {
        let store = shared("projects");
        let a = RouteContext::new(Rc::clone(&store));
        let b = RouteContext::new(Rc::clone(&store));
        assert!(a == b);
        let other = RouteContext::new(shared("projects"));
        assert!(a != other);
        store.borrow_mut().navigate_to_route("incidents", None, None);
        assert!(a != RouteContext::new(store));
    }
}
