#![cfg(target_arch = "wasm32")]

use devsecops_core::{RouteKind, RouteStore};
use devsecops_web::dom;
use devsecops_web::router::{BrowserLocation, HashChangeListener};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_test::*;
use yew::Renderer;

wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

async fn settle() {
    dom::sleep_ms(50).await.expect("timer");
}

#[wasm_bindgen_test]
fn store_reads_and_writes_the_location_hash() {
    dom::set_location_hash("incident/INC-003").expect("set hash");
    let mut store = RouteStore::new(BrowserLocation);
    assert_eq!(store.current().kind(), RouteKind::IncidentDetail);

    store.navigate_to_route("project-apps", None, None);
    assert_eq!(dom::location_hash().as_deref(), Some("#project-apps"));
}

#[wasm_bindgen_test]
async fn hashchange_reaches_the_listener_until_dropped() {
    let seen = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&seen);
    let listener = HashChangeListener::new(move |fragment| sink.borrow_mut().push(fragment.to_string()))
        .expect("listener");

    dom::set_location_hash("change-requests").expect("set hash");
    settle().await;
    drop(listener);
    dom::set_location_hash("risk-registers").expect("set hash");
    settle().await;

    assert_eq!(*seen.borrow(), vec!["change-requests".to_string()]);
}

#[wasm_bindgen_test]
async fn queued_hashchanges_do_not_revert_rapid_navigation() {
    dom::set_location_hash("dashboard").expect("set hash");
    settle().await;
    let store = Rc::new(RefCell::new(RouteStore::new(BrowserLocation)));
    let visited = Rc::new(RefCell::new(Vec::<RouteKind>::new()));
    let log = Rc::clone(&visited);
    store
        .borrow_mut()
        .subscribe(move |route| log.borrow_mut().push(route.kind()));
    let synced = Rc::clone(&store);
    let listener = HashChangeListener::new(move |fragment| {
        synced.borrow_mut().handle_fragment_change(fragment);
    })
    .expect("listener");

    store.borrow_mut().navigate_to_route("incidents", None, None);
    store.borrow_mut().navigate_to_route("change-requests", None, None);
    settle().await;
    drop(listener);

    assert_eq!(store.borrow().current().kind(), RouteKind::ChangeRequests);
    assert_eq!(
        *visited.borrow(),
        vec![RouteKind::Incidents, RouteKind::ChangeRequests]
    );
}

#[wasm_bindgen_test]
async fn back_navigation_updates_the_rendered_screen() {
    dom::set_location_hash("change-requests").expect("set hash");
    Renderer::<devsecops_web::app::App>::with_root(ensure_app_root()).render();
    settle().await;

    dom::set_location_hash("project-apps").expect("set hash");
    settle().await;
    dom::window()
        .expect("window")
        .history()
        .expect("history")
        .back()
        .expect("back");
    settle().await;

    let screen = dom::document()
        .expect("document")
        .query_selector("section.screen")
        .expect("query")
        .expect("screen rendered");
    assert_eq!(
        screen.get_attribute("data-route").as_deref(),
        Some("change-requests")
    );
}
