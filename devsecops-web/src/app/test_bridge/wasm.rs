use super::shared::{BridgeRoute, optional_id};
use crate::app::state::{RouteContext, SharedStore};
use crate::dom;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

struct BridgeBindings {
    _route: Closure<dyn FnMut() -> JsValue>,
    _navigate: Closure<dyn FnMut(JsValue, JsValue, JsValue) -> JsValue>,
    _fragment: Closure<dyn FnMut() -> JsValue>,
    _reset: Closure<dyn FnMut()>,
}

fn snapshot(store: &SharedStore) -> JsValue {
    let Ok(store) = store.try_borrow() else {
        return JsValue::NULL;
    };
    serde_wasm_bindgen::to_value(&BridgeRoute::from(store.current())).unwrap_or(JsValue::NULL)
}

fn build_bridge(store: &SharedStore) -> BridgeBindings {
    let route_store = store.clone();
    let route = Closure::wrap(
        Box::new(move || snapshot(&route_store)) as Box<dyn FnMut() -> JsValue>
    );

    let navigate_store = store.clone();
    let navigate = Closure::wrap(Box::new(move |name: JsValue, id: JsValue, sub: JsValue| {
        let name = name.as_string().unwrap_or_default();
        let id = optional_id(id.as_string());
        let sub = optional_id(sub.as_string());
        if let Ok(mut store) = navigate_store.try_borrow_mut() {
            store.navigate_to_route(&name, id.as_deref(), sub.as_deref());
        }
        snapshot(&navigate_store)
    }) as Box<dyn FnMut(JsValue, JsValue, JsValue) -> JsValue>);

    let fragment = Closure::wrap(Box::new(move || {
        JsValue::from(dom::location_hash().unwrap_or_default())
    }) as Box<dyn FnMut() -> JsValue>);

    let reset_store = store.clone();
    let reset = Closure::wrap(Box::new(move || {
        if let Ok(mut store) = reset_store.try_borrow_mut() {
            // Listeners stay registered; only the route goes back home.
            store.navigate(devsecops_core::Route::dashboard());
        }
    }) as Box<dyn FnMut()>);

    BridgeBindings {
        _route: route,
        _navigate: navigate,
        _fragment: fragment,
        _reset: reset,
    }
}

fn attach_bridge(bindings: &BridgeBindings) {
    let Some(window) = dom::window() else {
        return;
    };
    let bridge = js_sys::Object::new();
    let entries: [(&str, &JsValue); 4] = [
        ("route", bindings._route.as_ref().unchecked_ref()),
        ("navigate", bindings._navigate.as_ref().unchecked_ref()),
        ("fragment", bindings._fragment.as_ref().unchecked_ref()),
        ("reset", bindings._reset.as_ref().unchecked_ref()),
    ];
    for (key, value) in entries {
        let _ = js_sys::Reflect::set(&bridge, &JsValue::from_str(key), value);
    }
    let _ = js_sys::Reflect::set(&window, &JsValue::from_str("__devsecopsTest"), &bridge);
}

#[hook]
pub fn use_test_bridge(ctx: &RouteContext) {
    let bridge_handle = use_mut_ref(|| None::<BridgeBindings>);
    let store = ctx.store();

    use_effect_with((), move |()| {
        if dom::test_mode_enabled() {
            let bindings = build_bridge(&store);
            attach_bridge(&bindings);
            log::info!("automation bridge installed");
            *bridge_handle.borrow_mut() = Some(bindings);
        }
        move || {
            bridge_handle.borrow_mut().take();
            if let Some(window) = dom::window() {
                let _ = js_sys::Reflect::delete_property(&window, &JsValue::from_str("__devsecopsTest"));
            }
        }
    });
}
