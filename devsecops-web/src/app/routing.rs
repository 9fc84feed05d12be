use crate::app::state::RouteContext;
#[cfg(any(target_arch = "wasm32", test))]
use crate::app::state::SharedStore;
use yew::prelude::*;

/// Feed a fragment reported by the platform into the store. Returns `false`
/// when the store was busy and the change was dropped.
#[cfg(any(target_arch = "wasm32", test))]
fn apply_fragment_change(store: &SharedStore, fragment: &str) -> bool {
    match store.try_borrow_mut() {
        Ok(mut store) => {
            store.handle_fragment_change(fragment);
            true
        }
        Err(_) => {
            log::warn!("route store busy; dropped fragment change `{fragment}`");
            false
        }
    }
}

/// Route back/forward and hand-edited hashes into the store for as long as
/// the app is mounted.
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_hash_sync(ctx: &RouteContext) {
    let store = ctx.store();
    use_effect_with((), move |()| {
        let listener = crate::router::HashChangeListener::new(move |fragment| {
            apply_fragment_change(&store, fragment);
        });
        let listener = match listener {
            Ok(listener) => Some(listener),
            Err(err) => {
                crate::dom::console_error(&format!("hash routing disabled: {err}"));
                None
            }
        };
        move || drop(listener)
    });
}

#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_hash_sync(ctx: &RouteContext) {
    let _ = ctx;
}
