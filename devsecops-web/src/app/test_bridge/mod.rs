#[cfg(any(test, target_arch = "wasm32"))]
mod shared;
#[cfg(not(target_arch = "wasm32"))]
mod stub;
#[cfg(target_arch = "wasm32")]
mod wasm;

use crate::app::state::RouteContext;
use yew::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_test_bridge(ctx: &RouteContext) {
    stub::use_test_bridge(ctx);
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_test_bridge(ctx: &RouteContext) {
    wasm::use_test_bridge(ctx);
}
