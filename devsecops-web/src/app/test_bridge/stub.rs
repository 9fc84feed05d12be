use crate::app::state::RouteContext;
use yew::prelude::*;

#[hook]
pub fn use_test_bridge(ctx: &RouteContext) {
    let _ = ctx;
}
