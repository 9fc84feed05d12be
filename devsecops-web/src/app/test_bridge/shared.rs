use devsecops_core::Route;
use serde::Serialize;

/// Route snapshot handed to automation as `__devsecopsTest.route()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(super) struct BridgeRoute {
    pub name: &'static str,
    pub primary_id: Option<String>,
    pub secondary_id: Option<String>,
    pub fragment: String,
}

impl From<&Route> for BridgeRoute {
    fn from(route: &Route) -> Self {
        Self {
            name: route.name(),
            primary_id: route.primary_id().map(str::to_string),
            secondary_id: route.secondary_id().map(str::to_string),
            fragment: route.fragment(),
        }
    }
}

/// Automation passes `undefined`, `null` or `""` for "no id".
pub(super) fn optional_id(value: Option<String>) -> Option<String> {
    value.filter(|id| !id.is_empty())
}
