//! Record loading for screens. Loading starts after the screen is shown and
//! never holds up navigation; a newer request supersedes an older one.

use crate::api::RecordSummary;
use devsecops_core::{ApiError, Resource, Route, RouteKind};
use std::rc::Rc;
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(AttrValue),
}

impl<T> LoadState<T> {
    #[must_use]
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(err) => {
                log::warn!("loading failed: {err}");
                Self::Failed(AttrValue::from(err.to_string()))
            }
        }
    }
}

pub type RecordRows = Rc<Vec<RecordSummary>>;
pub type RecordBody = Rc<serde_json::Value>;

/// Id of the record a screen shows. Nested app screens address the app by
/// their second id.
#[must_use]
pub fn record_id(route: &Route) -> Option<&str> {
    match route.kind() {
        RouteKind::ProjectAppDetail => route.secondary_id(),
        _ => route.primary_id(),
    }
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_record_list(resource: Option<Resource>) -> LoadState<RecordRows> {
    let state = use_state(|| LoadState::Loading);
    let generation = use_mut_ref(|| 0_u64);
    let handle = state.clone();
    use_effect_with(resource, move |resource| {
        *generation.borrow_mut() += 1;
        let ticket = *generation.borrow();
        handle.set(LoadState::Loading);
        match *resource {
            Some(resource) => spawn_local(async move {
                let result = crate::api::list_records(&crate::config::client_config(), resource)
                    .await
                    .map(Rc::new);
                if *generation.borrow() == ticket {
                    handle.set(LoadState::from_result(result));
                }
            }),
            None => handle.set(LoadState::Loaded(Rc::new(Vec::new()))),
        }
    });
    (*state).clone()
}

#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_record_list(resource: Option<Resource>) -> LoadState<RecordRows> {
    let _ = resource;
    LoadState::Loading
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_record(resource: Option<Resource>, id: Option<String>) -> LoadState<RecordBody> {
    let state = use_state(|| LoadState::Loading);
    let generation = use_mut_ref(|| 0_u64);
    let handle = state.clone();
    use_effect_with((resource, id), move |(resource, id)| {
        *generation.borrow_mut() += 1;
        let ticket = *generation.borrow();
        handle.set(LoadState::Loading);
        if let (Some(resource), Some(id)) = (*resource, id.clone()) {
            spawn_local(async move {
                let result = crate::api::get_record(&crate::config::client_config(), resource, &id)
                    .await
                    .map(Rc::new);
                if *generation.borrow() == ticket {
                    handle.set(LoadState::from_result(result));
                }
            });
        }
    });
    (*state).clone()
}

#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_record(resource: Option<Resource>, id: Option<String>) -> LoadState<RecordBody> {
    let _ = (resource, id);
    LoadState::Loading
}

#[cfg(test)]
mod tests {
    use super::*;
    use devsecops_core::parse_fragment;

    #[test]
    fn nested_app_screens_load_the_app() {
        assert_eq!(
            record_id(&parse_fragment("project-app/PROJ-001/app-002")),
            Some("app-002")
        );
        assert_eq!(record_id(&parse_fragment("project/PROJ-001")), Some("PROJ-001"));
        assert_eq!(record_id(&parse_fragment("projects")), None);
    }

    #[test]
    fn errors_become_failed_states() {
        let state: LoadState<()> =
            LoadState::from_result(Err(ApiError::Backend("Not permitted".into())));
        assert_eq!(
            state,
            LoadState::Failed(AttrValue::from("backend rejected the request: Not permitted"))
        );
        assert_eq!(LoadState::from_result(Ok(1)), LoadState::Loaded(1));
    }
}
