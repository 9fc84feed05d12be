use crate::app::state::{RouteContext, use_route_context};
use crate::components::button::Button;
use devsecops_core::Route;
use serde_json::{Value, json};
use web_sys::HtmlInputElement;
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

/// Body posted for a create or edit form.
#[must_use]
pub fn submission(route: &Route, title: &str) -> Value {
    let mut record = json!({ "title": title.trim() });
    if let Some(id) = route.primary_id() {
        record["name"] = json!(id);
    }
    record
}

/// Screen shown after a successful save: the record for edits, the list for
/// new records.
#[must_use]
pub fn after_save(route: &Route) -> Route {
    route.parent().unwrap_or_default()
}

fn heading(route: &Route) -> String {
    match route.primary_id() {
        Some(id) => format!("Edit {id}"),
        None => route.kind().title().to_string(),
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct FormProps {
    pub route: Route,
    #[prop_or_default]
    pub on_submit: Callback<Value>,
    #[prop_or_default]
    pub on_cancel: Callback<()>,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub saving: bool,
}

#[function_component(FormPage)]
pub fn form_page(p: &FormProps) -> Html {
    let title_ref = use_node_ref();
    let on_save = {
        let title_ref = title_ref.clone();
        let cb = p.on_submit.clone();
        let route = p.route.clone();
        Callback::from(move |_: MouseEvent| {
            let title = title_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            cb.emit(submission(&route, &title));
        })
    };
    let on_cancel = {
        let cb = p.on_cancel.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <>
            <div class="screen-header">
                <h1 id="screen-title">{ heading(&p.route) }</h1>
            </div>
            <form class="record-form" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                <label for="record-title">{ "Title" }</label>
                <input id="record-title" type="text" ref={title_ref} />
                if let Some(error) = p.error.clone() {
                    <p class="alert alert-error" role="alert">{ error }</p>
                }
                <div class="actions">
                    <Button label="Cancel" onclick={on_cancel} action={AttrValue::from("cancel")} />
                    <Button label="Save" primary=true disabled={p.saving} onclick={on_save} action={AttrValue::from("save")} />
                </div>
            </form>
        </>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub route: Route,
}

#[function_component(RecordForm)]
pub fn record_form(p: &Props) -> Html {
    let ctx = use_route_context();
    let error = use_state(|| None::<AttrValue>);
    let saving = use_state(|| false);

    let on_cancel = {
        let ctx = ctx.clone();
        let target = p.route.parent().unwrap_or_default();
        Callback::from(move |()| {
            if let Some(ctx) = ctx.as_ref() {
                ctx.navigate(target.clone());
            }
        })
    };
    let on_submit = submit_callback(&p.route, ctx, error.clone(), saving.clone());

    html! {
        <FormPage
            route={p.route.clone()}
            {on_submit}
            {on_cancel}
            error={(*error).clone()}
            saving={*saving}
        />
    }
}

#[cfg(target_arch = "wasm32")]
fn submit_callback(
    route: &Route,
    ctx: Option<RouteContext>,
    error: UseStateHandle<Option<AttrValue>>,
    saving: UseStateHandle<bool>,
) -> Callback<Value> {
    let route = route.clone();
    Callback::from(move |record: Value| {
        let Some(resource) = route.kind().resource() else {
            return;
        };
        let ctx = ctx.clone();
        let error = error.clone();
        let saving = saving.clone();
        let target = after_save(&route);
        let route = route.clone();
        saving.set(true);
        spawn_local(async move {
            let result =
                crate::api::save_record(&crate::config::client_config(), resource, &record).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    error.set(None);
                    if let Some(ctx) = ctx {
                        ctx.navigate_from(&route, target);
                    }
                }
                Err(err) => {
                    log::warn!("save failed: {err}");
                    error.set(Some(AttrValue::from(err.to_string())));
                }
            }
        });
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn submit_callback(
    route: &Route,
    ctx: Option<RouteContext>,
    error: UseStateHandle<Option<AttrValue>>,
    saving: UseStateHandle<bool>,
) -> Callback<Value> {
    let _ = (ctx, error, saving);
    let name = route.name();
    Callback::from(move |record: Value| {
        log::debug!("`{name}` save skipped outside the browser: {record}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use devsecops_core::{RouteKind, parse_fragment};
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn submissions_carry_the_record_name_when_editing() {
        let edit = parse_fragment("change-request/CR-7/edit");
        assert_eq!(
            submission(&edit, "  Rotate keys "),
            json!({ "name": "CR-7", "title": "Rotate keys" })
        );
        let new = parse_fragment("change-request-new");
        assert_eq!(submission(&new, "Patch"), json!({ "title": "Patch" }));
    }

    #[test]
    fn saves_return_to_the_record_or_the_list() {
        assert_eq!(
            after_save(&parse_fragment("project/PROJ-001/edit")).kind(),
            RouteKind::ProjectDetail
        );
        assert_eq!(
            after_save(&parse_fragment("incident-new")).kind(),
            RouteKind::Incidents
        );
    }

    #[test]
    fn form_shows_heading_and_errors() {
        let props = FormProps {
            route: parse_fragment("incident/INC-003/edit"),
            on_submit: Callback::noop(),
            on_cancel: Callback::noop(),
            error: Some(AttrValue::from("no CSRF token available for a mutating request")),
            saving: true,
        };
        let html = block_on(LocalServerRenderer::<FormPage>::with_props(props).render());
        assert!(html.contains("Edit INC-003"));
        assert!(html.contains("no CSRF token"));
        assert!(html.contains("disabled"));
    }
}
