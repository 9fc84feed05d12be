use super::data::{LoadState, RecordBody, record_id, use_record};
use crate::app::state::use_route_context;
use crate::components::button::Button;
use devsecops_core::{Route, RouteKind};
use serde_json::Value;
use yew::prelude::*;

const MASK: &str = "••••••••";

/// Display text for one field; secrets are never rendered.
#[must_use]
pub fn field_text(key: &str, value: &Value) -> String {
    if key.to_ascii_lowercase().contains("password") || key.eq_ignore_ascii_case("secret") {
        return MASK.to_string();
    }
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Apps listed on a project record, as links to the nested app screen.
fn project_app_links(route: &Route, record: &Value) -> Vec<Route> {
    let Some(project) = route.primary_id() else {
        return Vec::new();
    };
    record
        .get("apps")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|app| app.get("name").and_then(Value::as_str).or_else(|| app.as_str()))
        .filter_map(|app| Route::try_new(RouteKind::ProjectAppDetail, Some(project), Some(app)).ok())
        .collect()
}

#[derive(Properties, PartialEq, Clone)]
pub struct DetailProps {
    pub route: Route,
    pub state: LoadState<RecordBody>,
    #[prop_or_default]
    pub on_navigate: Callback<Route>,
}

#[function_component(DetailPage)]
pub fn detail_page(p: &DetailProps) -> Html {
    let route = &p.route;
    let edit = route
        .kind()
        .edit_kind()
        .and_then(|edit| Route::try_new(edit, route.primary_id(), None).ok());
    let parent = route.parent().unwrap_or_default();

    let on_edit = edit.clone().map(|edit| {
        let cb = p.on_navigate.clone();
        Callback::from(move |_: MouseEvent| cb.emit(edit.clone()))
    });
    let on_back = {
        let cb = p.on_navigate.clone();
        let parent = parent.clone();
        Callback::from(move |_: MouseEvent| cb.emit(parent.clone()))
    };

    let body = match &p.state {
        LoadState::Loading => html! { <p class="loading" aria-busy="true">{ "Loading…" }</p> },
        LoadState::Failed(message) => html! { <p class="alert alert-error" role="alert">{ message.clone() }</p> },
        LoadState::Loaded(record) => {
            let fields = record.as_object().map(|map| {
                map.iter()
                    .filter(|(key, _)| key.as_str() != "apps")
                    .map(|(key, value)| {
                        html! {
                            <>
                                <dt>{ key.clone() }</dt>
                                <dd>{ field_text(key, value) }</dd>
                            </>
                        }
                    })
                    .collect::<Html>()
            });
            let apps = project_app_links(route, record);
            html! {
                <>
                    <dl class="record-fields">{ fields.unwrap_or_default() }</dl>
                    if !apps.is_empty() {
                        <h2>{ "Applications" }</h2>
                        <ul class="project-apps">
                            { for apps.iter().map(|app| html! {
                                <li><a href={app.href()}>{ app.label() }</a></li>
                            }) }
                        </ul>
                    }
                </>
            }
        }
    };

    html! {
        <>
            <div class="screen-header">
                <h1 id="screen-title">{ format!("{} {}", route.kind().title(), route.label()) }</h1>
                <div class="actions">
                    <Button label={format!("Back to {}", parent.label())} onclick={on_back} action={AttrValue::from("back")} />
                    if let Some(on_edit) = on_edit {
                        <Button label="Edit" primary=true onclick={on_edit} action={AttrValue::from("edit")} />
                    }
                </div>
            </div>
            { body }
        </>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub route: Route,
}

#[function_component(RecordDetail)]
pub fn record_detail(p: &Props) -> Html {
    let ctx = use_route_context();
    let state = use_record(
        p.route.kind().resource(),
        record_id(&p.route).map(str::to_string),
    );
    let on_navigate = Callback::from(move |route: Route| {
        if let Some(ctx) = ctx.as_ref() {
            ctx.navigate(route);
        }
    });
    html! { <DetailPage route={p.route.clone()} {state} {on_navigate} /> }
}
