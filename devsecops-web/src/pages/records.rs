use super::data::{LoadState, RecordRows, use_record_list};
use devsecops_core::Route;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ListProps {
    pub route: Route,
    pub state: LoadState<RecordRows>,
}

/// A list screen: heading, optional "new" action and one row per record.
#[function_component(RecordListPage)]
pub fn record_list_page(p: &ListProps) -> Html {
    let kind = p.route.kind();
    let create = kind
        .create_kind()
        .and_then(|create| Route::try_new(create, None, None).ok());

    let body = match &p.state {
        LoadState::Loading => html! { <p class="loading" aria-busy="true">{ "Loading…" }</p> },
        LoadState::Failed(message) => html! { <p class="alert alert-error" role="alert">{ message.clone() }</p> },
        LoadState::Loaded(rows) if rows.is_empty() => html! { <p class="empty">{ "No records yet." }</p> },
        LoadState::Loaded(rows) => html! {
            <table class="table">
                <tbody>
                    { for rows.iter().map(|row| {
                        let target = kind
                            .detail_kind()
                            .and_then(|detail| Route::try_new(detail, Some(&row.name), None).ok());
                        let title = row.display_title().to_string();
                        html! {
                            <tr data-record={row.name.clone()}>
                                <td>
                                    { target.map_or_else(
                                        || html! { <span>{ title.clone() }</span> },
                                        |route| html! { <a href={route.href()}>{ title.clone() }</a> },
                                    ) }
                                </td>
                                <td>{ row.status.clone().unwrap_or_default() }</td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        },
    };

    html! {
        <>
            <div class="screen-header">
                <h1 id="screen-title">{ kind.title() }</h1>
                { for create.map(|route| html! {
                    <a class="btn btn-primary" href={route.href()} data-action="create">{ route.kind().title() }</a>
                }) }
            </div>
            { body }
        </>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub route: Route,
}

#[function_component(RecordList)]
pub fn record_list(p: &Props) -> Html {
    let state = use_record_list(p.route.kind().resource());
    html! { <RecordListPage route={p.route.clone()} {state} /> }
}
