pub mod dashboard;
pub mod data;
pub mod detail;
pub mod form;
pub mod records;

use dashboard::DashboardPage;
use detail::RecordDetail;
use devsecops_core::{Route, RouteKind};
use form::RecordForm;
use records::RecordList;
use yew::prelude::*;

/// Which page component renders a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    List,
    Form,
    Detail,
}

#[must_use]
pub const fn page_for(kind: RouteKind) -> Page {
    match kind {
        RouteKind::Dashboard => Page::Dashboard,
        RouteKind::IncidentNew
        | RouteKind::IncidentEdit
        | RouteKind::ChangeRequestNew
        | RouteKind::ChangeRequestEdit
        | RouteKind::ProjectNew
        | RouteKind::ProjectEdit => Page::Form,
        kind if kind.is_list() => Page::List,
        _ => Page::Detail,
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub route: Route,
}

/// The screen for the current route. `data-route` names the route for
/// automation.
#[function_component(Screen)]
pub fn screen(p: &Props) -> Html {
    let route = p.route.clone();
    let page = match page_for(route.kind()) {
        Page::Dashboard => html! { <DashboardPage /> },
        Page::List => html! { <RecordList route={route.clone()} /> },
        Page::Form => html! { <RecordForm route={route.clone()} /> },
        Page::Detail => html! { <RecordDetail route={route.clone()} /> },
    };
    html! {
        <section
            class="screen"
            aria-labelledby="screen-title"
            data-route={route.name()}
            data-fragment={route.fragment()}
        >
            { page }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_page() {
        assert_eq!(page_for(RouteKind::Dashboard), Page::Dashboard);
        assert_eq!(page_for(RouteKind::ProjectApps), Page::List);
        assert_eq!(page_for(RouteKind::MonitoringDashboards), Page::List);
        assert_eq!(page_for(RouteKind::IncidentNew), Page::Form);
        assert_eq!(page_for(RouteKind::ProjectEdit), Page::Form);
        assert_eq!(page_for(RouteKind::ProjectAppDetail), Page::Detail);
        let forms = RouteKind::ALL
            .into_iter()
            .filter(|kind| page_for(*kind) == Page::Form)
            .count();
        assert_eq!(forms, 6);
    }
}
