use crate::components::header::SECTIONS;
use devsecops_core::{Route, RouteKind};
use yew::prelude::*;

fn blurb(kind: RouteKind) -> &'static str {
    match kind {
        RouteKind::Incidents => "Track and resolve security incidents.",
        RouteKind::ChangeRequests => "Review and approve infrastructure changes.",
        RouteKind::RiskRegisters => "Assess and follow up on known risks.",
        RouteKind::MonitoringDashboards => "Jump to the monitoring tools.",
        RouteKind::PasswordVault => "Shared credentials for the team.",
        RouteKind::Projects => "Projects and their applications.",
        _ => "",
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    html! {
        <>
            <div class="screen-header">
                <h1 id="screen-title">{ RouteKind::Dashboard.title() }</h1>
            </div>
            <div class="tiles">
                { for SECTIONS.iter().filter(|kind| **kind != RouteKind::Dashboard).map(|kind| {
                    let href = Route::try_new(*kind, None, None)
                        .map(|route| route.href())
                        .unwrap_or_default();
                    html! {
                        <a class="tile card" {href} data-section={kind.name()}>
                            <h2>{ kind.title() }</h2>
                            <p>{ blurb(*kind) }</p>
                        </a>
                    }
                }) }
            </div>
        </>
    }
}
