use crate::config::asset_path;
use devsecops_core::{Route, RouteKind};
use yew::prelude::*;

/// Top-level sections, in menu order.
pub const SECTIONS: [RouteKind; 7] = [
    RouteKind::Dashboard,
    RouteKind::Incidents,
    RouteKind::ChangeRequests,
    RouteKind::RiskRegisters,
    RouteKind::MonitoringDashboards,
    RouteKind::PasswordVault,
    RouteKind::Projects,
];

/// The menu section a screen belongs to.
#[must_use]
pub fn section_of(kind: RouteKind) -> RouteKind {
    let mut current = kind;
    while let Some(parent) = current.parent() {
        if parent == RouteKind::Dashboard {
            break;
        }
        current = parent;
    }
    current
}

/// Focus the main landmark without touching the hash, which belongs to the
/// router.
fn skip_to_main(event: MouseEvent) {
    event.prevent_default();
    if let Err(err) = crate::dom::focus_element("main") {
        log::warn!("skip link: {err}");
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub route: Route,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let active = section_of(p.route.kind());
    html! {
        <header role="banner">
            <a href={p.route.href()} class="sr-only" data-skip-link="main" onclick={Callback::from(skip_to_main)}>
                { "Skip to content" }
            </a>
            <div class="header-content">
                <img class="logo" src={asset_path("static/img/logo.svg")} alt="DevSecOps" />
                <nav aria-label="Sections">
                    <ul class="menu menu-horizontal">
                        { for SECTIONS.iter().map(|kind| {
                            let href = Route::try_new(*kind, None, None)
                                .map(|route| route.href())
                                .unwrap_or_default();
                            let current = (*kind == active).then(|| AttrValue::from("page"));
                            html! {
                                <li>
                                    <a {href} aria-current={current} data-section={kind.name()}>
                                        { kind.title() }
                                    </a>
                                </li>
                            }
                        }) }
                    </ul>
                </nav>
            </div>
        </header>
    }
}
