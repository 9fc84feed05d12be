use devsecops_core::{Route, RouteKind};
use devsecops_web::app::{App, Props};
use devsecops_web::components::breadcrumbs::{self, Breadcrumbs};
use futures::executor::block_on;
use yew::{AttrValue, LocalServerRenderer};

fn render_at(fragment: &str) -> String {
    let props = Props {
        fragment: Some(AttrValue::from(fragment.to_string())),
    };
    block_on(LocalServerRenderer::<App>::with_props(props).render())
}

fn sample(kind: RouteKind) -> Route {
    let (primary, secondary) = match kind.required_params() {
        0 => (None, None),
        1 => (Some("REC-1"), None),
        _ => (Some("PROJ-001"), Some("app-001")),
    };
    Route::try_new(kind, primary, secondary).expect("sample ids are valid")
}

#[test]
fn every_route_renders_its_own_screen() {
    for kind in RouteKind::ALL {
        let route = sample(kind);
        let html = render_at(&route.href());
        assert!(
            html.contains(&format!(r#"data-route="{}""#, kind.name())),
            "{} did not render",
            kind.name()
        );
        assert!(html.contains(&format!(r#"data-fragment="{}""#, route.fragment())));
    }
}

#[test]
fn shell_has_header_main_and_breadcrumbs() {
    let html = render_at("incident/INC-003");
    assert!(html.contains(r#"role="banner""#));
    assert!(html.contains(r#"id="main""#));
    assert!(html.contains(r#"aria-label="Breadcrumbs""#));
}

#[test]
fn invalid_ids_still_render_the_detail_screen() {
    let html = render_at("project-apps/invalid-app");
    assert!(html.contains(r#"data-route="app-detail""#));
    assert!(html.contains("invalid-app"));
}

#[test]
fn breadcrumbs_for_nested_apps() {
    let props = breadcrumbs::Props {
        route: sample(RouteKind::ProjectAppDetail),
    };
    let html = block_on(LocalServerRenderer::<Breadcrumbs>::with_props(props).render());
    assert!(html.contains(r##"href="#project/PROJ-001""##));
    assert!(html.contains(r#"<span aria-current="page">app-001</span>"#));
}
