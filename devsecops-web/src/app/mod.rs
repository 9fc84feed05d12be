use crate::components::breadcrumbs::Breadcrumbs;
use crate::components::header::Header;
use crate::pages::Screen;
use yew::prelude::*;

pub mod routing;
pub mod state;
pub mod test_bridge;

pub use state::RouteContext;

#[derive(Properties, PartialEq, Clone, Default)]
pub struct Props {
    /// Start from this fragment instead of the browser location.
    #[prop_or_default]
    pub fragment: Option<AttrValue>,
}

#[function_component(App)]
pub fn app(props: &Props) -> Html {
    let ctx = state::use_route_store(props.fragment.clone());
    routing::use_hash_sync(&ctx);
    test_bridge::use_test_bridge(&ctx);

    let route = ctx.route.clone();
    html! {
        <ContextProvider<RouteContext> context={ctx}>
            <Header route={route.clone()} />
            <main id="main" role="main" tabindex="-1">
                <Breadcrumbs route={route.clone()} />
                <Screen {route} />
            </main>
        </ContextProvider<RouteContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn render(fragment: &str) -> String {
        let props = Props {
            fragment: Some(AttrValue::from(fragment.to_string())),
        };
        block_on(LocalServerRenderer::<App>::with_props(props).render())
    }

    #[test]
    fn cold_deep_links_render_their_screen() {
        let html = render("#incidents");
        assert!(html.contains(r#"data-route="incidents""#));
        let html = render("project-apps/app-001");
        assert!(html.contains(r#"data-route="app-detail""#));
        assert!(html.contains(r#"data-fragment="project-apps/app-001""#));
    }

    #[test]
    fn garbage_renders_the_dashboard() {
        let html = render("garbage-not-a-route");
        assert!(html.contains(r#"data-route="dashboard""#));
    }

    #[test]
    fn default_props_start_on_the_dashboard() {
        let html = block_on(LocalServerRenderer::<App>::new().render());
        assert!(html.contains(r#"data-route="dashboard""#));
    }
}
