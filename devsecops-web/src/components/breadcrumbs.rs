use devsecops_core::{Route, breadcrumbs};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub route: Route,
}

#[function_component(Breadcrumbs)]
pub fn breadcrumb_trail(p: &Props) -> Html {
    let crumbs = breadcrumbs(&p.route);
    html! {
        <nav aria-label="Breadcrumbs" class="breadcrumbs">
            <ol>
                { for crumbs.into_iter().map(|crumb| {
                    if crumb.current {
                        html! { <li><span aria-current="page">{ crumb.label }</span></li> }
                    } else {
                        html! { <li><a href={crumb.route.href()}>{ crumb.label }</a></li> }
                    }
                }) }
            </ol>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devsecops_core::parse_fragment;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn trail_links_ancestors_and_marks_the_current_screen() {
        let props = Props {
            route: parse_fragment("incident/INC-003/edit"),
        };
        let html = block_on(LocalServerRenderer::<Breadcrumbs>::with_props(props).render());
        assert!(html.contains(r##"<a href="#dashboard">Dashboard</a>"##));
        assert!(html.contains(r##"<a href="#incidents">Incidents</a>"##));
        assert!(html.contains(r##"<a href="#incident/INC-003">INC-003</a>"##));
        assert!(html.contains(r#"<span aria-current="page">Edit</span>"#));
    }
}
