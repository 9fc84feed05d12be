use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    #[prop_or_default]
    pub primary: bool,
    #[prop_or_default]
    pub disabled: bool,
    /// Stable hook for automation, rendered as `data-action`.
    #[prop_or_default]
    pub action: Option<AttrValue>,
}

#[function_component(Button)]
pub fn button(p: &Props) -> Html {
    let class = classes!("btn", p.primary.then_some("btn-primary"));
    html! {
        <button
            type="button"
            {class}
            disabled={p.disabled}
            data-action={p.action.clone()}
            onclick={p.onclick.clone()}
        >
            { p.label.clone() }
        </button>
    }
}
