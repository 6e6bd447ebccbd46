use yew::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BadgeVariant {
    #[default]
    Default,
    Secondary,
    Success,
}

impl BadgeVariant {
    fn class(self) -> &'static str {
        match self {
            BadgeVariant::Default => "badge",
            BadgeVariant::Secondary => "badge badge-secondary",
            BadgeVariant::Success => "badge badge-success",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct BadgeProps {
    #[prop_or_default]
    pub variant: BadgeVariant,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Badge)]
pub fn badge(props: &BadgeProps) -> Html {
    html! {
        <span class={props.variant.class()}>{ props.children.clone() }</span>
    }
}
