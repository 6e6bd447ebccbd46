//! Card container with header and content sections

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CardProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub onclick: Option<Callback<MouseEvent>>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Card)]
pub fn card(props: &CardProps) -> Html {
    let class = classes!("card", props.class.clone());
    html! {
        <div {class} onclick={props.onclick.clone()}>
            { props.children.clone() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CardSectionProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(CardHeader)]
pub fn card_header(props: &CardSectionProps) -> Html {
    html! {
        <div class="card-header">{ props.children.clone() }</div>
    }
}

#[function_component(CardContent)]
pub fn card_content(props: &CardSectionProps) -> Html {
    html! {
        <div class="card-content">{ props.children.clone() }</div>
    }
}
