use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ScrollAreaProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

/// Vertically scrolling container that fills its parent
#[function_component(ScrollArea)]
pub fn scroll_area(props: &ScrollAreaProps) -> Html {
    let class = classes!("scroll-area", props.class.clone());
    html! {
        <div {class}>{ props.children.clone() }</div>
    }
}
