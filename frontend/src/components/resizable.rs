//! Horizontal two-pane split with a draggable handle

use shared::display::clamp_split;
use web_sys::Element;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResizablePanelGroupProps {
    pub left: Html,
    pub right: Html,
    /// Initial share of the left pane, in percent
    #[prop_or(70.0)]
    pub default_left: f64,
    #[prop_or(30.0)]
    pub min_left: f64,
    #[prop_or(20.0)]
    pub min_right: f64,
}

#[function_component(ResizablePanelGroup)]
pub fn resizable_panel_group(props: &ResizablePanelGroupProps) -> Html {
    let container_ref = use_node_ref();
    let split = {
        let initial = clamp_split(props.default_left, props.min_left, props.min_right);
        use_state(move || initial)
    };
    let dragging = use_state(|| false);

    let on_handle_down = {
        let dragging = dragging.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            dragging.set(true);
        })
    };

    let on_move = {
        let container_ref = container_ref.clone();
        let split = split.clone();
        let dragging = dragging.clone();
        let (min_left, min_right) = (props.min_left, props.min_right);
        Callback::from(move |e: MouseEvent| {
            if !*dragging {
                return;
            }
            let Some(container) = container_ref.cast::<Element>() else {
                return;
            };
            let rect = container.get_bounding_client_rect();
            if rect.width() <= 0.0 {
                return;
            }
            let percent = (e.client_x() as f64 - rect.left()) / rect.width() * 100.0;
            split.set(clamp_split(percent, min_left, min_right));
        })
    };

    let on_release = {
        let dragging = dragging.clone();
        Callback::from(move |_: MouseEvent| dragging.set(false))
    };

    let group_class = classes!("resizable-group", (*dragging).then_some("dragging"));

    html! {
        <div
            class={group_class}
            ref={container_ref}
            onmousemove={on_move}
            onmouseup={on_release.clone()}
            onmouseleave={on_release}
        >
            <div class="resizable-panel" style={format!("flex-basis: {:.2}%", *split)}>
                { props.left.clone() }
            </div>
            <div class="resizable-handle" onmousedown={on_handle_down}>
                <div class="resizable-grip"></div>
            </div>
            <div class="resizable-panel" style={format!("flex-basis: {:.2}%", 100.0 - *split)}>
                { props.right.clone() }
            </div>
        </div>
    }
}
