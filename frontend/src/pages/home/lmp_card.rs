//! LmpCard component - Summary of one program

use super::types::{CardView, ClickOrigin};
use crate::components::{Badge, BadgeVariant, Card, CardContent, CardHeader};
use crate::utils;
use crate::Route;
use web_sys::Element;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LmpCardProps {
    pub view: CardView,
    pub on_toggle: Callback<(String, ClickOrigin)>,
}

/// Classify a click by the element it landed on
fn click_origin(e: &MouseEvent) -> ClickOrigin {
    match e.target_dyn_into::<Element>() {
        Some(el) if el.tag_name().eq_ignore_ascii_case("a") => ClickOrigin::Link,
        _ => ClickOrigin::Card,
    }
}

#[function_component(LmpCard)]
pub fn lmp_card(props: &LmpCardProps) -> Html {
    let view = &props.view;

    let on_card_click = {
        let on_toggle = props.on_toggle.clone();
        let name = view.name.clone();
        Callback::from(move |e: MouseEvent| {
            on_toggle.emit((name.clone(), click_origin(&e)));
        })
    };

    // Navigation only; the card must not see this click
    let on_link_click = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <Card class="lmp-card" onclick={on_card_click}>
            <CardHeader>
                <div class="lmp-card-header">
                    <span class="lmp-card-title" onclick={on_link_click}>
                        <Link<Route> to={Route::Lmp { name: view.name.clone() }}>
                            { &view.title }
                        </Link<Route>>
                    </span>
                    <div class="lmp-card-badges">
                        <Badge variant={BadgeVariant::Secondary}>{ &view.id_badge }</Badge>
                        <Badge variant={BadgeVariant::Success}>{ "Latest" }</Badge>
                        <Badge>{ &view.versions_badge }</Badge>
                    </div>
                </div>
            </CardHeader>
            <CardContent>
                <div class="source-preview">
                    <code>{ &view.preview }</code>
                </div>
                <p class="muted small">{ &view.last_updated }</p>
                if let Some(history) = &view.history {
                    <div class="version-history">
                        <h3>{ "Version History:" }</h3>
                        <ul>
                            { for history.iter().map(|row| html! {
                                <li key={row.lmp_id.clone()} class="version-entry">
                                    <div class="version-dot"></div>
                                    <div class="version-details">
                                        <p class="version-label">{ &row.label }</p>
                                        <p>{ utils::format_local_timestamp(row.created_at) }</p>
                                        <p>{ &row.invocations_label }</p>
                                    </div>
                                </li>
                            }) }
                        </ul>
                    </div>
                }
            </CardContent>
        </Card>
    }
}
