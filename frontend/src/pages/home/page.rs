//! Home page - Program graph and card list

use super::lmp_card::LmpCard;
use super::types::{CardView, ClickOrigin, HeaderView, HomeAction};
use crate::components::{DependencyGraph, ResizablePanelGroup, ScrollArea};
use crate::hooks::use_home_data;
use crate::theme::use_theme;
use crate::utils;
use yew::prelude::*;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let theme = use_theme();
    let state = use_home_data();
    let now = utils::now_secs();

    let lmps = state.lmps();
    let header = HeaderView::new(lmps, now);

    let on_toggle = {
        let state = state.clone();
        Callback::from(move |(name, origin): (String, ClickOrigin)| {
            state.dispatch(HomeAction::Toggle { name, origin });
        })
    };

    let on_theme_toggle = {
        let toggle = theme.toggle.clone();
        Callback::from(move |_: MouseEvent| toggle.emit(()))
    };

    // Withheld until both programs and traces have loaded
    let graph = state.data().map(|data| {
        html! {
            <DependencyGraph lmps={data.lmps.clone()} traces={data.traces.clone()} />
        }
    });

    let left = html! {
        <div class="graph-pane">
            <div class="page-header">
                <span class="page-title">
                    <span class="page-icon">{ "</>" }</span>
                    { "Language Model Programs" }
                </span>
                <div class="page-stats">
                    <span>{ &header.total_label }</span>
                    <span>{ &header.last_updated }</span>
                    <button class="theme-toggle" onclick={on_theme_toggle} title="Toggle dark mode">
                        { if theme.dark_mode { "☀" } else { "☾" } }
                    </button>
                </div>
            </div>
            <div class="graph-body">
                { graph.unwrap_or_default() }
            </div>
        </div>
    };

    let right = html! {
        <ScrollArea class="card-scroll">
            <div class="card-list">
                { for lmps.iter().map(|lmp| {
                    let view = CardView::new(lmp, state.is_expanded(&lmp.name), now);
                    html! {
                        <LmpCard key={lmp.name.clone()} {view} on_toggle={on_toggle.clone()} />
                    }
                }) }
            </div>
        </ScrollArea>
    };

    html! {
        <div class={classes!("home-page", theme.class())}>
            <ResizablePanelGroup
                {left}
                {right}
                default_left={70.0}
                min_left={30.0}
                min_right={20.0}
            />
        </div>
    }
}
