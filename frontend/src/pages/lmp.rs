//! LMP page - Every version of one program

use crate::components::{Badge, BadgeVariant, Card, CardContent, CardHeader, ScrollArea};
use crate::hooks::{use_lmp, UseLmp};
use crate::theme::use_theme;
use crate::utils;
use crate::Route;
use shared::display::{truncate_id, version_count_label, version_ordinal};
use shared::{time_ago, ApiError};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LmpPageProps {
    pub name: String,
}

#[function_component(LmpPage)]
pub fn lmp_page(props: &LmpPageProps) -> Html {
    let theme = use_theme();
    let UseLmp {
        lmp,
        loading,
        error,
    } = use_lmp(&props.name);
    let now = utils::now_secs();

    let body = if loading {
        html! {
            <div class="loading">
                <div class="spinner"></div>
                <p>{ "Loading program..." }</p>
            </div>
        }
    } else if let Some(lmp) = lmp {
        let total = lmp.versions.len();
        html! {
            <>
                <div class="lmp-summary">
                    <Badge>{ version_count_label(total) }</Badge>
                    <Badge variant={BadgeVariant::Secondary}>
                        { format!("{} invocations", lmp.total_invocations()) }
                    </Badge>
                </div>
                { for lmp.versions.iter().enumerate().map(|(index, version)| html! {
                    <Card key={version.lmp_id.clone()} class="version-card">
                        <CardHeader>
                            <div class="lmp-card-header">
                                <span class="version-label">
                                    { format!("Version {}", version_ordinal(total, index)) }
                                </span>
                                <div class="lmp-card-badges">
                                    <Badge variant={BadgeVariant::Secondary}>
                                        { format!("ID: {}", truncate_id(&version.lmp_id)) }
                                    </Badge>
                                    if index == 0 {
                                        <Badge variant={BadgeVariant::Success}>{ "Latest" }</Badge>
                                    }
                                </div>
                            </div>
                        </CardHeader>
                        <CardContent>
                            <p class="muted small">
                                { format!(
                                    "{} ({})",
                                    utils::format_local_timestamp(version.created_at),
                                    time_ago(version.created_at, now)
                                ) }
                            </p>
                            <p class="small">{ format!("Invocations: {}", version.invocations) }</p>
                            <pre class="source-full"><code>{ &version.source }</code></pre>
                        </CardContent>
                    </Card>
                }) }
            </>
        }
    } else {
        let message = match error {
            Some(ApiError::NotFound(_)) | None => "No program with this name".to_string(),
            Some(e) => e.to_string(),
        };
        html! {
            <div class="empty-state">
                <h2>{ "Program not found" }</h2>
                <p>{ message }</p>
            </div>
        }
    };

    html! {
        <div class={classes!("lmp-page", theme.class())}>
            <header class="page-header">
                <Link<Route> to={Route::Home} classes="back-link">{ "← All programs" }</Link<Route>>
                <span class="page-title">{ &props.name }</span>
            </header>
            <ScrollArea class="lmp-page-body">
                { body }
            </ScrollArea>
        </div>
    }
}
