//! State and view models for the home page
//!
//! Kept free of DOM access so the page's behavior can be tested natively.

use shared::display::{source_preview, truncate_id, version_count_label, version_ordinal};
use shared::{time_ago, ApiError, Lmp, LmpStudioApi, Trace};
use std::rc::Rc;
use yew::Reducible;

/// Programs and traces fetched on mount
#[derive(Clone, Debug, PartialEq)]
pub struct HomeData {
    pub lmps: Rc<Vec<Lmp>>,
    pub traces: Rc<Vec<Trace>>,
}

/// Fetch the program list, then the traces for that list.
///
/// Nothing is returned unless both steps succeed.
pub async fn load_home<A: LmpStudioApi>(api: &A) -> Result<HomeData, ApiError> {
    let lmps = api.fetch_lmps().await?;
    let traces = api.fetch_traces(&lmps).await?;
    Ok(HomeData {
        lmps: Rc::new(lmps),
        traces: Rc::new(traces),
    })
}

/// What the page should do with the outcome of `load_home`.
///
/// Failures are logged and produce no action, leaving the page unloaded.
pub fn action_for(result: Result<HomeData, ApiError>) -> Option<HomeAction> {
    match result {
        Ok(data) => Some(HomeAction::Loaded(data)),
        Err(e) => {
            log::error!("Error fetching LMPs: {}", e);
            None
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded(HomeData),
}

/// Where a click on a program card landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOrigin {
    /// Anywhere on the card except the identifier link
    Card,
    /// The identifier link; navigates instead of toggling
    Link,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HomeAction {
    Loaded(HomeData),
    Toggle { name: String, origin: ClickOrigin },
}

/// Page state: {unloaded, loaded} x {no selection, one expanded program}
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HomeState {
    pub load: LoadState,
    pub expanded: Option<String>,
}

impl HomeState {
    /// Both collections, once loaded; the graph is only drawn when this is `Some`
    pub fn data(&self) -> Option<&HomeData> {
        match &self.load {
            LoadState::Loaded(data) => Some(data),
            LoadState::Unloaded => None,
        }
    }

    pub fn lmps(&self) -> &[Lmp] {
        self.data().map(|d| d.lmps.as_slice()).unwrap_or(&[])
    }

    pub fn is_expanded(&self, name: &str) -> bool {
        self.expanded.as_deref() == Some(name)
    }
}

impl Reducible for HomeState {
    type Action = HomeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            HomeAction::Loaded(data) => Rc::new(HomeState {
                load: LoadState::Loaded(data),
                expanded: self.expanded.clone(),
            }),
            HomeAction::Toggle {
                origin: ClickOrigin::Link,
                ..
            } => self,
            HomeAction::Toggle {
                name,
                origin: ClickOrigin::Card,
            } => {
                let expanded = if self.is_expanded(&name) {
                    None
                } else {
                    Some(name)
                };
                Rc::new(HomeState {
                    load: self.load.clone(),
                    expanded,
                })
            }
        }
    }
}

/// Text shown in the page header
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderView {
    pub total_label: String,
    pub last_updated: String,
}

impl HeaderView {
    pub fn new(lmps: &[Lmp], now_secs: i64) -> Self {
        let last_updated = lmps
            .first()
            .and_then(|lmp| lmp.latest())
            .map(|v| time_ago(v.created_at, now_secs))
            .unwrap_or_else(|| "N/A".to_string());
        Self {
            total_label: format!("Total LMPs: {}", lmps.len()),
            last_updated: format!("Last Updated: {}", last_updated),
        }
    }
}

/// One entry in an expanded card's version history
#[derive(Clone, Debug, PartialEq)]
pub struct VersionRow {
    pub lmp_id: String,
    pub label: String,
    /// Seconds since the epoch; formatted in the browser's locale at render
    pub created_at: i64,
    pub invocations_label: String,
}

/// Text shown on a program's summary card
#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub name: String,
    pub title: String,
    pub id_badge: String,
    pub versions_badge: String,
    pub preview: String,
    pub last_updated: String,
    /// Present only when expanded and the program has more than one version
    pub history: Option<Vec<VersionRow>>,
}

impl CardView {
    pub fn new(lmp: &Lmp, expanded: bool, now_secs: i64) -> Self {
        let latest = lmp.latest();
        let total = lmp.versions.len();

        let history = (expanded && total > 1).then(|| {
            lmp.versions
                .iter()
                .enumerate()
                .map(|(index, version)| VersionRow {
                    lmp_id: version.lmp_id.clone(),
                    label: format!("Version {}", version_ordinal(total, index)),
                    created_at: version.created_at,
                    invocations_label: format!("Invocations: {}", version.invocations),
                })
                .collect()
        });

        Self {
            name: lmp.name.clone(),
            title: truncate_id(&lmp.name),
            id_badge: format!(
                "ID: {}",
                latest.map(|v| truncate_id(&v.lmp_id)).unwrap_or_default()
            ),
            versions_badge: version_count_label(total),
            preview: source_preview(&lmp.source),
            last_updated: format!(
                "Last Updated: {}",
                latest
                    .map(|v| time_ago(v.created_at, now_secs))
                    .unwrap_or_else(|| "N/A".to_string())
            ),
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use shared::{aggregate_by_name, LmpRecord};
    use std::cell::Cell;

    const NOW: i64 = 1_726_000_000;

    struct FakeApi {
        records: Result<Vec<LmpRecord>, ApiError>,
        traces: Result<Vec<Trace>, ApiError>,
        trace_calls: Cell<usize>,
    }

    impl FakeApi {
        fn new(
            records: Result<Vec<LmpRecord>, ApiError>,
            traces: Result<Vec<Trace>, ApiError>,
        ) -> Self {
            Self {
                records,
                traces,
                trace_calls: Cell::new(0),
            }
        }
    }

    impl LmpStudioApi for FakeApi {
        async fn fetch_lmps(&self) -> Result<Vec<Lmp>, ApiError> {
            self.records.clone().map(aggregate_by_name)
        }

        async fn fetch_traces(&self, _lmps: &[Lmp]) -> Result<Vec<Trace>, ApiError> {
            self.trace_calls.set(self.trace_calls.get() + 1);
            self.traces.clone()
        }

        async fn fetch_lmp(&self, name: &str) -> Result<Lmp, ApiError> {
            Err(ApiError::NotFound(name.to_string()))
        }
    }

    fn record(lmp_id: &str, name: &str, created_at: i64, invocations: i64) -> LmpRecord {
        LmpRecord {
            lmp_id: lmp_id.to_string(),
            name: name.to_string(),
            source: format!("def {}():\n    return 'hello'", name),
            created_at,
            invocations,
            uses: Vec::new(),
        }
    }

    fn loaded(lmps: Vec<Lmp>) -> Rc<HomeState> {
        Rc::new(HomeState::default()).reduce(HomeAction::Loaded(HomeData {
            lmps: Rc::new(lmps),
            traces: Rc::new(Vec::new()),
        }))
    }

    fn toggle(state: Rc<HomeState>, name: &str, origin: ClickOrigin) -> Rc<HomeState> {
        state.reduce(HomeAction::Toggle {
            name: name.to_string(),
            origin,
        })
    }

    #[test]
    fn test_expansion_is_exclusive() {
        let state = Rc::new(HomeState::default());
        let state = toggle(state, "alpha", ClickOrigin::Card);
        assert!(state.is_expanded("alpha"));

        let state = toggle(state, "beta", ClickOrigin::Card);
        assert!(state.is_expanded("beta"));
        assert!(!state.is_expanded("alpha"));
    }

    #[test]
    fn test_toggle_same_card_collapses() {
        let state = toggle(Rc::new(HomeState::default()), "alpha", ClickOrigin::Card);
        let state = toggle(state, "alpha", ClickOrigin::Card);
        assert_eq!(state.expanded, None);
    }

    #[test]
    fn test_link_click_does_not_toggle() {
        let state = toggle(Rc::new(HomeState::default()), "alpha", ClickOrigin::Link);
        assert_eq!(state.expanded, None);

        let state = toggle(state, "alpha", ClickOrigin::Card);
        let state = toggle(state, "alpha", ClickOrigin::Link);
        assert!(state.is_expanded("alpha"));
    }

    #[test]
    fn test_end_to_end_single_program_two_versions() {
        let api = FakeApi::new(
            Ok(vec![
                record("b3d0e6f7a1c94e52", "summarize_article", NOW - 600, 3),
                record("9a7e51d03c6b28f4", "summarize_article", NOW - 86_400, 5),
            ]),
            Ok(Vec::new()),
        );

        let action = action_for(block_on(load_home(&api))).unwrap();
        let state = Rc::new(HomeState::default()).reduce(action);
        assert!(state.data().is_some());

        let header = HeaderView::new(state.lmps(), NOW);
        assert_eq!(header.total_label, "Total LMPs: 1");
        assert_eq!(header.last_updated, "Last Updated: 10 minutes ago");

        let lmp = &state.lmps()[0];
        let collapsed = CardView::new(lmp, state.is_expanded(&lmp.name), NOW);
        assert_eq!(collapsed.versions_badge, "2 Versions");
        assert_eq!(collapsed.title, "summariz...");
        assert_eq!(collapsed.id_badge, "ID: b3d0e6f7...");
        assert!(collapsed.history.is_none());

        let state = toggle(state, "summarize_article", ClickOrigin::Card);
        let lmp = &state.lmps()[0];
        let expanded = CardView::new(lmp, state.is_expanded(&lmp.name), NOW);
        let history = expanded.history.unwrap();
        let labels: Vec<_> = history.iter().map(|row| row.label.as_str()).collect();
        assert_eq!(labels, vec!["Version 2", "Version 1"]);
        assert_eq!(history[0].invocations_label, "Invocations: 3");
        assert_eq!(history[1].invocations_label, "Invocations: 5");
    }

    #[test]
    fn test_program_fetch_failure_never_loads() {
        let api = FakeApi::new(
            Err(ApiError::Network("connection refused".to_string())),
            Ok(Vec::new()),
        );

        let result = block_on(load_home(&api));
        assert!(result.is_err());
        assert_eq!(api.trace_calls.get(), 0);

        let action = action_for(result);
        assert_eq!(action, None);

        let state = action
            .into_iter()
            .fold(Rc::new(HomeState::default()), |state, action| state.reduce(action));
        assert_eq!(state.load, LoadState::Unloaded);
        assert!(state.data().is_none());
        assert!(state.lmps().is_empty());
    }

    #[test]
    fn test_trace_fetch_failure_discards_programs() {
        let api = FakeApi::new(
            Ok(vec![record("a1", "alpha", NOW, 0)]),
            Err(ApiError::Server {
                status: 500,
                message: "boom".to_string(),
            }),
        );

        let result = block_on(load_home(&api));
        assert_eq!(api.trace_calls.get(), 1);
        assert_eq!(action_for(result), None);
    }

    #[test]
    fn test_failure_after_selection_keeps_page_unloaded() {
        let state = toggle(Rc::new(HomeState::default()), "alpha", ClickOrigin::Card);
        let failed = action_for(Err(ApiError::Parse("expected value".to_string())));

        let state = failed
            .into_iter()
            .fold(state, |state, action| state.reduce(action));
        assert!(state.data().is_none());
        assert!(state.is_expanded("alpha"));
    }

    #[test]
    fn test_single_version_never_shows_history() {
        let lmps = aggregate_by_name(vec![record("a1", "alpha", NOW - 5, 2)]);
        let state = toggle(loaded(lmps), "alpha", ClickOrigin::Card);

        let card = CardView::new(&state.lmps()[0], true, NOW);
        assert_eq!(card.versions_badge, "1 Version");
        assert!(card.history.is_none());
    }

    #[test]
    fn test_header_without_programs() {
        let header = HeaderView::new(&[], NOW);
        assert_eq!(header.total_label, "Total LMPs: 0");
        assert_eq!(header.last_updated, "Last Updated: N/A");
    }

    #[test]
    fn test_loading_keeps_existing_selection() {
        let state = toggle(Rc::new(HomeState::default()), "alpha", ClickOrigin::Card);
        let state = state.reduce(HomeAction::Loaded(HomeData {
            lmps: Rc::new(Vec::new()),
            traces: Rc::new(Vec::new()),
        }));
        assert!(state.data().is_some());
        assert!(state.is_expanded("alpha"));
    }
}
