//! Hook for fetching a single program by name.

use crate::api::HttpApi;
use shared::{ApiError, Lmp, LmpStudioApi};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Return value from the use_lmp hook.
pub struct UseLmp {
    pub lmp: Option<Lmp>,
    /// True until the first response (or error) arrives
    pub loading: bool,
    pub error: Option<ApiError>,
}

/// Shared flag for one in-flight request, cleared when the effect that
/// started it is torn down (name changed or page unmounted).
#[derive(Clone, Debug)]
pub struct RequestToken(Rc<Cell<bool>>);

impl RequestToken {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_current(&self) -> bool {
        self.0.get()
    }

    pub fn invalidate(&self) {
        self.0.set(false);
    }
}

impl Default for RequestToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch `name`, returning `None` if the token was invalidated while waiting.
pub async fn fetch_if_current<A: LmpStudioApi>(
    api: &A,
    name: &str,
    token: &RequestToken,
) -> Option<Result<Lmp, ApiError>> {
    let result = api.fetch_lmp(name).await;
    token.is_current().then_some(result)
}

/// Fetch one program whenever `name` changes.
///
/// A response for a name the page has already moved away from is dropped.
#[hook]
pub fn use_lmp(name: &str) -> UseLmp {
    let lmp = use_state(|| None::<Lmp>);
    let loading = use_state(|| true);
    let error = use_state(|| None::<ApiError>);

    {
        let lmp = lmp.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with(name.to_string(), move |name| {
            let name = name.clone();
            let token = RequestToken::new();
            loading.set(true);
            {
                let token = token.clone();
                spawn_local(async move {
                    let Some(result) = fetch_if_current(&HttpApi, &name, &token).await else {
                        log::debug!("Dropping stale response for LMP {}", name);
                        return;
                    };
                    match result {
                        Ok(found) => {
                            error.set(None);
                            lmp.set(Some(found));
                        }
                        Err(e) => {
                            log::error!("Failed to fetch LMP {}: {}", name, e);
                            lmp.set(None);
                            error.set(Some(e));
                        }
                    }
                    loading.set(false);
                });
            }
            move || token.invalidate()
        });
    }

    UseLmp {
        lmp: (*lmp).clone(),
        loading: *loading,
        error: (*error).clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use shared::{aggregate_by_name, LmpRecord, Trace};
    use std::cell::RefCell;

    /// Serves any name, and can run a navigation while the request is pending
    #[derive(Default)]
    struct SlowApi {
        during_fetch: RefCell<Option<RequestToken>>,
    }

    impl LmpStudioApi for SlowApi {
        async fn fetch_lmps(&self) -> Result<Vec<Lmp>, ApiError> {
            Ok(Vec::new())
        }

        async fn fetch_traces(&self, _lmps: &[Lmp]) -> Result<Vec<Trace>, ApiError> {
            Ok(Vec::new())
        }

        async fn fetch_lmp(&self, name: &str) -> Result<Lmp, ApiError> {
            if let Some(token) = self.during_fetch.borrow_mut().take() {
                token.invalidate();
            }
            aggregate_by_name(vec![LmpRecord {
                lmp_id: format!("{}-v1", name),
                name: name.to_string(),
                source: String::new(),
                created_at: 0,
                invocations: 0,
                uses: Vec::new(),
            }])
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(name.to_string()))
        }
    }

    #[test]
    fn test_current_request_delivers_result() {
        let api = SlowApi::default();
        let token = RequestToken::new();

        let result = block_on(fetch_if_current(&api, "alpha", &token));
        assert_eq!(result.unwrap().unwrap().name, "alpha");
    }

    #[test]
    fn test_response_after_navigation_is_dropped() {
        let api = SlowApi::default();
        let first = RequestToken::new();
        *api.during_fetch.borrow_mut() = Some(first.clone());

        // The name changes while "alpha" is still loading
        assert!(block_on(fetch_if_current(&api, "alpha", &first)).is_none());

        let second = RequestToken::new();
        let result = block_on(fetch_if_current(&api, "beta", &second));
        assert_eq!(result.unwrap().unwrap().name, "beta");
        assert!(!first.is_current());
        assert!(second.is_current());
    }
}
