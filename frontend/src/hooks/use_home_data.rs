//! Hook for the home page's two-step fetch.

use crate::api::HttpApi;
use crate::pages::home::{action_for, load_home, HomeState};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Hook holding the home page state.
///
/// On mount, fetches the program list and then the traces for it. State only
/// changes once both have arrived. A failure in either step is logged and
/// the page stays unloaded; there is no retry.
///
/// # Example
/// ```ignore
/// let state = use_home_data();
/// if let Some(data) = state.data() {
///     // render graph
/// }
/// state.dispatch(HomeAction::Toggle { name, origin: ClickOrigin::Card });
/// ```
#[hook]
pub fn use_home_data() -> UseReducerHandle<HomeState> {
    let state = use_reducer(HomeState::default);

    {
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Some(action) = action_for(load_home(&HttpApi).await) {
                    dispatcher.dispatch(action);
                }
            });
            || ()
        });
    }

    state
}
