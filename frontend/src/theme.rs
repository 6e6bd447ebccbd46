//! Dark mode context, persisted in localStorage.

use gloo::storage::{LocalStorage, Storage};
use yew::prelude::*;

/// Storage key for the dark mode preference in localStorage
pub const DARK_MODE_STORAGE_KEY: &str = "lmp-studio-dark-mode";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThemeContext {
    pub dark_mode: bool,
    pub toggle: Callback<()>,
}

impl ThemeContext {
    /// Root class for themed containers
    pub fn class(&self) -> &'static str {
        theme_class(self.dark_mode)
    }
}

pub fn theme_class(dark_mode: bool) -> &'static str {
    if dark_mode {
        "theme-dark"
    } else {
        "theme-light"
    }
}

/// Load dark mode preference from localStorage
fn load_dark_mode() -> bool {
    LocalStorage::get::<bool>(DARK_MODE_STORAGE_KEY).unwrap_or(false)
}

/// Save dark mode preference to localStorage
fn save_dark_mode(dark_mode: bool) {
    if let Err(e) = LocalStorage::set(DARK_MODE_STORAGE_KEY, dark_mode) {
        log::warn!("Failed to persist dark mode preference: {}", e);
    }
}

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let dark_mode = use_state(load_dark_mode);

    let toggle = {
        let dark_mode = dark_mode.clone();
        Callback::from(move |_| {
            let next = !*dark_mode;
            save_dark_mode(next);
            dark_mode.set(next);
        })
    };

    let context = ThemeContext {
        dark_mode: *dark_mode,
        toggle,
    };

    html! {
        <ContextProvider<ThemeContext> {context}>
            { props.children.clone() }
        </ContextProvider<ThemeContext>>
    }
}

/// Current theme; light with a no-op toggle outside a `ThemeProvider`.
#[hook]
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().unwrap_or_default()
}
