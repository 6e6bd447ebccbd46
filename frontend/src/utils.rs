use wasm_bindgen::JsValue;
use web_sys::window;

/// Get the base HTTP URL (e.g., "http://localhost:3000" or "https://studio.example.com")
pub fn get_base_url() -> String {
    let Some(window) = window() else {
        return String::new();
    };
    let location = window.location();

    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location
        .host()
        .unwrap_or_else(|_| "localhost:3000".to_string());

    format!("{}//{}", protocol, host)
}

/// Build a full API URL from a path (e.g., "/api/lmps" -> "http://localhost:3000/api/lmps")
pub fn api_url(path: &str) -> String {
    format!("{}{}", get_base_url(), path)
}

/// Current time in seconds since the Unix epoch, from the browser clock
pub fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Format a Unix timestamp (seconds) in the browser's locale, e.g. "9/14/2024, 10:32:07 AM"
pub fn format_local_timestamp(secs: i64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(secs as f64 * 1000.0));
    date.to_locale_string("default", &JsValue::UNDEFINED).into()
}
