//! Side effects the review and session flows need from the page.
//!
//! Flows take `&impl Browser` so their decision logic runs without a DOM;
//! components pass [`WebBrowser`].
use leptos::logging::warn;
use wasm_bindgen::JsValue;

pub trait Browser {
    /// Opens `url` in a new browsing context.
    fn open_external(&self, url: &str);
    /// Rewrites the address bar without adding a history entry.
    fn replace_path(&self, path: &str);
    /// Full page navigation.
    fn navigate(&self, href: &str);
    /// Clears local and session storage.
    fn clear_storage(&self);
    fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebBrowser;

impl WebBrowser {
    fn window(&self) -> Option<web_sys::Window> {
        web_sys::window()
    }
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl Browser for WebBrowser {
    fn open_external(&self, url: &str) {
        let Some(window) = self.window() else { return };
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            warn!("[BROWSER] Could not open {}: {}", url, describe(e));
        }
    }

    fn replace_path(&self, path: &str) {
        let Some(history) = self.window().and_then(|w| w.history().ok()) else { return };
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(path)) {
            warn!("[BROWSER] Could not replace location with {}: {}", path, describe(e));
        }
    }

    fn navigate(&self, href: &str) {
        let Some(window) = self.window() else { return };
        if let Err(e) = window.location().set_href(href) {
            warn!("[BROWSER] Could not navigate to {}: {}", href, describe(e));
        }
    }

    fn clear_storage(&self) {
        let Some(window) = self.window() else { return };
        for storage in [window.local_storage(), window.session_storage()] {
            if let Ok(Some(storage)) = storage {
                let _ = storage.clear();
            }
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
