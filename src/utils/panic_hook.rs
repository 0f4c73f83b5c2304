use std::panic;

use leptos::logging::error;

/// Forwards panics to the browser console and flags the ones caused by a
/// callback outliving its component.
pub fn set_custom_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        console_error_panic_hook::hook(panic_info);

        let message = panic_info
            .payload()
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| panic_info.payload().downcast_ref::<&str>().map(|s| s.to_string()))
            .unwrap_or_else(|| "Unknown panic".to_string());

        if message.contains("OwnerDisposed") || message.contains("disposed") {
            error!("[PANIC] A signal was used after its owner was disposed.");
            error!("[PANIC] Usually a request finished after the user left the page that started it.");
        }
    }));
}

pub fn init() {
    set_custom_panic_hook();
}
