use wasm_bindgen::prelude::*;

/// Replaces `window.fetch` so components talk to a canned backend.

#[wasm_bindgen(inline_js = r#"
let originalFetch = null;
let calls = [];

export function install_fetch_mock(status, body) {
    if (originalFetch === null) {
        originalFetch = window.fetch;
    }
    calls = [];
    window.fetch = function (input, init) {
        const url = typeof input === "string" ? input : input.url;
        const method = (init && init.method) || (input && input.method) || "GET";
        calls.push(method + " " + url);
        console.log("[MOCK FETCH]", method, url, "->", status);
        return Promise.resolve(new Response(body, {
            status: status,
            headers: { "Content-Type": "application/json" },
        }));
    };
}

export function restore_fetch() {
    if (originalFetch !== null) {
        window.fetch = originalFetch;
        originalFetch = null;
    }
}

export function fetch_calls() {
    return calls.join("\n");
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = install_fetch_mock)]
    fn install_fetch_mock_js(status: u16, body: &str);
    #[wasm_bindgen(js_name = restore_fetch)]
    fn restore_fetch_js();
    #[wasm_bindgen(js_name = fetch_calls)]
    fn fetch_calls_js() -> String;
}

/// Every request now answers `status` with `body`.
pub fn install_fetch_mock(status: u16, body: &str) {
    install_fetch_mock_js(status, body);
}

pub fn restore_fetch() {
    restore_fetch_js();
}

/// `"METHOD url"` for each request seen since the mock was installed.
pub fn fetch_calls() -> Vec<String> {
    fetch_calls_js()
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
