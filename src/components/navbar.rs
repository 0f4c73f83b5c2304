use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::{use_navigate, use_query_map, NavigateOptions, A};

use crate::api::ApiClient;
use crate::browser::WebBrowser;
use crate::models::user::LoginRole;
use crate::session::SessionStore;

/// Home URL for a search box value. Blank searches go to the full listing.
pub fn search_href(term: &str) -> String {
    let term = term.trim();
    if term.is_empty() {
        "/".to_string()
    } else {
        format!("/?search={}", urlencoding::encode(term))
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let api = store_value(expect_context::<ApiClient>());
    let query = use_query_map();
    let navigate = use_navigate();

    let term = create_rw_signal(query.with_untracked(|q| q.get("search").cloned().unwrap_or_default()));
    let menu_open = create_rw_signal(false);

    let on_search = move |ev: SubmitEvent| {
        ev.prevent_default();
        navigate(&search_href(&term.get_untracked()), NavigateOptions::default());
    };

    let login = move |role: LoginRole| {
        menu_open.set(false);
        session.login(&api.get_value(), role, &WebBrowser);
    };

    let logout = move |_| {
        spawn_local(async move {
            session.logout(&api.get_value(), &WebBrowser).await;
        });
    };

    let signed_in = move || {
        session.user().map(|user| {
            view! {
                <span class="navbar-greeting">{format!("Hi, {}", user.name)}</span>
                <Show when=move || session.is_admin()>
                    <A href="/admin" class="btn btn-secondary">{ "Business Portal" }</A>
                </Show>
                <button class="btn btn-secondary" on:click=logout>{ "Logout" }</button>
            }
        })
    };

    let signed_out = move || {
        view! {
            <div class="dropdown">
                <button class="btn btn-primary" on:click=move |_| menu_open.update(|open| *open = !*open)>
                    { "Login" }
                </button>
                <Show when=move || menu_open.get()>
                    <div class="dropdown-menu">
                        <button on:click=move |_| login(LoginRole::Customer)>{ "Login as Customer" }</button>
                        <button on:click=move |_| login(LoginRole::Admin)>{ "Login as Business Owner" }</button>
                    </div>
                </Show>
            </div>
        }
    };

    view! {
        <nav class="navbar">
            <A href="/" class="navbar-brand">{ "ReviewGate" }</A>
            <form class="navbar-search" on:submit=on_search>
                <input
                    type="search"
                    placeholder="Search businesses..."
                    prop:value=move || term.get()
                    on:input=move |ev| term.set(event_target_value(&ev))
                />
                <button type="submit" class="btn btn-primary">{ "Search" }</button>
            </form>
            <div class="navbar-actions">
                {move || {
                    if session.is_loading() {
                        ().into_view()
                    } else if session.is_authenticated() {
                        signed_in().into_view()
                    } else {
                        signed_out().into_view()
                    }
                }}
            </div>
        </nav>
    }
}
