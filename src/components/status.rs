use leptos::*;

use crate::api::ApiClient;
use crate::browser::WebBrowser;
use crate::models::user::LoginRole;
use crate::session::SessionStore;

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="spinner" role="status">
            <span class="spinner-dot"></span>
            <span class="sr-only">{ "Loading..." }</span>
        </div>
    }
}

/// Error panel scoped to one screen, with an optional manual retry.
#[component]
pub fn ErrorBanner(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="error-banner">
            <h3>{title}</h3>
            <p>{message}</p>
            {on_retry.map(|retry| view! {
                <button class="btn btn-primary" on:click=move |_| retry.call(())>{ "Try Again" }</button>
            })}
        </div>
    }
}

/// Shown when an owner-only call answers 401/403.
#[component]
pub fn AccessDenied() -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let api = store_value(expect_context::<ApiClient>());

    let refresh = move |_| {
        spawn_local(async move {
            let api = api.get_value();
            session.refresh(&api).await;
        });
    };
    let relogin = move |_| session.login(&api.get_value(), LoginRole::Admin, &WebBrowser);

    view! {
        <div class="error-banner">
            <h3>{ "Access denied" }</h3>
            <p>{ "Your session may have expired or this account cannot manage businesses." }</p>
            <div class="button-row">
                <button class="btn btn-secondary" on:click=refresh>{ "Refresh session" }</button>
                <button class="btn btn-primary" on:click=relogin>{ "Log in again" }</button>
            </div>
        </div>
    }
}

/// One-line success or failure notice for form actions.
#[component]
pub fn Notice(#[prop(into)] notice: Signal<Option<(bool, String)>>) -> impl IntoView {
    move || {
        notice.get().map(|(ok, text)| {
            view! {
                <div class="notice" class:notice-ok=ok class:notice-error=!ok>{text}</div>
            }
        })
    }
}
