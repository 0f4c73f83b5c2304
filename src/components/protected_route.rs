use leptos::logging::log;
use leptos::*;
use leptos_router::Redirect;

use crate::components::status::LoadingSpinner;
use crate::session::SessionStore;

/// Renders `children` only for portal-eligible users.
///
/// Waits for the session check to finish, then sends everyone else to `/`.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionStore>();
    let children = store_value(children);

    move || {
        if session.is_loading() {
            view! { <LoadingSpinner /> }.into_view()
        } else if session.is_admin() {
            children.with_value(|children| children()).into_view()
        } else {
            log!("[SESSION] Portal access refused, redirecting home");
            view! { <Redirect path="/" /> }.into_view()
        }
    }
}
