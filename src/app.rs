/// Application root for ReviewGate.
/// Builds the API client and session from build-time configuration, shares
/// them through context and wires the three routes.
use leptos::*;
use leptos_meta::{provide_meta_context, Stylesheet, Title};
use leptos_router::{Route, Router, Routes};

use crate::api::ApiClient;
use crate::components::navbar::Navbar;
use crate::components::protected_route::ProtectedRoute;
use crate::config::AppConfig;
use crate::pages::admin_portal::AdminPortal;
use crate::pages::business_detail::BusinessDetailPage;
use crate::pages::home::HomePage;
use crate::session::SessionStore;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_build_env();
    let api = ApiClient::new(config.api_base_url.clone());
    let session = SessionStore::new(config.admin_policy.clone());
    provide_context(config);
    provide_context(api.clone());
    provide_context(session);

    // Resolve who is signed in once at startup.
    spawn_local(async move {
        session.refresh(&api).await;
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/reviewgate.css" />
        <Title text="ReviewGate" />
        <Router>
            <Navbar />
            <main class="container">
                <Routes>
                    <Route path="/" view=HomePage />
                    <Route path="/business/:id" view=BusinessDetailPage />
                    <Route
                        path="/admin"
                        view=|| view! {
                            <ProtectedRoute>
                                <AdminPortal />
                            </ProtectedRoute>
                        }
                    />
                </Routes>
            </main>
        </Router>
    }
}
