use leptos::*;
use leptos_router::{use_query_map, A};

use crate::api::ApiClient;
use crate::components::business_card::BusinessCard;
use crate::components::status::{ErrorBanner, LoadingSpinner};

pub fn results_label(count: usize) -> String {
    match count {
        1 => "Found 1 business".to_string(),
        n => format!("Found {n} businesses"),
    }
}

/// Empty-state text, depending on whether a search is active.
pub fn empty_hint(searching: bool) -> &'static str {
    if searching {
        "Try adjusting your search terms or browse all businesses."
    } else {
        "No businesses have been added yet. Check back later."
    }
}

/// Business directory. `?search=` narrows it by name.
#[component]
pub fn HomePage() -> impl IntoView {
    let api = store_value(expect_context::<ApiClient>());
    let query = use_query_map();
    let search = move || {
        query.with(|q| {
            q.get("search")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
    };

    let businesses = create_local_resource(search, move |term| async move {
        let api = api.get_value();
        match term {
            Some(term) => api.search_businesses(&term).await,
            None => api.list_businesses().await,
        }
    });
    let retry = Callback::new(move |_: ()| businesses.refetch());

    view! {
        <section class="page home-page">
            <header class="hero">
                <h1>{ "Find businesses worth reviewing" }</h1>
                {move || match search() {
                    Some(term) => view! { <p class="muted">{format!("Search results for \"{term}\"")}</p> }.into_view(),
                    None => view! { <p class="muted">{ "Browse local businesses and share your experience." }</p> }.into_view(),
                }}
            </header>
            <Suspense fallback=|| view! { <LoadingSpinner /> }>
                {move || businesses.get().map(|result| match result {
                    Err(e) => view! {
                        <ErrorBanner
                            title="Error Loading Businesses"
                            message=e.user_message("Failed to load businesses. Please try again.")
                            on_retry=retry
                        />
                    }
                    .into_view(),
                    Ok(list) if list.is_empty() => view! {
                        <div class="empty-state">
                            <h3>{ "No businesses found" }</h3>
                            <p>{move || empty_hint(search().is_some())}</p>
                            <Show when=move || search().is_some()>
                                <A href="/" class="btn btn-secondary">{ "Browse All Businesses" }</A>
                            </Show>
                        </div>
                    }
                    .into_view(),
                    Ok(list) => view! {
                        <p class="results-count">{results_label(list.len())}</p>
                        <div class="business-grid">
                            {list
                                .into_iter()
                                .map(|business| view! { <BusinessCard business=business /> })
                                .collect_view()}
                        </div>
                    }
                    .into_view(),
                })}
            </Suspense>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_label() {
        assert_eq!(results_label(0), "Found 0 businesses");
        assert_eq!(results_label(1), "Found 1 business");
        assert_eq!(results_label(12), "Found 12 businesses");
    }

    #[test]
    fn test_empty_hint() {
        assert_eq!(empty_hint(true), "Try adjusting your search terms or browse all businesses.");
        assert_eq!(empty_hint(false), "No businesses have been added yet. Check back later.");
    }
}
