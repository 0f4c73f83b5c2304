use std::future::Future;

use leptos::logging::{log, warn};
use leptos::*;
use leptos_router::{use_params_map, A};

use crate::api::ApiClient;
use crate::browser::{Browser, WebBrowser};
use crate::components::business_card::BusinessImage;
use crate::components::review_form::ReviewForm;
use crate::components::reviews_list::ReviewsList;
use crate::components::star_rating::StarRating;
use crate::components::status::{ErrorBanner, LoadingSpinner};
use crate::error::{ApiError, ErrorKind};
use crate::models::business::Business;
use crate::routing::{canonical_correction, detail_path, BusinessRef};
use crate::session::SessionStore;

const REVIEW_THANKS: &str = "Thank you! Your review has been submitted.";

/// Looks a business up by id or slug, then swaps the address bar to its
/// canonical slug path without another lookup.
pub async fn load_business<F, Fut>(
    segment: &str,
    browser: &impl Browser,
    lookup: F,
) -> Result<Business, ApiError>
where
    F: FnOnce(BusinessRef) -> Fut,
    Fut: Future<Output = Result<Business, ApiError>>,
{
    let target = BusinessRef::parse(segment);
    log!("[DETAIL] Looking up {:?}", target);
    let business = lookup(target).await?;
    if let Some(path) = canonical_correction(&detail_path(segment), &business.business_name) {
        log!("[DETAIL] Rewriting location to {}", path);
        browser.replace_path(&path);
    }
    Ok(business)
}

#[component]
fn BusinessHeader(business: Business) -> impl IntoView {
    let phone = business.phone().map(str::to_string);
    let address = business.address.clone().filter(|a| !a.trim().is_empty());
    let description = business.description.clone().filter(|d| !d.trim().is_empty());
    let links = business.social_links();
    let rating = business.average_rating;
    let reviews = business.review_count_label();
    let name = business.business_name.clone();

    view! {
        <header class="business-header">
            <BusinessImage business=business class="business-hero-image" />
            <div class="business-header-body">
                <h1>{name}</h1>
                <div class="business-card-rating">
                    <StarRating rating=rating size=24 show_value=true />
                    <span class="muted">{reviews}</span>
                </div>
                {phone.map(|p| view! { <p><a href=format!("tel:{p}")>{p.clone()}</a></p> })}
                {address.map(|a| view! { <p class="muted">{a}</p> })}
                {description.map(|d| view! { <p class="business-description">{d}</p> })}
                <ul class="social-links">
                    {links
                        .into_iter()
                        .map(|(label, url)| view! {
                            <li><a href=url target="_blank" rel="noopener noreferrer">{label}</a></li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </header>
    }
}

#[component]
pub fn BusinessDetailPage() -> impl IntoView {
    let api = store_value(expect_context::<ApiClient>());
    let session = expect_context::<SessionStore>();
    let params = use_params_map();
    let segment = move || params.with(|p| p.get("id").cloned().unwrap_or_default());

    let business = create_local_resource(segment, move |segment| async move {
        let api = api.get_value();
        load_business(&segment, &WebBrowser, move |target| async move {
            api.resolve_business(&target).await
        })
        .await
    });
    let business_id = create_memo(move |_| business.get().and_then(Result::ok).map(|b| b.id));

    let reviews = create_local_resource(
        move || business_id.get(),
        move |id| async move {
            match id {
                Some(id) => api.get_value().reviews_for_business(id).await,
                None => Ok(Vec::new()),
            }
        },
    );

    let has_reviewed = create_local_resource(
        move || (business_id.get(), session.is_authenticated()),
        move |(id, signed_in)| async move {
            match (id, signed_in) {
                (Some(id), true) => api.get_value().has_reviewed(id).await.unwrap_or_else(|e| {
                    warn!("[DETAIL] Could not check for an earlier review: {}", e);
                    false
                }),
                _ => false,
            }
        },
    );

    let show_form = create_rw_signal(false);
    let notice = create_rw_signal(None::<String>);

    let on_complete = Callback::new(move |message: Option<String>| {
        show_form.set(false);
        notice.set(Some(message.unwrap_or_else(|| REVIEW_THANKS.to_string())));
        business.refetch();
        reviews.refetch();
        has_reviewed.refetch();
    });
    let on_cancel = Callback::new(move |_: ()| show_form.set(false));
    let retry = Callback::new(move |_: ()| business.refetch());

    let review_area = move |loaded: Business| {
        move || {
            if has_reviewed.get().unwrap_or(false) {
                view! { <p class="notice notice-ok">{ "Thanks for reviewing this business!" }</p> }.into_view()
            } else if show_form.get() {
                view! { <ReviewForm business=loaded.clone() on_complete=on_complete on_cancel=on_cancel /> }
                    .into_view()
            } else {
                view! {
                    <button
                        class="btn btn-primary"
                        on:click=move |_| {
                            notice.set(None);
                            show_form.set(true);
                        }
                    >
                        { "Write a Review" }
                    </button>
                }
                .into_view()
            }
        }
    };

    let reviews_view = move || {
        reviews.get().map(|result| match result {
            Ok(list) => view! { <ReviewsList reviews=list /> }.into_view(),
            Err(e) => view! {
                <ErrorBanner
                    title="Could not load reviews"
                    message=e.user_message("Failed to load reviews.")
                    on_retry=Callback::new(move |_: ()| reviews.refetch())
                />
            }
            .into_view(),
        })
    };

    view! {
        <section class="page detail-page">
            <Transition fallback=|| view! { <LoadingSpinner /> }>
                {move || business.get().map(|result| match result {
                    Ok(loaded) => {
                        let header = loaded.clone();
                        view! {
                            <BusinessHeader business=header />
                            {move || notice.get().map(|text| view! { <div class="notice notice-ok">{text}</div> })}
                            <div class="review-area">{review_area(loaded)}</div>
                            {reviews_view}
                        }
                        .into_view()
                    }
                    Err(e) if e.kind() == ErrorKind::NotFound => view! {
                        <div class="empty-state">
                            <h2>{ "Business not found" }</h2>
                            <p>{ "The business you're looking for doesn't exist or has been removed." }</p>
                            <A href="/" class="btn btn-primary">{ "Back to Home" }</A>
                        </div>
                    }
                    .into_view(),
                    Err(e) => view! {
                        <ErrorBanner
                            title="Failed to load business"
                            message=e.user_message("Failed to load business. Please try again.")
                            on_retry=retry
                        />
                    }
                    .into_view(),
                })}
            </Transition>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::testing::RecordingBrowser;
    use std::cell::RefCell;

    fn joes() -> Business {
        Business {
            id: 482,
            business_name: "Joe's Diner".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_numeric_segment_looks_up_by_id_and_rewrites() {
        let browser = RecordingBrowser::default();
        let seen = RefCell::new(None);

        let business = load_business("482", &browser, |target| {
            *seen.borrow_mut() = Some(target);
            async { Ok::<_, ApiError>(joes()) }
        })
        .await
        .unwrap();

        assert_eq!(business.id, 482);
        assert_eq!(*seen.borrow(), Some(BusinessRef::Id(482)));
        assert_eq!(*browser.replaced.borrow(), vec!["/business/joes-diner".to_string()]);
    }

    #[tokio::test]
    async fn test_canonical_slug_is_left_alone() {
        let browser = RecordingBrowser::default();
        let seen = RefCell::new(None);

        load_business("joes-diner", &browser, |target| {
            *seen.borrow_mut() = Some(target);
            async { Ok::<_, ApiError>(joes()) }
        })
        .await
        .unwrap();

        assert_eq!(*seen.borrow(), Some(BusinessRef::Slug("joes-diner".into())));
        assert!(browser.replaced.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_miss_is_not_found_and_keeps_location() {
        let browser = RecordingBrowser::default();

        let err = load_business("nowhere", &browser, |_| async {
            Err::<Business, _>(ApiError::from_status(404, ""))
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(browser.replaced.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_other_failures_are_generic() {
        let browser = RecordingBrowser::default();
        let err = load_business("12", &browser, |_| async {
            Err::<Business, _>(ApiError::from_status(503, "Service unavailable"))
        })
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(err.user_message("Failed to load business."), "Service unavailable");
    }
}
