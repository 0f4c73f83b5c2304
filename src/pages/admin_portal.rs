//! Owner portal: manage listings and read the reviews and private feedback
//! they received.
use leptos::logging::{error, log};
use leptos::*;
use leptos_router::A;
use web_sys::File;

use crate::api::ApiClient;
use crate::browser::{Browser, WebBrowser};
use crate::components::business_card::BusinessImage;
use crate::components::business_form::BusinessForm;
use crate::components::review_card::ReviewCard;
use crate::components::star_rating::StarRating;
use crate::components::status::{AccessDenied, ErrorBanner, LoadingSpinner, Notice};
use crate::error::{ApiError, ErrorKind};
use crate::models::business::{Business, BusinessProfile};
use crate::models::feedback::Feedback;
use crate::triage::EXTERNAL_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingAction {
    Create,
    Update,
    Delete,
}

impl ListingAction {
    fn success(self) -> &'static str {
        match self {
            ListingAction::Create => "Business created successfully!",
            ListingAction::Update => "Business updated successfully!",
            ListingAction::Delete => "Business deleted successfully!",
        }
    }

    fn failure(self) -> &'static str {
        match self {
            ListingAction::Create => "Failed to create business",
            ListingAction::Update => "Failed to update business",
            ListingAction::Delete => "Failed to delete business",
        }
    }
}

/// `(succeeded, text)` shown after a listing action. Failures prefer the server's message.
pub fn action_notice(action: ListingAction, result: &Result<(), ApiError>) -> (bool, String) {
    match result {
        Ok(()) => (true, action.success().to_string()),
        Err(e) => (false, e.user_message(action.failure())),
    }
}

pub fn delete_prompt(business: &Business) -> String {
    format!(
        "Are you sure you want to delete \"{}\"? This cannot be undone.",
        business.business_name
    )
}

#[derive(Debug, Clone)]
enum PortalView {
    List,
    Create,
    Edit(Business),
    Reviews(Business),
}

#[component]
fn FeedbackDetails(review_id: i64) -> impl IntoView {
    let api = store_value(expect_context::<ApiClient>());
    let feedback = create_local_resource(
        move || review_id,
        move |id| async move { api.get_value().feedback_for_review(id).await },
    );

    let render = |feedback: Feedback| {
        let contact = [feedback.contact_email.clone(), feedback.contact_phone.clone()]
            .into_iter()
            .flatten()
            .filter(|c| !c.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" / ");
        view! {
            <div class="feedback-details">
                {feedback.feedback_text.clone().map(|t| view! { <p>{t}</p> })}
                <ul class="sub-ratings">
                    {feedback
                        .sub_ratings()
                        .into_iter()
                        .map(|(label, rating)| view! { <li>{format!("{label}: {}", rating.label())}</li> })
                        .collect_view()}
                </ul>
                {feedback.suggestions.clone().filter(|s| !s.trim().is_empty()).map(|s| view! {
                    <p><strong>{ "Suggestions: " }</strong>{s}</p>
                })}
                {(feedback.wants_followup && !contact.is_empty()).then(|| view! {
                    <p class="followup"><strong>{ "Wants a follow-up: " }</strong>{contact.clone()}</p>
                })}
            </div>
        }
    };

    view! {
        <Suspense fallback=|| view! { <p class="muted">{ "Loading feedback..." }</p> }>
            {move || feedback.get().map(|result| match result {
                Ok(Some(f)) => render(f).into_view(),
                Ok(None) => view! { <p class="muted">{ "No private feedback for this review." }</p> }.into_view(),
                Err(e) => view! { <p class="notice notice-error">{e.user_message("Failed to load feedback")}</p> }
                    .into_view(),
            })}
        </Suspense>
    }
}

#[component]
fn OwnerReviews(business: Business, on_close: Callback<()>) -> impl IntoView {
    let api = store_value(expect_context::<ApiClient>());
    let business_id = business.id;
    let reviews = create_local_resource(
        move || business_id,
        move |id| async move { api.get_value().owner_reviews(id).await },
    );

    view! {
        <section class="owner-reviews">
            <div class="section-header">
                <h2>{format!("Reviews for {}", business.business_name)}</h2>
                <button class="btn btn-secondary" on:click=move |_| on_close.call(())>{ "Back" }</button>
            </div>
            <Suspense fallback=|| view! { <LoadingSpinner /> }>
                {move || reviews.get().map(|result| match result {
                    Err(e) if e.kind() == ErrorKind::AccessDenied => view! { <AccessDenied /> }.into_view(),
                    Err(e) => view! {
                        <ErrorBanner
                            title="Could not load reviews"
                            message=e.user_message("Failed to load reviews")
                            on_retry=Callback::new(move |_: ()| reviews.refetch())
                        />
                    }
                    .into_view(),
                    Ok(list) if list.is_empty() => view! { <p class="empty-state">{ "No reviews yet." }</p> }.into_view(),
                    Ok(list) => list
                        .into_iter()
                        .map(|review| {
                            let low = review.rating < EXTERNAL_THRESHOLD;
                            let review_id = review.id;
                            view! {
                                <div class="owner-review">
                                    <ReviewCard review=review />
                                    {low.then(|| view! { <FeedbackDetails review_id=review_id /> })}
                                </div>
                            }
                        })
                        .collect_view(),
                })}
            </Suspense>
        </section>
    }
}

#[component]
pub fn AdminPortal() -> impl IntoView {
    let api = store_value(expect_context::<ApiClient>());
    let businesses = create_local_resource(
        || (),
        move |_| async move { api.get_value().my_businesses().await },
    );
    let mode = create_rw_signal(PortalView::List);
    let busy = create_rw_signal(false);
    let notice = create_rw_signal(None::<(bool, String)>);
    let denied = create_rw_signal(false);

    let finish = move |action: ListingAction, result: Result<(), ApiError>| {
        busy.set(false);
        match &result {
            Ok(()) => {
                log!("[ADMIN] {:?} succeeded", action);
                mode.set(PortalView::List);
                businesses.refetch();
            }
            Err(e) => {
                error!("[ADMIN] {:?} failed: {}", action, e);
                if e.kind() == ErrorKind::AccessDenied {
                    denied.set(true);
                }
            }
        }
        notice.set(Some(action_notice(action, &result)));
    };

    let save = Callback::new(move |(profile, image): (BusinessProfile, Option<File>)| {
        let editing = match mode.get_untracked() {
            PortalView::Edit(business) => Some(business.id),
            _ => None,
        };
        busy.set(true);
        spawn_local(async move {
            let api = api.get_value();
            let (action, result) = match editing {
                Some(id) => (
                    ListingAction::Update,
                    api.update_business(id, &profile, image.as_ref()).await,
                ),
                None => (
                    ListingAction::Create,
                    api.create_business(&profile, image.as_ref()).await,
                ),
            };
            finish(action, result);
        });
    });

    let delete = move |business: Business| {
        if !WebBrowser.confirm(&delete_prompt(&business)) {
            return;
        }
        busy.set(true);
        spawn_local(async move {
            let result = api.get_value().delete_business(business.id).await;
            finish(ListingAction::Delete, result);
        });
    };

    let back = Callback::new(move |_: ()| mode.set(PortalView::List));
    let open = move |next: PortalView| {
        notice.set(None);
        mode.set(next);
    };

    let row = move |business: Business| {
        let name = business.business_name.clone();
        let href = business.detail_path();
        let rating = business.average_rating;
        let count = business.review_count_label();
        let (for_reviews, for_edit, for_delete) = (business.clone(), business.clone(), business.clone());
        view! {
            <li class="portal-row">
                <BusinessImage business=business class="portal-thumb" />
                <div class="portal-row-body">
                    <A href=href>{name}</A>
                    <div class="business-card-rating">
                        <StarRating rating=rating size=14 show_value=true />
                        <span class="muted">{count}</span>
                    </div>
                </div>
                <div class="button-row">
                    <button class="btn btn-secondary" on:click=move |_| open(PortalView::Reviews(for_reviews.clone()))>
                        { "Reviews" }
                    </button>
                    <button class="btn btn-secondary" on:click=move |_| open(PortalView::Edit(for_edit.clone()))>
                        { "Edit" }
                    </button>
                    <button
                        class="btn btn-danger"
                        disabled=move || busy.get()
                        on:click=move |_| delete(for_delete.clone())
                    >
                        { "Delete" }
                    </button>
                </div>
            </li>
        }
    };

    let listing = move || {
        view! {
            <div class="section-header">
                <h1>{ "My Businesses" }</h1>
                <button class="btn btn-primary" on:click=move |_| open(PortalView::Create)>
                    { "Add Business" }
                </button>
            </div>
            <Transition fallback=|| view! { <LoadingSpinner /> }>
                {move || businesses.get().map(|result| match result {
                    Err(e) if e.kind() == ErrorKind::AccessDenied => view! { <AccessDenied /> }.into_view(),
                    Err(e) => view! {
                        <ErrorBanner
                            title="Could not load your businesses"
                            message=e.user_message("Failed to load businesses")
                            on_retry=Callback::new(move |_: ()| businesses.refetch())
                        />
                    }
                    .into_view(),
                    Ok(list) if list.is_empty() => view! {
                        <p class="empty-state">{ "You haven't added any businesses yet." }</p>
                    }
                    .into_view(),
                    Ok(list) => view! {
                        <ul class="portal-list">{list.into_iter().map(row).collect_view()}</ul>
                    }
                    .into_view(),
                })}
            </Transition>
        }
    };

    view! {
        <section class="page admin-portal">
            <Notice notice=notice />
            {move || {
                if denied.get() {
                    return view! { <AccessDenied /> }.into_view();
                }
                match mode.get() {
                    PortalView::List => listing().into_view(),
                    PortalView::Create => view! {
                        <BusinessForm on_submit=save on_cancel=back busy=busy />
                    }
                    .into_view(),
                    PortalView::Edit(business) => view! {
                        <BusinessForm business=business on_submit=save on_cancel=back busy=busy />
                    }
                    .into_view(),
                    PortalView::Reviews(business) => view! {
                        <OwnerReviews business=business on_close=back />
                    }
                    .into_view(),
                }
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_notice() {
        assert_eq!(
            action_notice(ListingAction::Create, &Ok(())),
            (true, "Business created successfully!".to_string())
        );
        assert_eq!(
            action_notice(ListingAction::Delete, &Err(ApiError::from_status(500, ""))),
            (false, "Failed to delete business".to_string())
        );
        assert_eq!(
            action_notice(
                ListingAction::Update,
                &Err(ApiError::from_status(400, r#"{"message":"Business name already taken"}"#))
            ),
            (false, "Business name already taken".to_string())
        );
    }

    #[test]
    fn test_delete_prompt_names_business() {
        let business = Business {
            business_name: "Joe's Diner".into(),
            ..Default::default()
        };
        assert!(delete_prompt(&business).contains("\"Joe's Diner\""));
    }
}
