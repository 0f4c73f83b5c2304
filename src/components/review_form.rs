use leptos::ev::SubmitEvent;
use leptos::logging::error;
use leptos::*;

use crate::api::ApiClient;
use crate::browser::WebBrowser;
use crate::components::feedback_form::FeedbackForm;
use crate::components::star_rating::StarRating;
use crate::error::SubmitError;
use crate::models::business::Business;
use crate::triage::{
    rating_hint, submit_review, FeedbackAction, InFlight, ReviewDraft, ReviewFlow, TriageOutcome,
    POSITIVE_CONFIRMATION,
};

/// Review form for one business.
///
/// Ratings of 4 or 5 open the external review page and finish immediately.
/// Lower ratings swap the form for [`FeedbackForm`]. `on_complete` fires once
/// per finished flow, carrying the confirmation text for high ratings.
#[component]
pub fn ReviewForm(
    business: Business,
    on_complete: Callback<Option<String>>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let api = store_value(expect_context::<ApiClient>());
    let business = store_value(business);

    let rating = create_rw_signal(0u8);
    let comment = create_rw_signal(String::new());
    let name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let phone = create_rw_signal(String::new());
    let anonymous = create_rw_signal(false);
    let error_text = create_rw_signal(None::<String>);
    let flow = create_rw_signal(ReviewFlow::Editing);
    let in_flight = InFlight::new();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error_text.set(None);
        let draft = ReviewDraft {
            rating: rating.get_untracked(),
            comment: comment.get_untracked(),
            customer_name: name.get_untracked(),
            customer_email: email.get_untracked(),
            customer_phone: phone.get_untracked(),
            is_anonymous: anonymous.get_untracked(),
        };
        spawn_local(async move {
            let api = api.get_value();
            let business = business.get_value();
            let business_id = business.id;
            let result = submit_review(&draft, &business, &in_flight, &WebBrowser, move |request| async move {
                api.create_review(business_id, &request).await
            })
            .await;

            match result {
                Ok(outcome) => {
                    let next = ReviewFlow::after_review(&outcome);
                    flow.set(next);
                    if next == ReviewFlow::Complete {
                        let message = matches!(outcome, TriageOutcome::External { .. })
                            .then(|| POSITIVE_CONFIRMATION.to_string());
                        on_complete.call(message);
                    }
                }
                Err(SubmitError::AlreadySubmitting) => {}
                Err(e) => {
                    error!("[REVIEW] Submission failed: {}", e);
                    error_text.set(Some(e.user_message()));
                }
            }
        });
    };

    let finish_feedback = Callback::new(move |action: FeedbackAction| {
        flow.update(|current| *current = current.after_feedback(action));
        on_complete.call(None);
    });

    let form = move || {
        view! {
            <form class="review-form" on:submit=on_submit>
                <h3>{ "Leave a Review" }</h3>
                {move || error_text.get().map(|text| view! { <div class="notice notice-error">{text}</div> })}

                <div class="form-group">
                    <label>{ "Your rating" }</label>
                    <StarRating
                        rating=Signal::derive(move || f64::from(rating.get()))
                        on_change=Callback::new(move |star: u8| rating.set(star))
                        size=32
                    />
                    {move || rating_hint(rating.get()).map(|hint| view! { <p class="rating-hint">{hint}</p> })}
                </div>

                <div class="form-group">
                    <label for="review-comment">{ "Your review" }</label>
                    <textarea
                        id="review-comment"
                        rows=4
                        placeholder="Tell others about your experience"
                        prop:value=move || comment.get()
                        on:input=move |ev| comment.set(event_target_value(&ev))
                    ></textarea>
                </div>

                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || anonymous.get()
                        on:change=move |ev| anonymous.set(event_target_checked(&ev))
                    />
                    { "Post anonymously" }
                </label>

                <Show when=move || !anonymous.get()>
                    <div class="form-group">
                        <label for="review-name">{ "Name *" }</label>
                        <input
                            id="review-name"
                            type="text"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="review-email">{ "Email *" }</label>
                        <input
                            id="review-email"
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="review-phone">{ "Phone" }</label>
                        <input
                            id="review-phone"
                            type="tel"
                            prop:value=move || phone.get()
                            on:input=move |ev| phone.set(event_target_value(&ev))
                        />
                    </div>
                </Show>

                <div class="button-row">
                    {on_cancel.map(|cancel| view! {
                        <button type="button" class="btn btn-secondary" on:click=move |_| cancel.call(())>
                            { "Cancel" }
                        </button>
                    })}
                    <button type="submit" class="btn btn-primary" disabled=move || in_flight.is_active()>
                        {move || if in_flight.is_active() { "Submitting..." } else { "Submit Review" }}
                    </button>
                </div>
            </form>
        }
    };

    move || match flow.get() {
        ReviewFlow::Editing => form().into_view(),
        ReviewFlow::AwaitingFeedback { review_id } => view! {
            <FeedbackForm review_id=review_id on_done=finish_feedback />
        }
        .into_view(),
        ReviewFlow::Complete => ().into_view(),
    }
}
