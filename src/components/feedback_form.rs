use leptos::ev::SubmitEvent;
use leptos::logging::{error, log};
use leptos::*;

use crate::api::ApiClient;
use crate::models::feedback::{FeedbackRequest, SubRating};
use crate::triage::{FeedbackAction, InFlight};

pub const FEEDBACK_FAILURE: &str = "Failed to submit feedback. Please try again.";

fn sub_rating_select(label: &'static str, value: RwSignal<Option<SubRating>>) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <select on:change=move |ev| value.set(SubRating::from_select(&event_target_value(&ev)))>
                <option value="" selected=move || value.get().is_none()>{ "Select..." }</option>
                {SubRating::ALL
                    .into_iter()
                    .map(|option| view! {
                        <option value=option.as_str() selected=move || value.get() == Some(option)>
                            {option.label()}
                        </option>
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

/// Private feedback collected after a low rating.
///
/// Submitting and skipping both call `on_done`; a failed submit keeps the
/// form open with an error instead.
#[component]
pub fn FeedbackForm(review_id: i64, on_done: Callback<FeedbackAction>) -> impl IntoView {
    let api = store_value(expect_context::<ApiClient>());

    let text = create_rw_signal(String::new());
    let suggestions = create_rw_signal(String::new());
    let service_quality = create_rw_signal(None::<SubRating>);
    let staff_behavior = create_rw_signal(None::<SubRating>);
    let cleanliness = create_rw_signal(None::<SubRating>);
    let value_for_money = create_rw_signal(None::<SubRating>);
    let overall_experience = create_rw_signal(None::<SubRating>);
    let wants_followup = create_rw_signal(false);
    let contact_email = create_rw_signal(String::new());
    let contact_phone = create_rw_signal(String::new());
    let error_text = create_rw_signal(None::<String>);
    let in_flight = InFlight::new();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(guard) = in_flight.try_begin() else { return };
        error_text.set(None);
        let request = FeedbackRequest {
            feedback_text: text.get_untracked(),
            service_quality: service_quality.get_untracked(),
            staff_behavior: staff_behavior.get_untracked(),
            cleanliness: cleanliness.get_untracked(),
            value_for_money: value_for_money.get_untracked(),
            overall_experience: overall_experience.get_untracked(),
            suggestions: suggestions.get_untracked(),
            wants_followup: wants_followup.get_untracked(),
            contact_email: Some(contact_email.get_untracked()),
            contact_phone: Some(contact_phone.get_untracked()),
        }
        .normalized();

        spawn_local(async move {
            let result = api.get_value().create_feedback(review_id, &request).await;
            drop(guard);
            match result {
                Ok(()) => {
                    log!("[REVIEW] Feedback stored for review {}", review_id);
                    on_done.call(FeedbackAction::Submitted);
                }
                Err(e) => {
                    error!("[REVIEW] Feedback for review {} failed: {}", review_id, e);
                    error_text.set(Some(FEEDBACK_FAILURE.to_string()));
                }
            }
        });
    };

    view! {
        <form class="feedback-form" on:submit=on_submit>
            <h3>{ "Help us improve" }</h3>
            <p class="muted">
                { "We're sorry your experience wasn't great. Your feedback goes straight to the business and is not published." }
            </p>
            {move || error_text.get().map(|text| view! { <div class="notice notice-error">{text}</div> })}

            <div class="form-group">
                <label for="feedback-text">{ "What went wrong?" }</label>
                <textarea
                    id="feedback-text"
                    rows=4
                    prop:value=move || text.get()
                    on:input=move |ev| text.set(event_target_value(&ev))
                ></textarea>
            </div>

            <div class="sub-ratings">
                {sub_rating_select("Service quality", service_quality)}
                {sub_rating_select("Staff behavior", staff_behavior)}
                {sub_rating_select("Cleanliness", cleanliness)}
                {sub_rating_select("Value for money", value_for_money)}
                {sub_rating_select("Overall experience", overall_experience)}
            </div>

            <div class="form-group">
                <label for="feedback-suggestions">{ "Suggestions" }</label>
                <textarea
                    id="feedback-suggestions"
                    rows=3
                    prop:value=move || suggestions.get()
                    on:input=move |ev| suggestions.set(event_target_value(&ev))
                ></textarea>
            </div>

            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || wants_followup.get()
                    on:change=move |ev| wants_followup.set(event_target_checked(&ev))
                />
                { "I'd like the business to contact me" }
            </label>

            <Show when=move || wants_followup.get()>
                <div class="form-group">
                    <label for="contact-email">{ "Contact email" }</label>
                    <input
                        id="contact-email"
                        type="email"
                        prop:value=move || contact_email.get()
                        on:input=move |ev| contact_email.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="contact-phone">{ "Contact phone" }</label>
                    <input
                        id="contact-phone"
                        type="tel"
                        prop:value=move || contact_phone.get()
                        on:input=move |ev| contact_phone.set(event_target_value(&ev))
                    />
                </div>
            </Show>

            <div class="button-row">
                <button
                    type="button"
                    class="btn btn-secondary"
                    disabled=move || in_flight.is_active()
                    on:click=move |_| on_done.call(FeedbackAction::Skipped)
                >
                    { "Skip" }
                </button>
                <button type="submit" class="btn btn-primary" disabled=move || in_flight.is_active()>
                    {move || if in_flight.is_active() { "Sending..." } else { "Submit Feedback" }}
                </button>
            </div>
        </form>
    }
}
