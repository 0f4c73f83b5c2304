//! Review submission and rating triage.
//!
//! Ratings of 4 or 5 send the visitor to the business's external review page.
//! Ratings of 1 to 3 keep them here and ask for structured feedback on the
//! review that was just created. A review never has feedback when its rating
//! is 4 or above.
use std::future::Future;

use leptos::logging::{log, warn};
use leptos::*;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::browser::Browser;
use crate::error::{ApiError, SubmitError, ValidationError};
use crate::models::business::Business;
use crate::models::review::{CreateReviewRequest, CreateReviewResponse};

pub const POSITIVE_CONFIRMATION: &str =
    "Thank you for your positive review! You will be redirected to leave a Google review.";

pub const EXTERNAL_THRESHOLD: u8 = 4;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Hint shown under the stars once a rating is picked.
pub fn rating_hint(rating: u8) -> Option<&'static str> {
    match rating {
        0 => None,
        r if r >= EXTERNAL_THRESHOLD => Some("You'll be redirected to leave a Google review"),
        _ => Some("We'd love your feedback to improve"),
    }
}

/// What the visitor typed into the review form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub is_anonymous: bool,
}

impl ReviewDraft {
    pub fn validate(&self) -> Result<CreateReviewRequest, ValidationError> {
        match self.rating {
            0 => return Err(ValidationError::MissingRating),
            1..=5 => {}
            _ => return Err(ValidationError::RatingOutOfRange),
        }

        if !self.is_anonymous {
            if self.customer_name.trim().is_empty() {
                return Err(ValidationError::MissingName);
            }
            if self.customer_email.trim().is_empty() {
                return Err(ValidationError::MissingEmail);
            }
            if !is_valid_email(self.customer_email.trim()) {
                return Err(ValidationError::InvalidEmail);
            }
        }

        let identity = |value: &str| {
            if self.is_anonymous {
                String::new()
            } else {
                value.trim().to_string()
            }
        };
        Ok(CreateReviewRequest {
            rating: self.rating,
            comment: self.comment.trim().to_string(),
            customer_name: identity(&self.customer_name),
            customer_email: identity(&self.customer_email),
            customer_phone: identity(&self.customer_phone),
            is_anonymous: self.is_anonymous,
        })
    }
}

/// Per-form flag that blocks a second submission while one is pending.
#[derive(Debug, Clone, Copy)]
pub struct InFlight {
    active: RwSignal<bool>,
}

impl InFlight {
    pub fn new() -> Self {
        Self {
            active: create_rw_signal(false),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Marks the form busy until the returned guard is dropped.
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        if self.active.get_untracked() {
            return None;
        }
        self.active.set(true);
        Some(InFlightGuard { active: self.active })
    }
}

impl Default for InFlight {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use]
pub struct InFlightGuard {
    active: RwSignal<bool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        // The form may already be gone.
        let _ = self.active.try_set(false);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriageOutcome {
    /// High rating: the external review page was opened.
    External { url: String },
    /// Low rating: collect feedback for this review.
    Feedback { review_id: i64 },
    /// Low rating but the backend returned no review to attach feedback to.
    Complete,
}

/// The business's own review link, or a web search for it.
pub fn external_review_url(business: &Business) -> String {
    match business.external_review_link() {
        Some(url) => url.to_string(),
        None => format!(
            "https://www.google.com/search?q={}",
            urlencoding::encode(&format!("{} review", business.business_name))
        ),
    }
}

pub fn triage(rating: u8, response: &CreateReviewResponse, business: &Business) -> TriageOutcome {
    let high = rating >= EXTERNAL_THRESHOLD;
    if high != response.should_redirect_externally || high == response.should_show_feedback_form {
        warn!(
            "[REVIEW] Backend routing flags disagree with rating {} (redirect={}, feedback={})",
            rating, response.should_redirect_externally, response.should_show_feedback_form
        );
    }

    if high {
        return TriageOutcome::External {
            url: external_review_url(business),
        };
    }
    match response.review.as_ref() {
        Some(review) => TriageOutcome::Feedback { review_id: review.id },
        None => TriageOutcome::Complete,
    }
}

/// Validates the draft, sends it once, and routes on the rating.
///
/// Nothing is sent when validation fails or another submission is in flight.
pub async fn submit_review<F, Fut>(
    draft: &ReviewDraft,
    business: &Business,
    in_flight: &InFlight,
    browser: &impl Browser,
    send: F,
) -> Result<TriageOutcome, SubmitError>
where
    F: FnOnce(CreateReviewRequest) -> Fut,
    Fut: Future<Output = Result<CreateReviewResponse, ApiError>>,
{
    let request = draft.validate()?;
    let Some(_guard) = in_flight.try_begin() else {
        log!("[REVIEW] Already submitting, ignoring duplicate request");
        return Err(SubmitError::AlreadySubmitting);
    };

    log!("[REVIEW] Submitting rating {} for business {}", request.rating, business.id);
    let response = send(request).await?;
    let outcome = triage(draft.rating, &response, business);
    if let TriageOutcome::External { url } = &outcome {
        browser.open_external(url);
    }
    log!("[REVIEW] Outcome for business {}: {:?}", business.id, outcome);
    Ok(outcome)
}

/// Where the review form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewFlow {
    Editing,
    AwaitingFeedback { review_id: i64 },
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    Submitted,
    Skipped,
}

impl ReviewFlow {
    pub fn after_review(outcome: &TriageOutcome) -> Self {
        match outcome {
            TriageOutcome::Feedback { review_id } => ReviewFlow::AwaitingFeedback { review_id: *review_id },
            TriageOutcome::External { .. } | TriageOutcome::Complete => ReviewFlow::Complete,
        }
    }

    /// Submitting and skipping end the flow the same way.
    pub fn after_feedback(self, action: FeedbackAction) -> Self {
        match self {
            ReviewFlow::AwaitingFeedback { review_id } => {
                log!("[REVIEW] Feedback for review {}: {:?}", review_id, action);
                ReviewFlow::Complete
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::testing::RecordingBrowser;
    use crate::models::review::Review;
    use std::cell::Cell;

    fn business(review_link: Option<&str>) -> Business {
        Business {
            id: 482,
            business_name: "Joe's Diner".into(),
            google_review_url: review_link.map(str::to_string),
            ..Business::default()
        }
    }

    fn draft(rating: u8) -> ReviewDraft {
        ReviewDraft {
            rating,
            comment: "  ok  ".into(),
            is_anonymous: true,
            ..ReviewDraft::default()
        }
    }

    fn accepted(review_id: i64, rating: u8) -> CreateReviewResponse {
        CreateReviewResponse {
            review: Some(Review { id: review_id, rating, ..Review::default() }),
            should_redirect_externally: rating >= 4,
            should_show_feedback_form: rating <= 3,
            message: None,
        }
    }

    #[tokio::test]
    async fn test_high_ratings_open_external_link() {
        let runtime = create_runtime();
        for rating in [4, 5] {
            let browser = RecordingBrowser::default();
            let in_flight = InFlight::new();
            let outcome = submit_review(
                &draft(rating),
                &business(Some("https://g.page/r/joes")),
                &in_flight,
                &browser,
                |_| async move { Ok::<_, ApiError>(accepted(10, rating)) },
            )
            .await
            .unwrap();

            assert_eq!(outcome, TriageOutcome::External { url: "https://g.page/r/joes".into() });
            assert_eq!(ReviewFlow::after_review(&outcome), ReviewFlow::Complete);
            assert_eq!(*browser.opened.borrow(), vec!["https://g.page/r/joes".to_string()]);
            assert!(!in_flight.is_active());
        }
        runtime.dispose();
    }

    #[tokio::test]
    async fn test_high_rating_falls_back_to_search() {
        let runtime = create_runtime();
        let browser = RecordingBrowser::default();
        // Even if the backend forgets to set its redirect flag.
        let outcome = submit_review(&draft(5), &business(None), &InFlight::new(), &browser, |_| async {
            Ok::<_, ApiError>(CreateReviewResponse::default())
        })
        .await
        .unwrap();

        let expected = "https://www.google.com/search?q=Joe%27s%20Diner%20review".to_string();
        assert_eq!(outcome, TriageOutcome::External { url: expected.clone() });
        assert_eq!(*browser.opened.borrow(), vec![expected]);
        runtime.dispose();
    }

    #[tokio::test]
    async fn test_low_ratings_ask_for_feedback() {
        let runtime = create_runtime();
        for rating in [1, 2, 3] {
            let browser = RecordingBrowser::default();
            let outcome = submit_review(
                &draft(rating),
                &business(Some("https://g.page/r/joes")),
                &InFlight::new(),
                &browser,
                |_| async move { Ok::<_, ApiError>(accepted(77, rating)) },
            )
            .await
            .unwrap();

            assert_eq!(outcome, TriageOutcome::Feedback { review_id: 77 });
            assert!(browser.opened.borrow().is_empty());

            let flow = ReviewFlow::after_review(&outcome);
            assert_eq!(flow, ReviewFlow::AwaitingFeedback { review_id: 77 });
            assert_eq!(flow.after_feedback(FeedbackAction::Submitted), ReviewFlow::Complete);
            assert_eq!(flow.after_feedback(FeedbackAction::Skipped), ReviewFlow::Complete);
        }
        runtime.dispose();
    }

    #[tokio::test]
    async fn test_low_rating_without_review_completes() {
        let runtime = create_runtime();
        let outcome = submit_review(
            &draft(2),
            &business(None),
            &InFlight::new(),
            &RecordingBrowser::default(),
            |_| async { Ok::<_, ApiError>(CreateReviewResponse::default()) },
        )
        .await
        .unwrap();
        assert_eq!(outcome, TriageOutcome::Complete);
        assert_eq!(ReviewFlow::after_review(&outcome), ReviewFlow::Complete);
        runtime.dispose();
    }

    #[tokio::test]
    async fn test_unset_rating_never_reaches_network() {
        let runtime = create_runtime();
        let calls = Cell::new(0);
        let result = submit_review(
            &draft(0),
            &business(None),
            &InFlight::new(),
            &RecordingBrowser::default(),
            |_| {
                calls.set(calls.get() + 1);
                async { Ok::<_, ApiError>(CreateReviewResponse::default()) }
            },
        )
        .await;

        assert_eq!(result, Err(SubmitError::Invalid(ValidationError::MissingRating)));
        assert_eq!(calls.get(), 0);
        runtime.dispose();
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_ignored() {
        let runtime = create_runtime();
        let in_flight = InFlight::new();
        let held = in_flight.try_begin().unwrap();
        let calls = Cell::new(0);

        let result = submit_review(&draft(5), &business(None), &in_flight, &RecordingBrowser::default(), |_| {
            calls.set(calls.get() + 1);
            async { Ok::<_, ApiError>(CreateReviewResponse::default()) }
        })
        .await;

        assert_eq!(result, Err(SubmitError::AlreadySubmitting));
        assert_eq!(calls.get(), 0);
        drop(held);
        assert!(!in_flight.is_active());
        runtime.dispose();
    }

    #[tokio::test]
    async fn test_failure_releases_guard_and_keeps_server_text() {
        let runtime = create_runtime();
        let in_flight = InFlight::new();
        let browser = RecordingBrowser::default();

        let result = submit_review(&draft(5), &business(None), &in_flight, &browser, |_| async {
            Err::<CreateReviewResponse, _>(ApiError::from_status(409, "You have already reviewed this business"))
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.user_message(), "You have already reviewed this business");
        assert!(!in_flight.is_active());
        assert!(browser.opened.borrow().is_empty());
        runtime.dispose();
    }

    #[tokio::test]
    async fn test_request_sent_is_trimmed_and_anonymous() {
        let runtime = create_runtime();
        let sent = std::cell::RefCell::new(None);
        let mut anonymous = draft(3);
        anonymous.customer_name = "Kim".into();

        submit_review(&anonymous, &business(None), &InFlight::new(), &RecordingBrowser::default(), |request| {
            *sent.borrow_mut() = Some(request);
            async { Ok::<_, ApiError>(accepted(5, 3)) }
        })
        .await
        .unwrap();

        let request = sent.into_inner().unwrap();
        assert_eq!(request.comment, "ok");
        assert_eq!(request.customer_name, "");
        assert!(request.is_anonymous);
        runtime.dispose();
    }

    #[test]
    fn test_identity_validation() {
        let mut named = ReviewDraft {
            rating: 4,
            ..ReviewDraft::default()
        };
        assert_eq!(named.validate(), Err(ValidationError::MissingName));

        named.customer_name = "Kim".into();
        assert_eq!(named.validate(), Err(ValidationError::MissingEmail));

        named.customer_email = "kim@localhost".into();
        assert_eq!(named.validate(), Err(ValidationError::InvalidEmail));

        named.customer_email = " kim@example.com ".into();
        let request = named.validate().unwrap();
        assert_eq!(request.customer_email, "kim@example.com");
        assert!(!request.is_anonymous);

        let out_of_range = ReviewDraft { rating: 6, is_anonymous: true, ..ReviewDraft::default() };
        assert_eq!(out_of_range.validate(), Err(ValidationError::RatingOutOfRange));
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.co"));
    }

    #[test]
    fn test_rating_hint() {
        assert_eq!(rating_hint(0), None);
        assert_eq!(rating_hint(3), Some("We'd love your feedback to improve"));
        assert_eq!(rating_hint(4), Some("You'll be redirected to leave a Google review"));
    }
}
