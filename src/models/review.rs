// src/models/review.rs
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::null_as_default;
use crate::models::user::User;

const ANONYMOUS: &str = "Anonymous Customer";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    #[serde(default)]
    pub business_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_anonymous: bool,
    #[serde(default)]
    pub customer: Option<User>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, rename = "redirectedToGoogle", deserialize_with = "null_as_default")]
    pub redirected_externally: bool,
}

fn email_handle(email: &str) -> Option<String> {
    let local = email.split('@').next()?.trim();
    let mut chars = local.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

impl Review {
    /// Name shown on the review card, never exposing more than the email's local part.
    pub fn display_name(&self) -> String {
        if self.is_anonymous {
            return ANONYMOUS.to_string();
        }
        if let Some(name) = self.customer_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        if let Some(customer) = &self.customer {
            if !customer.name.trim().is_empty() {
                return customer.name.clone();
            }
            if let Some(handle) = customer.email.as_deref().and_then(email_handle) {
                return handle;
            }
        }
        self.customer_email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .and_then(email_handle)
            .unwrap_or_else(|| ANONYMOUS.to_string())
    }

    pub fn display_date(&self) -> String {
        match self.created_at.as_deref() {
            None | Some("") => "Date not available".to_string(),
            Some(raw) => format_timestamp(raw).unwrap_or_else(|| raw.to_string()),
        }
    }

    pub fn comment_text(&self) -> Option<&str> {
        self.comment.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

fn format_timestamp(raw: &str) -> Option<String> {
    let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))?;
    Some(parsed.format("%b %-d, %Y, %I:%M %p").to_string())
}

/// Body of `POST /api/reviews/business/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub rating: u8,
    pub comment: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub is_anonymous: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewResponse {
    #[serde(default)]
    pub review: Option<Review>,
    #[serde(default, rename = "shouldRedirectToGoogle")]
    pub should_redirect_externally: bool,
    #[serde(default)]
    pub should_show_feedback_form: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    #[test]
    fn test_display_name_precedence() {
        let mut review = Review {
            id: 1,
            rating: 2,
            customer_name: Some("  ".into()),
            customer_email: Some("dana.k@example.com".into()),
            ..Review::default()
        };
        assert_eq!(review.display_name(), "Dana.k");

        review.customer = Some(User {
            id: 7,
            name: String::new(),
            email: Some("lee@example.com".into()),
            role: Role::Customer,
        });
        assert_eq!(review.display_name(), "Lee");

        review.customer_name = Some("Maria".into());
        assert_eq!(review.display_name(), "Maria");

        review.is_anonymous = true;
        assert_eq!(review.display_name(), "Anonymous Customer");

        let bare = Review { id: 2, rating: 5, ..Review::default() };
        assert_eq!(bare.display_name(), "Anonymous Customer");
    }

    #[test]
    fn test_display_date() {
        let mut review = Review { id: 1, rating: 4, ..Review::default() };
        assert_eq!(review.display_date(), "Date not available");

        review.created_at = Some("2025-09-15T20:28:51".into());
        assert_eq!(review.display_date(), "Sep 15, 2025, 08:28 PM");

        review.created_at = Some("2025-01-02T09:05:00.123456".into());
        assert_eq!(review.display_date(), "Jan 2, 2025, 09:05 AM");

        review.created_at = Some("yesterday".into());
        assert_eq!(review.display_date(), "yesterday");
    }

    #[test]
    fn test_create_response_flags() {
        let response: CreateReviewResponse = serde_json::from_str(
            r#"{"review":{"id":31,"rating":2},"shouldRedirectToGoogle":false,"shouldShowFeedbackForm":true}"#,
        )
        .unwrap();
        assert!(response.should_show_feedback_form);
        assert!(!response.should_redirect_externally);
        assert_eq!(response.review.map(|r| r.id), Some(31));
    }

    #[test]
    fn test_request_wire_names() {
        let request = CreateReviewRequest {
            rating: 5,
            comment: "Great".into(),
            customer_name: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            is_anonymous: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["isAnonymous"], true);
        assert_eq!(json["customerEmail"], "");
        assert_eq!(json["rating"], 5);
    }

    #[test]
    fn test_null_flags_read_as_false() {
        let review: Review = serde_json::from_str(
            r#"{"id":5,"rating":null,"isAnonymous":null,"redirectedToGoogle":null,"customerName":"Dee"}"#,
        )
        .unwrap();
        assert_eq!(review.rating, 0);
        assert!(!review.is_anonymous);
        assert!(!review.redirected_externally);
        assert_eq!(review.display_name(), "Dee");
    }
}
