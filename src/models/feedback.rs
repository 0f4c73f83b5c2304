// src/models/feedback.rs
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::null_as_default;

/// Categorical sub-rating on the feedback form.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubRating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SubRating {
    pub const ALL: [SubRating; 4] = [
        SubRating::Poor,
        SubRating::Fair,
        SubRating::Good,
        SubRating::Excellent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubRating::Poor => "poor",
            SubRating::Fair => "fair",
            SubRating::Good => "good",
            SubRating::Excellent => "excellent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubRating::Poor => "Poor",
            SubRating::Fair => "Fair",
            SubRating::Good => "Good",
            SubRating::Excellent => "Excellent",
        }
    }

    /// Parses a `<select>` value; the empty placeholder maps to `None`.
    pub fn from_select(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

/// Body of `POST /api/feedback/review/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub feedback_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_quality: Option<SubRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_behavior: Option<SubRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanliness: Option<SubRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_for_money: Option<SubRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_experience: Option<SubRating>,
    pub suggestions: String,
    pub wants_followup: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl FeedbackRequest {
    /// Drops contact details unless a follow-up was requested and trims free text.
    pub fn normalized(mut self) -> Self {
        self.feedback_text = self.feedback_text.trim().to_string();
        self.suggestions = self.suggestions.trim().to_string();
        if self.wants_followup {
            self.contact_email = self.contact_email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
            self.contact_phone = self.contact_phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        } else {
            self.contact_email = None;
            self.contact_phone = None;
        }
        self
    }
}

// Older records store unset sub-ratings as "" rather than null.
fn lenient_sub_rating<'de, D>(deserializer: D) -> Result<Option<SubRating>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(SubRating::from_select))
}

/// Feedback as returned to business owners.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i64,
    #[serde(default)]
    pub review_id: Option<i64>,
    #[serde(default)]
    pub feedback_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_sub_rating")]
    pub service_quality: Option<SubRating>,
    #[serde(default, deserialize_with = "lenient_sub_rating")]
    pub staff_behavior: Option<SubRating>,
    #[serde(default, deserialize_with = "lenient_sub_rating")]
    pub cleanliness: Option<SubRating>,
    #[serde(default, deserialize_with = "lenient_sub_rating")]
    pub value_for_money: Option<SubRating>,
    #[serde(default, deserialize_with = "lenient_sub_rating")]
    pub overall_experience: Option<SubRating>,
    #[serde(default)]
    pub suggestions: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wants_followup: bool,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Feedback {
    pub fn sub_ratings(&self) -> Vec<(&'static str, SubRating)> {
        [
            ("Service quality", self.service_quality),
            ("Staff behavior", self.staff_behavior),
            ("Cleanliness", self.cleanliness),
            ("Value for money", self.value_for_money),
            ("Overall experience", self.overall_experience),
        ]
        .into_iter()
        .filter_map(|(label, rating)| rating.map(|r| (label, r)))
        .collect()
    }
}
