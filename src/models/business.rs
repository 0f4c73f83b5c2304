// src/models/business.rs
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::null_as_default;
use crate::models::user::User;
use crate::routing;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub business_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub google_review_url: Option<String>,
    // The payload is only fetched through the image endpoint; we just track whether one exists.
    #[serde(
        rename = "imageData",
        default,
        deserialize_with = "deserialize_present",
        skip_serializing
    )]
    pub has_image: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_reviews: u32,
    #[serde(default)]
    pub owner: Option<User>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<IgnoredAny> = Option::deserialize(deserializer)?;
    Ok(value.is_some())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Business {
    /// Letter shown in place of a missing image.
    pub fn initial(&self) -> String {
        self.business_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn slug(&self) -> String {
        routing::slugify(&self.business_name)
    }

    /// Canonical detail page path. Names that slugify to nothing fall back to the numeric id.
    pub fn detail_path(&self) -> String {
        let slug = self.slug();
        if slug.is_empty() {
            routing::detail_path(&self.id.to_string())
        } else {
            routing::detail_path(&slug)
        }
    }

    pub fn phone(&self) -> Option<&str> {
        non_blank(&self.phone_number)
    }

    pub fn external_review_link(&self) -> Option<&str> {
        non_blank(&self.google_review_url)
    }

    pub fn social_links(&self) -> Vec<(&'static str, String)> {
        [
            ("Website", &self.website_url),
            ("Facebook", &self.facebook_url),
            ("Instagram", &self.instagram_url),
            ("Twitter", &self.twitter_url),
            ("LinkedIn", &self.linkedin_url),
        ]
        .into_iter()
        .filter_map(|(label, url)| non_blank(url).map(|u| (label, u.to_string())))
        .collect()
    }

    pub fn review_count_label(&self) -> String {
        if self.total_reviews == 1 {
            "1 review".to_string()
        } else {
            format!("{} reviews", self.total_reviews)
        }
    }
}

/// Editable fields of a listing, sent as the `profile` part of the multipart body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub business_name: String,
    pub phone_number: String,
    pub address: String,
    pub description: String,
    pub website_url: String,
    pub facebook_url: String,
    pub instagram_url: String,
    pub twitter_url: String,
    pub linkedin_url: String,
    pub google_review_url: String,
}

impl From<&Business> for BusinessProfile {
    fn from(business: &Business) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            business_name: business.business_name.clone(),
            phone_number: text(&business.phone_number),
            address: text(&business.address),
            description: text(&business.description),
            website_url: text(&business.website_url),
            facebook_url: text(&business.facebook_url),
            instagram_url: text(&business.instagram_url),
            twitter_url: text(&business.twitter_url),
            linkedin_url: text(&business.linkedin_url),
            google_review_url: text(&business.google_review_url),
        }
    }
}

impl BusinessProfile {
    pub fn validate(&self) -> Result<(), String> {
        if self.business_name.trim().is_empty() {
            return Err("Business name is required".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Business {
        serde_json::from_str(
            r#"{
                "id": 482,
                "businessName": "Joe's Diner",
                "phoneNumber": " ",
                "googleReviewUrl": "https://g.page/r/joes",
                "websiteUrl": "https://joes.example",
                "instagramUrl": "",
                "imageData": "iVBORw0KGgo=",
                "averageRating": 4.5,
                "totalReviews": 1
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_business_from_wire() {
        let business = sample();
        assert!(business.has_image);
        assert_eq!(business.phone(), None);
        assert_eq!(business.external_review_link(), Some("https://g.page/r/joes"));
        assert_eq!(business.review_count_label(), "1 review");
        assert_eq!(
            business.social_links(),
            vec![("Website", "https://joes.example".to_string())]
        );
    }

    #[test]
    fn test_missing_or_null_image() {
        let none: Business = serde_json::from_str(r#"{"id":1,"businessName":"a"}"#).unwrap();
        assert!(!none.has_image);
        let null: Business =
            serde_json::from_str(r#"{"id":1,"businessName":"a","imageData":null}"#).unwrap();
        assert!(!null.has_image);
    }

    #[test]
    fn test_detail_path_and_initial() {
        let business = sample();
        assert_eq!(business.detail_path(), "/business/joes-diner");
        assert_eq!(business.initial(), "J");

        let unnamed = Business {
            id: 9,
            business_name: "éé !!".to_string(),
            ..Business::default()
        };
        assert_eq!(unnamed.detail_path(), "/business/9");
    }

    #[test]
    fn test_profile_roundtrips_editable_fields() {
        let profile = BusinessProfile::from(&sample());
        assert_eq!(profile.business_name, "Joe's Diner");
        assert_eq!(profile.google_review_url, "https://g.page/r/joes");
        assert_eq!(profile.address, "");
        assert!(profile.validate().is_ok());

        let blank = BusinessProfile {
            business_name: "  ".into(),
            ..BusinessProfile::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_null_numbers_read_as_zero() {
        let list: Vec<Business> = serde_json::from_str(
            r#"[
                {"id":1,"businessName":"New Place","averageRating":null,"totalReviews":0},
                {"id":2,"businessName":null,"averageRating":3.0,"totalReviews":null}
            ]"#,
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].average_rating, 0.0);
        assert_eq!(list[0].review_count_label(), "0 reviews");
        assert_eq!(list[1].business_name, "");
        assert_eq!(list[1].total_reviews, 0);
    }
}
