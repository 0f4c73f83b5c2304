//! Typed wrappers around the ReviewGate REST backend.
//!
//! Every call carries the session cookie. Non-2xx responses become
//! [`ApiError::Status`] with the server's message extracted from the body.
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::logging::{error, log};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, File, FormData, RequestCredentials};

use crate::error::ApiError;
use crate::models::business::{Business, BusinessProfile};
use crate::models::feedback::{Feedback, FeedbackRequest};
use crate::models::review::{CreateReviewRequest, CreateReviewResponse, Review};
use crate::models::user::{AuthStatus, LoginRole, User};
use crate::routing::BusinessRef;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        Request::get(&self.url(path)).credentials(RequestCredentials::Include)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        Request::post(&self.url(path)).credentials(RequestCredentials::Include)
    }

    fn put(&self, path: &str) -> RequestBuilder {
        Request::put(&self.url(path)).credentials(RequestCredentials::Include)
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        Request::delete(&self.url(path)).credentials(RequestCredentials::Include)
    }

    pub fn image_url(&self, business_id: i64) -> String {
        self.url(&format!("/api/businesses/{business_id}/image"))
    }

    /// Where the browser goes to start the OAuth hand-off.
    pub fn login_url(&self, role: LoginRole) -> String {
        self.url(&format!("/oauth2/authorization/google?role={}", role.as_query()))
    }

    // Businesses

    pub async fn list_businesses(&self) -> Result<Vec<Business>, ApiError> {
        fetch_json(self.get("/api/businesses")).await
    }

    pub async fn search_businesses(&self, name: &str) -> Result<Vec<Business>, ApiError> {
        let path = format!("/api/businesses/search?name={}", urlencoding::encode(name));
        fetch_json(self.get(&path)).await
    }

    pub async fn business_by_id(&self, id: i64) -> Result<Business, ApiError> {
        fetch_json(self.get(&format!("/api/businesses/{id}"))).await
    }

    pub async fn business_by_slug(&self, slug: &str) -> Result<Business, ApiError> {
        let path = format!("/api/businesses/name/{}", urlencoding::encode(slug));
        fetch_json(self.get(&path)).await
    }

    pub async fn resolve_business(&self, target: &BusinessRef) -> Result<Business, ApiError> {
        match target {
            BusinessRef::Id(id) => self.business_by_id(*id).await,
            BusinessRef::Slug(slug) => self.business_by_slug(slug).await,
        }
    }

    // Owner-scoped listings

    pub async fn my_businesses(&self) -> Result<Vec<Business>, ApiError> {
        fetch_json(self.get("/api/admin/businesses/my-businesses")).await
    }

    pub async fn create_business(
        &self,
        profile: &BusinessProfile,
        image: Option<&File>,
    ) -> Result<(), ApiError> {
        let form = profile_form(profile, image)?;
        let request = self.post("/api/admin/businesses").body(form)?;
        log!("[API] Creating business {:?}", profile.business_name);
        expect_success(request.send().await?).await.map(drop)
    }

    pub async fn update_business(
        &self,
        id: i64,
        profile: &BusinessProfile,
        image: Option<&File>,
    ) -> Result<(), ApiError> {
        let form = profile_form(profile, image)?;
        let request = self.put(&format!("/api/admin/businesses/{id}")).body(form)?;
        log!("[API] Updating business {}", id);
        expect_success(request.send().await?).await.map(drop)
    }

    pub async fn delete_business(&self, id: i64) -> Result<(), ApiError> {
        log!("[API] Deleting business {}", id);
        let response = self.delete(&format!("/api/admin/businesses/{id}")).send().await?;
        expect_success(response).await.map(drop)
    }

    // Reviews

    pub async fn reviews_for_business(&self, business_id: i64) -> Result<Vec<Review>, ApiError> {
        fetch_json(self.get(&format!("/api/reviews/business/{business_id}"))).await
    }

    pub async fn has_reviewed(&self, business_id: i64) -> Result<bool, ApiError> {
        fetch_json(self.get(&format!("/api/reviews/check/{business_id}"))).await
    }

    pub async fn create_review(
        &self,
        business_id: i64,
        request: &CreateReviewRequest,
    ) -> Result<CreateReviewResponse, ApiError> {
        send_json(self.post(&format!("/api/reviews/business/{business_id}")), request).await
    }

    pub async fn owner_reviews(&self, business_id: i64) -> Result<Vec<Review>, ApiError> {
        fetch_json(self.get(&format!("/api/admin/reviews/business/{business_id}"))).await
    }

    // Feedback

    pub async fn create_feedback(
        &self,
        review_id: i64,
        request: &FeedbackRequest,
    ) -> Result<(), ApiError> {
        let request = self
            .post(&format!("/api/feedback/review/{review_id}"))
            .json(request)?;
        expect_success(request.send().await?).await.map(drop)
    }

    /// `None` when the review has no feedback attached.
    pub async fn feedback_for_review(&self, review_id: i64) -> Result<Option<Feedback>, ApiError> {
        match fetch_json(self.get(&format!("/api/feedback/review/{review_id}"))).await {
            Ok(feedback) => Ok(Some(feedback)),
            Err(ApiError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // Session

    pub async fn auth_status(&self) -> Result<AuthStatus, ApiError> {
        fetch_json(self.get("/api/auth/status")).await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        fetch_json(self.get("/api/auth/user")).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .post("/logout")
            .header("Content-Type", "application/json")
            .send()
            .await?;
        expect_success(response).await.map(drop)
    }
}

async fn expect_success(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_status(status, &body);
    error!("[API] {} {} -> {}", response.url(), status, err);
    Err(err)
}

async fn fetch_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    let response = expect_success(builder.send().await?).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn send_json<B, T>(builder: RequestBuilder, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = expect_success(builder.json(body)?.send().await?).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Transport(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Multipart body for listing create/update: a JSON `profile` part and an optional `image` part.
fn profile_form(profile: &BusinessProfile, image: Option<&File>) -> Result<FormData, ApiError> {
    let json = serde_json::to_string(profile).map_err(|e| ApiError::Decode(e.to_string()))?;
    let parts = js_sys::Array::of1(&JsValue::from_str(&json));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;

    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob("profile", &blob).map_err(js_error)?;
    if let Some(file) = image {
        form.append_with_blob_and_filename("image", file, &file.name())
            .map_err(js_error)?;
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_built_from_base() {
        let api = ApiClient::new("https://api.reviewgate.io/");
        assert_eq!(api.base_url(), "https://api.reviewgate.io");
        assert_eq!(api.image_url(12), "https://api.reviewgate.io/api/businesses/12/image");
        assert_eq!(
            api.login_url(LoginRole::Admin),
            "https://api.reviewgate.io/oauth2/authorization/google?role=admin"
        );
        assert_eq!(
            api.login_url(LoginRole::Customer),
            "https://api.reviewgate.io/oauth2/authorization/google?role=customer"
        );
    }
}
