use leptos::*;
use leptos_router::A;

use crate::api::ApiClient;
use crate::components::star_rating::StarRating;
use crate::models::business::Business;

/// Listing image, or the name's first letter when there is none.
#[component]
pub fn BusinessImage(business: Business, #[prop(default = "business-image")] class: &'static str) -> impl IntoView {
    if business.has_image {
        let src = expect_context::<ApiClient>().image_url(business.id);
        view! { <img class=class src=src alt=business.business_name.clone() /> }.into_view()
    } else {
        view! { <div class=format!("{class} business-initial")>{business.initial()}</div> }.into_view()
    }
}

#[component]
pub fn BusinessCard(business: Business) -> impl IntoView {
    let href = business.detail_path();
    let rating = business.average_rating;
    let reviews = business.review_count_label();
    let address = business.address.clone().filter(|a| !a.trim().is_empty());
    let name = business.business_name.clone();

    view! {
        <A href=href class="business-card">
            <BusinessImage business=business />
            <div class="business-card-body">
                <h3>{name}</h3>
                {address.map(|a| view! { <p class="muted">{a}</p> })}
                <div class="business-card-rating">
                    <StarRating rating=rating size=16 show_value=true />
                    <span class="muted">{reviews}</span>
                </div>
            </div>
        </A>
    }
}
