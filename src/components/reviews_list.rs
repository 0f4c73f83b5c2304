use leptos::*;

use crate::components::review_card::ReviewCard;
use crate::models::review::Review;

#[component]
pub fn ReviewsList(reviews: Vec<Review>) -> impl IntoView {
    if reviews.is_empty() {
        return view! {
            <p class="empty-state">{ "No reviews yet. Be the first to review!" }</p>
        }
        .into_view();
    }

    view! {
        <div class="reviews-list">
            <h3>{format!("Customer Reviews ({})", reviews.len())}</h3>
            {reviews
                .into_iter()
                .map(|review| view! { <ReviewCard review=review /> })
                .collect_view()}
        </div>
    }
    .into_view()
}
