use leptos::*;

use crate::components::star_rating::StarRating;
use crate::models::review::Review;

pub fn rating_label(rating: u8) -> String {
    format!("{rating}/5")
}

#[component]
pub fn ReviewCard(review: Review) -> impl IntoView {
    let rating = f64::from(review.rating);
    let rating_text = rating_label(review.rating);
    let anonymous = review.is_anonymous;
    let name = review.display_name();
    let date = review.display_date();
    let comment = review.comment_text().map(str::to_string);

    view! {
        <article class="review-card">
            <header class="review-card-header">
                <div>
                    <p class="review-author">
                        {name}
                        {anonymous.then(|| view! { <span class="badge">{ "Anonymous Review" }</span> })}
                    </p>
                    <p class="review-date">{date}</p>
                </div>
                <div class="review-card-rating">
                    <StarRating rating=rating size=16 />
                    <span class="review-rating-value">{rating_text}</span>
                </div>
            </header>
            {comment.map(|text| view! { <p class="review-comment">{text}</p> })}
        </article>
    }
}
