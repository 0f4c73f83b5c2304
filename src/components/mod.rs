pub mod business_card;
pub mod business_form;
pub mod feedback_form;
pub mod navbar;
pub mod protected_route;
pub mod review_card;
pub mod review_form;
pub mod reviews_list;
pub mod star_rating;
pub mod status;
