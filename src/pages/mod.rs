pub mod admin_portal;
pub mod business_detail;
pub mod home;
