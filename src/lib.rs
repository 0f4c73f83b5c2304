pub mod api;
pub mod app;
pub mod browser;
pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod routing;
pub mod session;
pub mod triage;
pub mod utils;
