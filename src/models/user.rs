// src/models/user.rs
use serde::{Deserialize, Serialize};

use crate::models::null_as_default;

/// Role claim issued by the backend for the signed-in account.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Customer,
    Admin,
    #[serde(other)]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub authenticated: bool,
}

/// Role requested from the identity provider when starting a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRole {
    Customer,
    Admin,
}

impl LoginRole {
    pub fn as_query(&self) -> &'static str {
        match self {
            LoginRole::Customer => "customer",
            LoginRole::Admin => "admin",
        }
    }
}
