//! Wire DTOs for the portfolio backend.
//!
//! DESIGN
//! ======
//! Optional fields default when absent so partially populated records from
//! the backend still decode; the client treats them as a read-only cache.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A real-estate asset record as returned by `GET /properties`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Backend identifier.
    pub id: i64,
    /// Street address shown as the property title.
    #[serde(default)]
    pub address: String,
    /// Free-form type label (e.g. `"flat"`, `"house"`).
    #[serde(default)]
    pub property_type: Option<String>,
    /// Number of rooms.
    #[serde(default)]
    pub rooms: Option<u32>,
    /// Floor area in square metres.
    #[serde(default)]
    pub m2: Option<f64>,
    /// Purchase price in euros.
    #[serde(default)]
    pub purchase_price: Option<f64>,
}

/// Body of a `POST /auth/login` success response. Only the token is read;
/// any other fields the backend sends are ignored whatever their type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

impl LoginResponse {
    /// A body that is not an object with a string `access_token` yields a
    /// response without a token.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        let access_token = value
            .get("access_token")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned);
        Self { access_token }
    }
}

/// Body of a `POST /auth/register` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}
