use super::*;
use serde_json::json;

#[test]
fn property_decodes_full_record() {
    let property: Property = serde_json::from_value(json!({
        "id": 7,
        "address": "Calle Mayor 1",
        "property_type": "flat",
        "rooms": 3,
        "m2": 84.5,
        "purchase_price": 210000
    }))
    .unwrap();
    assert_eq!(property.id, 7);
    assert_eq!(property.address, "Calle Mayor 1");
    assert_eq!(property.property_type.as_deref(), Some("flat"));
    assert_eq!(property.rooms, Some(3));
    assert_eq!(property.m2, Some(84.5));
    assert_eq!(property.purchase_price, Some(210_000.0));
}

#[test]
fn property_missing_optional_fields_default() {
    let property: Property = serde_json::from_value(json!({ "id": 1, "purchase_price": 100000 })).unwrap();
    assert_eq!(property.address, "");
    assert!(property.property_type.is_none());
    assert!(property.rooms.is_none());
    assert!(property.m2.is_none());
}

#[test]
fn property_null_price_is_none() {
    let property: Property = serde_json::from_value(json!({ "id": 1, "address": "x", "purchase_price": null })).unwrap();
    assert!(property.purchase_price.is_none());
}

#[test]
fn login_response_reads_access_token() {
    let resp = LoginResponse::from_value(&json!({ "access_token": "abc", "token_type": "bearer" }));
    assert_eq!(resp.access_token.as_deref(), Some("abc"));
}

#[test]
fn login_response_ignores_unexpected_types_in_other_fields() {
    let resp = LoginResponse::from_value(&json!({
        "access_token": "tok",
        "token_type": 1,
        "expires_in": "soon",
        "user": null
    }));
    assert_eq!(resp.access_token.as_deref(), Some("tok"));
}

#[test]
fn login_response_without_token_field() {
    let resp = LoginResponse::from_value(&json!({ "message": "ok" }));
    assert!(resp.access_token.is_none());
}

#[test]
fn login_response_non_object_body_has_no_token() {
    assert!(LoginResponse::from_value(&serde_json::Value::Null).access_token.is_none());
    assert!(LoginResponse::from_value(&json!("ok")).access_token.is_none());
    assert!(LoginResponse::from_value(&json!({ "access_token": 42 })).access_token.is_none());
}

#[test]
fn register_request_serializes_email_and_password() {
    let body = serde_json::to_value(RegisterRequest { email: "a@b.test".into(), password: "pw".into() }).unwrap();
    assert_eq!(body, json!({ "email": "a@b.test", "password": "pw" }));
}
