//! Field rules shared by the request bodies, and the entry point that runs them.

use std::borrow::Cow;
use validator::{Validate, ValidationError};

pub use axum_helpers::ValidationReport;

/// Check `input` against its `#[validate]` rules.
///
/// ```
/// use domain_users::{models::AddProducts, validation};
///
/// let body: AddProducts =
///     serde_json::from_str(r#"{"username":"jdoe","products":[]}"#).unwrap();
/// let report = validation::validate(&body).unwrap_err();
/// assert!(report.reasons("products").is_some());
/// ```
pub fn validate<T: Validate>(input: &T) -> Result<(), ValidationReport> {
    axum_helpers::validate(input)
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Usernames address users in URL paths, so they must be a single,
/// non-empty path segment.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(invalid("required", "must not be empty"));
    }
    if username.contains('/') || username.chars().any(char::is_whitespace) {
        return Err(invalid(
            "invalid_username",
            "must not contain '/' or whitespace",
        ));
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddProducts, CreateUser, UpdateProductQuantity, UpdateUser};
    use serde_json::json;

    fn parse<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("test30").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username("a/b").is_err());
        assert!(validate_username("john doe").is_err());
    }

    #[test]
    fn test_create_user_valid() {
        let input: CreateUser = parse(json!({
            "username": "test30",
            "password": "12345",
            "email": "test30@aueb.gr",
            "phone": [{ "type": "mobile", "number": "69" }]
        }));
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn test_create_user_reports_each_bad_field() {
        let input: CreateUser = parse(json!({
            "username": "",
            "password": "",
            "email": "not-an-email"
        }));
        let report = validate(&input).unwrap_err();
        assert_eq!(report.reasons("username"), Some(&["must not be empty".to_string()][..]));
        assert_eq!(report.reasons("password"), Some(&["must not be empty".to_string()][..]));
        assert_eq!(
            report.reasons("email"),
            Some(&["must be a valid email address".to_string()][..])
        );
    }

    #[test]
    fn test_update_user_password_only_checked_when_present() {
        let without: UpdateUser = parse(json!({ "email": "a@b.gr" }));
        assert!(validate(&without).is_ok());

        let empty: UpdateUser = parse(json!({ "email": "a@b.gr", "password": "" }));
        assert!(validate(&empty).unwrap_err().reasons("password").is_some());
    }

    #[test]
    fn test_add_products_rules() {
        let empty: AddProducts = parse(json!({ "username": "jdoe", "products": [] }));
        assert_eq!(
            validate(&empty).unwrap_err().reasons("products"),
            Some(&["at least one product is required".to_string()][..])
        );

        let negative: AddProducts = parse(json!({
            "username": "jdoe",
            "products": [
                { "product": "Laptop", "cost": 10.0, "quantity": 1 },
                { "product": " ", "cost": -1.0, "quantity": -2 }
            ]
        }));
        let report = validate(&negative).unwrap_err();
        assert!(report.reasons("products[0].cost").is_none());
        assert!(report.reasons("products[1].product").is_some());
        assert!(report.reasons("products[1].cost").is_some());
        assert!(report.reasons("products[1].quantity").is_some());
    }

    #[test]
    fn test_quantity_update_rejects_negative() {
        let body: UpdateProductQuantity =
            parse(json!({ "product": { "_id": "abc", "quantity": -1 } }));
        assert!(validate(&body).unwrap_err().reasons("product.quantity").is_some());
    }
}
