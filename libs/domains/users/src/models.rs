use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{validate_not_blank, validate_username};

/// Fresh identifier in the 24-character hex form of a MongoDB ObjectId
pub fn new_object_id() -> String {
    ObjectId::new().to_hex()
}

/// Quantities arrive as JSON numbers, so `2.0` is read as `2`; fractions are rejected.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct WholeNumber;

    impl Visitor<'_> for WholeNumber {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a whole number")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
            let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
            if value.fract() == 0.0 && in_range {
                Ok(value as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(value), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeNumber)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Kypseli")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Patission 76")]
    pub road: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Phone {
    /// Label such as `mobile` or `home`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "mobile")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "6900000000")]
    pub number: Option<String>,
}

/// A product line embedded in a user's `products` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductItem {
    #[serde(rename = "_id")]
    #[schema(example = "665f1c2e9b1d8a3f4c2e7a10")]
    pub id: String,
    #[schema(example = "Laptop")]
    pub product: String,
    #[schema(example = 899.99)]
    pub cost: f64,
    #[schema(example = 2)]
    pub quantity: i64,
}

/// Catalog product.
///
/// Documented alongside [`User`]; no endpoint reads or writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(example = "Laptop")]
    pub product: String,
    #[schema(example = 899.99)]
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Stored shape of a user in the `users` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    /// Argon2 PHC string
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default)]
    pub phone: Vec<Phone>,
    #[serde(default)]
    pub products: Vec<ProductItem>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl UserDocument {
    /// Build a new document from validated input and an already hashed password
    pub fn new(input: CreateUser, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: new_object_id(),
            username: input.username,
            password: password_hash,
            name: input.name,
            surname: input.surname,
            email: input.email,
            address: input.address,
            phone: input.phone,
            products: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a profile change. `address` and `phone` are replaced whole.
    pub fn apply_changes(&mut self, changes: UserChanges) {
        self.email = changes.email;
        if let Some(name) = changes.name {
            self.name = Some(name);
        }
        if let Some(surname) = changes.surname {
            self.surname = Some(surname);
        }
        if let Some(password_hash) = changes.password_hash {
            self.password = password_hash;
        }
        if let Some(address) = changes.address {
            self.address = Some(address);
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        self.updated_at = Utc::now();
    }
}

/// A user as returned by the API (never includes the password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(rename = "_id")]
    #[schema(example = "665f1c2e9b1d8a3f4c2e7a01")]
    pub id: String,
    #[schema(example = "jdoe")]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "John")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Doe")]
    pub surname: Option<String>,
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub phone: Vec<Phone>,
    pub products: Vec<ProductItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            username: doc.username,
            name: doc.name,
            surname: doc.surname,
            email: doc.email,
            address: doc.address,
            phone: doc.phone,
            products: doc.products,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Body of `POST /users`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(custom(function = "validate_username"))]
    #[schema(example = "jdoe")]
    pub username: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "s3cret")]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub phone: Vec<Phone>,
}

/// Body of `PATCH /users/{username}`.
///
/// `username` may be repeated but not changed.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[serde(default)]
    pub username: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub phone: Option<Vec<Phone>>,
}

/// A validated profile change with the password already hashed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub email: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub password_hash: Option<String>,
    pub address: Option<Address>,
    pub phone: Option<Vec<Phone>>,
}

impl UserChanges {
    pub fn new(input: UpdateUser, password_hash: Option<String>) -> Self {
        Self {
            email: input.email,
            name: input.name,
            surname: input.surname,
            password_hash,
            address: input.address,
            phone: input.phone,
        }
    }
}

/// A product line in a `POST /users-products` body
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewProductItem {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Laptop")]
    pub product: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    #[schema(example = 899.99)]
    pub cost: f64,
    #[serde(deserialize_with = "whole_number")]
    #[validate(range(min = 0, message = "must not be negative"))]
    #[schema(example = 1)]
    pub quantity: i64,
}

impl NewProductItem {
    /// Assign a fresh identifier
    pub fn into_item(self) -> ProductItem {
        ProductItem {
            id: new_object_id(),
            product: self.product,
            cost: self.cost,
            quantity: self.quantity,
        }
    }
}

/// Body of `POST /users-products`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddProducts {
    #[validate(custom(function = "validate_username"))]
    #[schema(example = "jdoe")]
    pub username: String,
    #[validate(length(min = 1, message = "at least one product is required"), nested)]
    pub products: Vec<NewProductItem>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductQuantity {
    #[serde(rename = "_id")]
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "665f1c2e9b1d8a3f4c2e7a10")]
    pub id: String,
    #[serde(deserialize_with = "whole_number")]
    #[validate(range(min = 0, message = "must not be negative"))]
    #[schema(example = 3)]
    pub quantity: i64,
}

/// Body of `PATCH /users-products/{username}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProductQuantity {
    #[serde(default)]
    pub username: Option<String>,
    #[validate(nested)]
    pub product: ProductQuantity,
}

/// One entry of `GET /users-products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProducts {
    #[schema(example = "jdoe")]
    pub username: String,
    #[serde(default)]
    pub products: Vec<ProductItem>,
}

impl From<&UserDocument> for UserProducts {
    fn from(doc: &UserDocument) -> Self {
        Self {
            username: doc.username.clone(),
            products: doc.products.clone(),
        }
    }
}
