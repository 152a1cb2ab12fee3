//! JSON body extractor that runs `validator` rules before the handler.

use crate::errors::AppError;
use crate::validation::validate;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserialize and validate a JSON body.
///
/// Both a body that cannot be deserialized (syntax error, missing required
/// field, wrong content type) and one that fails validation are answered
/// with a 400 failure envelope.
///
/// ```ignore
/// async fn create_user(ValidatedJson(input): ValidatedJson<CreateUser>) -> impl IntoResponse {
///     // `input` passed every #[validate(...)] rule
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::from(rejection).into_response())?;

        validate(&data).map_err(|report| AppError::Validation(report).into_response())?;

        Ok(ValidatedJson(data))
    }
}
