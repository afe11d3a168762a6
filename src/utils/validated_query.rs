use std::error::Error;

use axum::{
    async_trait,
    extract::{FromRequest, Query, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::app_error::AppError;

/// Query string extractor that also runs the payload's `validator` rules.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request(req, state)
            .await
            .map_err(|e| match e.source() {
                Some(source) => AppError::InvalidQuery(source.to_string()),
                None => AppError::InvalidQuery(e.body_text()),
            })?;

        data.validate()
            .map_err(|e| AppError::InvalidQuery(e.to_string()))?;

        Ok(ValidatedQuery(data))
    }
}
