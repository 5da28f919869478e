//! Custom Axum extractors

use axum::extract::{Form, FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{FormFields, ValidationError};

/// Numeric `{id}` path segment.
///
/// Anything that is not an integer is a 404, the same as an unknown id.
pub struct EntityId(pub i64);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_owned();
        let not_found = || ApiError::NotFound {
            resource: "page",
            id: path.clone(),
        };

        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found())?;

        raw.parse::<i64>().map(Self).map_err(|_| not_found())
    }
}

/// Urlencoded form body, repeated keys preserved
pub struct SubmittedForm(pub FormFields);

impl<S> FromRequest<S> for SubmittedForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs): Form<Vec<(String, String)>> = Form::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "form",
                    reason: rejection.body_text(),
                })
            })?;

        Ok(Self(FormFields::new(pairs)))
    }
}
