//! Query-string extractor with validation through the `validator` crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Query-string extractor that runs `Validate::validate` after deserializing.
///
/// ```ignore
/// async fn list(ValidatedQuery(page): ValidatedQuery<PaginationQuery>) -> String {
///     format!("page {}", page.page_number)
/// }
/// ```
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state).await?;
        data.validate()?;
        Ok(ValidatedQuery(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Paging {
        #[validate(range(min = 1))]
        #[serde(default = "one")]
        page_number: u64,
    }

    fn one() -> u64 {
        1
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            get(|ValidatedQuery(p): ValidatedQuery<Paging>| async move { p.page_number.to_string() }),
        )
    }

    async fn status_for(uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn accepts_valid_and_default_values() {
        assert_eq!(status_for("/?pageNumber=3").await, StatusCode::OK);
        assert_eq!(status_for("/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn rejects_out_of_range_values() {
        assert_eq!(status_for("/?pageNumber=0").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_unparsable_values() {
        assert_eq!(status_for("/?pageNumber=abc").await, StatusCode::BAD_REQUEST);
    }
}
