// SPDX-License-Identifier: MPL-2.0
//! Transport-agnostic request/response contract of the upload service.
//!
//! Any HTTP layer can map its multipart request to an [`UploadRequest`] and
//! write a [`BoundaryResponse`] back verbatim:
//!
//! | Status | Body | When |
//! |--------|------|------|
//! | 200 | `{type, lat, lng, accuracy?, confidence?, source, exif?}` | success |
//! | 400 | `{error}` | missing file or failed validation |
//! | 401 | `{error}` | missing or unknown token |
//! | 500 | `{error, details?}` | shape mismatch or internal failure |

mod auth;
mod record;

pub use auth::{AccessTokens, IssuedToken};
pub use record::UploadRecord;

use std::sync::Arc;

use serde_json::{json, Value};

use crate::application::{LocationResolver, ResultPayload};
use crate::domain::error::ProcessingError;
use crate::domain::location::{ImageBlob, LocationResult};

/// Name of the multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

const UNAUTHENTICATED_MESSAGE: &str = "Authentication credentials were not provided.";
const NO_FILE_MESSAGE: &str = "No file provided";
const INVALID_RESULT_MESSAGE: &str = "Invalid result format";

/// The `file` part of a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Size declared by the transport; defaults to the byte count.
    pub declared_size: Option<u64>,
}

impl UploadedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
            declared_size: None,
        }
    }

    #[must_use]
    pub fn into_blob(self) -> ImageBlob {
        let blob = ImageBlob::new(self.bytes, self.content_type).with_file_name(self.name);
        match self.declared_size {
            Some(size) => blob.with_declared_size(size),
            None => blob,
        }
    }
}

/// An upload as seen by the service.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// Raw `Authorization` header value.
    pub authorization: Option<String>,
    pub file: Option<UploadedFile>,
}

/// Status code and JSON body to send back.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryResponse {
    pub status: u16,
    pub body: Value,
}

impl BoundaryResponse {
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "error": message.into() }))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Liveness response; needs no authentication.
#[must_use]
pub fn health() -> BoundaryResponse {
    BoundaryResponse::new(200, json!({ "status": "healthy" }))
}

/// Runs one upload through the resolver.
///
/// `authorized` is decided by the caller's authentication layer.
#[must_use]
pub fn handle_upload(
    resolver: &LocationResolver,
    authorized: bool,
    file: Option<UploadedFile>,
) -> BoundaryResponse {
    match admit(authorized, file) {
        Ok(blob) => respond(resolver.resolve(&blob)),
        Err(response) => response,
    }
}

/// Async variant of [`handle_upload`]; the resolution runs on the blocking
/// pool.
pub async fn handle_upload_async(
    resolver: Arc<LocationResolver>,
    authorized: bool,
    file: Option<UploadedFile>,
) -> BoundaryResponse {
    match admit(authorized, file) {
        Ok(blob) => respond(resolver.resolve_async(blob).await),
        Err(response) => response,
    }
}

fn admit(authorized: bool, file: Option<UploadedFile>) -> Result<ImageBlob, BoundaryResponse> {
    if !authorized {
        return Err(BoundaryResponse::error(401, UNAUTHENTICATED_MESSAGE));
    }
    file.map(UploadedFile::into_blob)
        .ok_or_else(|| BoundaryResponse::error(400, NO_FILE_MESSAGE))
}

/// Maps a resolution outcome to a response.
#[must_use]
pub fn respond(outcome: Result<LocationResult, ProcessingError>) -> BoundaryResponse {
    match outcome {
        Ok(result) => match ResultPayload::from(&result).to_json() {
            Ok(body) => BoundaryResponse::new(200, body),
            Err(err) => BoundaryResponse::error(500, format!("Processing failed: {err}")),
        },
        Err(ProcessingError::InvalidResultShape(details)) => BoundaryResponse::new(
            500,
            json!({ "error": INVALID_RESULT_MESSAGE, "details": details }),
        ),
        Err(err) => BoundaryResponse::error(err.http_status(), err.to_string()),
    }
}

/// Upload endpoint: token gate plus resolver.
pub struct UploadEndpoint {
    resolver: Arc<LocationResolver>,
    tokens: AccessTokens,
}

impl UploadEndpoint {
    #[must_use]
    pub fn new(resolver: Arc<LocationResolver>, tokens: AccessTokens) -> Self {
        Self { resolver, tokens }
    }

    #[must_use]
    pub fn resolver(&self) -> Arc<LocationResolver> {
        Arc::clone(&self.resolver)
    }

    #[must_use]
    pub fn is_authorized(&self, request: &UploadRequest) -> bool {
        self.tokens.authorize(request.authorization.as_deref())
    }

    #[must_use]
    pub fn handle(&self, request: UploadRequest) -> BoundaryResponse {
        let authorized = self.is_authorized(&request);
        handle_upload(&self.resolver, authorized, request.file)
    }

    pub async fn handle_async(&self, request: UploadRequest) -> BoundaryResponse {
        let authorized = self.is_authorized(&request);
        handle_upload_async(Arc::clone(&self.resolver), authorized, request.file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ValidationError;
    use crate::domain::location::EstimateResult;
    use crate::infrastructure::PlaceholderEstimator;
    use crate::test_utils::plain_jpeg;
    use std::time::Duration;

    fn resolver() -> LocationResolver {
        LocationResolver::new(Arc::new(PlaceholderEstimator::new(Duration::ZERO)))
    }

    fn jpeg_upload() -> UploadedFile {
        UploadedFile::new("photo.jpg", "image/jpeg", plain_jpeg())
    }

    #[test]
    fn health_is_healthy() {
        let response = health();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({ "status": "healthy" }));
    }

    #[test]
    fn unauthenticated_is_401() {
        let response = handle_upload(&resolver(), false, Some(jpeg_upload()));
        assert_eq!(response.status, 401);
        assert_eq!(response.body["error"], UNAUTHENTICATED_MESSAGE);
    }

    #[test]
    fn missing_file_is_400() {
        let response = handle_upload(&resolver(), true, None);
        assert_eq!(response.status, 400);
        assert_eq!(response.body["error"], "No file provided");
    }

    #[test]
    fn unsupported_type_is_400_with_message() {
        let file = UploadedFile::new("notes.txt", "text/plain", b"hello".to_vec());
        let response = handle_upload(&resolver(), true, Some(file));
        assert_eq!(response.status, 400);
        assert!(response.body["error"]
            .as_str()
            .is_some_and(|m| m.contains("not allowed")));
    }

    #[test]
    fn oversized_declared_file_is_400() {
        let mut file = jpeg_upload();
        file.declared_size = Some(11 * 1024 * 1024);
        let response = handle_upload(&resolver(), true, Some(file));
        assert_eq!(response.status, 400);
        assert!(response.body["error"]
            .as_str()
            .is_some_and(|m| m.contains("exceeds")));
    }

    #[test]
    fn image_without_gps_returns_estimate() {
        let response = handle_upload(&resolver(), true, Some(jpeg_upload()));
        assert_eq!(response.status, 200);
        assert_eq!(response.body["type"], "ESTIMATE");
        assert_eq!(response.body["source"], "ESTIMATE");
        assert_eq!(response.body["confidence"], 0.0);
        assert_eq!(response.body["lat"], 0.0);
    }

    #[test]
    fn shape_error_is_500_with_details() {
        let response = respond(Err(ProcessingError::InvalidResultShape(vec![
            "lat: expected a number".into(),
        ])));
        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "Invalid result format");
        assert_eq!(response.body["details"][0], "lat: expected a number");
    }

    #[test]
    fn internal_error_is_500_processing_failed() {
        let response = respond(Err(ProcessingError::Internal("disk full".into())));
        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "Processing failed: disk full");
    }

    #[test]
    fn validation_error_message_passes_through() {
        let response = respond(Err(ProcessingError::Invalid(
            ValidationError::CorruptOrUnknownFormat,
        )));
        assert_eq!(response.status, 400);
        assert_eq!(
            response.body["error"],
            "Invalid file format or corrupted file"
        );
    }

    #[test]
    fn estimate_error_is_not_exposed() {
        let response = respond(Ok(LocationResult::Estimate(EstimateResult::unavailable(
            "model offline",
        ))));
        assert!(response.body.get("error").is_none());
    }

    #[test]
    fn endpoint_checks_token() {
        let mut tokens = AccessTokens::default();
        let issued = tokens.issue().expect("random source");
        let endpoint = UploadEndpoint::new(Arc::new(resolver()), tokens);

        let denied = endpoint.handle(UploadRequest {
            authorization: Some("Token nope".into()),
            file: Some(jpeg_upload()),
        });
        assert_eq!(denied.status, 401);

        let allowed = endpoint.handle(UploadRequest {
            authorization: Some(format!("Token {}", issued.key)),
            file: Some(jpeg_upload()),
        });
        assert!(allowed.is_success());
    }

    #[tokio::test]
    async fn async_endpoint_matches_sync() {
        let mut tokens = AccessTokens::default();
        let issued = tokens.issue().expect("random source");
        let endpoint = UploadEndpoint::new(Arc::new(resolver()), tokens);

        let response = endpoint
            .handle_async(UploadRequest {
                authorization: Some(format!("Token {}", issued.key)),
                file: Some(jpeg_upload()),
            })
            .await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["type"], "ESTIMATE");
    }
}
