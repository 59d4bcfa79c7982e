use std::any::Any;

use actix_web::error::{BlockingError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use shared::ErrorResponse;

use crate::analysis::decoder::DecodeError;

pub(crate) const INTERNAL_ERROR_MESSAGE: &str =
    "An unexpected error occurred on the server. Please check server logs.";

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Missing 'image' key in JSON payload")]
    MissingField,
    #[error("{0}")]
    InvalidJson(String),
    #[error("Invalid base64 image data format: {0}")]
    InvalidBase64Format(String),
    #[error("Cannot identify image file. Invalid image format or corrupted.")]
    UnrecognizedImageFormat(String),
    #[error("Request body exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AnalyzeError {
    pub fn from_json_error(err: JsonPayloadError) -> Self {
        match err {
            JsonPayloadError::ContentType => {
                AnalyzeError::InvalidJson("Request must be JSON".to_string())
            }
            JsonPayloadError::Overflow { limit }
            | JsonPayloadError::OverflowKnownLength { limit, .. } => {
                AnalyzeError::PayloadTooLarge { limit }
            }
            JsonPayloadError::Deserialize(e) => {
                AnalyzeError::InvalidJson(format!("Invalid JSON payload: {}", e))
            }
            other => AnalyzeError::InvalidJson(format!("Invalid JSON payload: {}", other)),
        }
    }

    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        AnalyzeError::Internal(format!("analysis panicked: {}", message))
    }

    fn client_message(&self) -> String {
        match self {
            AnalyzeError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<DecodeError> for AnalyzeError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::InvalidFormat(detail) => AnalyzeError::InvalidBase64Format(detail),
            DecodeError::UnrecognizedImage(detail) => AnalyzeError::UnrecognizedImageFormat(detail),
        }
    }
}

impl From<BlockingError> for AnalyzeError {
    fn from(err: BlockingError) -> Self {
        AnalyzeError::Internal(format!("analysis task did not complete: {}", err))
    }
}

impl ResponseError for AnalyzeError {
    fn status_code(&self) -> StatusCode {
        match self {
            AnalyzeError::MissingField
            | AnalyzeError::InvalidJson(_)
            | AnalyzeError::InvalidBase64Format(_)
            | AnalyzeError::UnrecognizedImageFormat(_) => StatusCode::BAD_REQUEST,
            AnalyzeError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AnalyzeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AnalyzeError::Internal(detail) = self {
            error!("An unexpected error occurred: {}", detail);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.client_message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: AnalyzeError) -> (StatusCode, ErrorResponse) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn internal_error_hides_detail() {
        let (status, body) =
            body_of(AnalyzeError::Internal("index out of bounds at ycrcb.rs".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, INTERNAL_ERROR_MESSAGE);
    }

    #[actix_web::test]
    async fn decode_errors_are_client_errors() {
        let err = AnalyzeError::from(DecodeError::InvalidFormat("bad padding".into()));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Invalid base64 image data format: bad padding");

        let err = AnalyzeError::from(DecodeError::UnrecognizedImage("unsupported".into()));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body.error,
            "Cannot identify image file. Invalid image format or corrupted."
        );
    }

    #[test]
    fn panic_payload_becomes_internal_detail() {
        let err = AnalyzeError::from_panic(Box::new("index out of bounds"));
        assert!(matches!(&err, AnalyzeError::Internal(d) if d.contains("index out of bounds")));

        let err = AnalyzeError::from_panic(Box::new(format!("bad pixel {}", 7)));
        assert!(matches!(&err, AnalyzeError::Internal(d) if d.contains("bad pixel 7")));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn json_errors_map_to_taxonomy() {
        assert!(matches!(
            AnalyzeError::from_json_error(JsonPayloadError::ContentType),
            AnalyzeError::InvalidJson(msg) if msg == "Request must be JSON"
        ));
        let err = AnalyzeError::from_json_error(JsonPayloadError::Overflow { limit: 10 });
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
