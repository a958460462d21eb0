//! use csrkit::error::CsrKitError;

use serde_json::Value;
use thiserror::Error;

/// Represents errors that can occur while parsing, generating or matching CSRs.
///
/// Every failure is reported synchronously at the point where it happens; nothing
/// in this crate retries.
#[derive(Debug, Error, Clone)]
pub enum CsrKitError {
    /// Malformed PEM or DER structure.
    #[error("Failed to parse CSR: {0}")]
    ParseError(String),

    /// The request's self-signature does not verify against its own public key.
    #[error("Improperly signed CSR: {0}")]
    SignatureInvalid(String),

    /// Neither a subject CN nor a DNS subjectAltName is present.
    #[error("CSR must have a CN and/or subjectAltName")]
    MissingIdentity,

    /// The public key algorithm is neither RSA nor DSA.
    #[error("Unknown public key type: {0}")]
    UnknownKeyType(String),

    /// A subjectAltName entry is not a dNSName.
    #[error("Unknown subjectAltName tag: {0}")]
    UnknownGeneralNameTag(der::Tag),

    /// Error due to invalid input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),

    /// Error during key generation.
    #[error("Key generation error: {0}")]
    KeyGenerationError(String),

    /// Error while producing a signature.
    #[error("Signing error: {0}")]
    SigningError(String),
}

pub type Result<T> = std::result::Result<T, CsrKitError>;

impl From<der::Error> for CsrKitError {
    /// Converts a `der::Error` into a `CsrKitError`.
    fn from(err: der::Error) -> Self {
        CsrKitError::ParseError(err.to_string())
    }
}

impl From<pem::PemError> for CsrKitError {
    fn from(err: pem::PemError) -> Self {
        CsrKitError::ParseError(err.to_string())
    }
}

impl From<rsa::Error> for CsrKitError {
    fn from(err: rsa::Error) -> Self {
        CsrKitError::KeyGenerationError(err.to_string())
    }
}

/// An error reported by the certificate-authority API in a response body.
///
/// The API signals failures with a `{"code": <int>, "description": <string>}`
/// object. A JSON integer zero code whose description mentions processing
/// means the request was accepted but the certificate is not ready yet.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{description}")]
    StillProcessing { description: String },

    /// `code` is `None` when the body carries a code that is not an integer
    /// or an integer string.
    #[error("{description}")]
    Api {
        code: Option<i64>,
        description: String,
    },
}

impl ApiError {
    /// Inspects a decoded response body and returns the error it carries, if any.
    pub fn from_response_body(body: &Value) -> Option<Self> {
        let object = body.as_object()?;
        let code = object.get("code").filter(|code| !code.is_null())?;
        let description = object
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if code.as_i64() == Some(0) && description.contains("process") {
            return Some(ApiError::StillProcessing { description });
        }
        let code = code
            .as_i64()
            .or_else(|| code.as_str().and_then(|code| code.trim().parse().ok()));
        Some(ApiError::Api { code, description })
    }

    /// Fails with the error carried by `body`, if any.
    pub fn check(body: &Value) -> std::result::Result<(), Self> {
        match Self::from_response_body(body) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Numeric code associated with the error.
    pub fn code(&self) -> Option<i64> {
        match self {
            ApiError::StillProcessing { .. } => Some(0),
            ApiError::Api { code, .. } => *code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_with_code() {
        let body = json!({ "code": -16, "description": "Unknown user" });
        let err = ApiError::from_response_body(&body).unwrap();
        assert_eq!(
            err,
            ApiError::Api {
                code: Some(-16),
                description: "Unknown user".to_string()
            }
        );
        assert_eq!(err.code(), Some(-16));
        assert_eq!(err.to_string(), "Unknown user");
    }

    #[test]
    fn test_api_error_still_processing() {
        let body = json!({ "code": 0, "description": "Being processed by Comodo" });
        let err = ApiError::check(&body).unwrap_err();
        assert!(matches!(err, ApiError::StillProcessing { .. }));
        assert_eq!(err.code(), Some(0));
    }

    #[test]
    fn test_api_error_non_integer_codes() {
        let body = json!({ "code": "-16", "description": "Unknown user" });
        assert_eq!(ApiError::from_response_body(&body).unwrap().code(), Some(-16));

        // Only an integer zero signals a request still in progress.
        let body = json!({ "code": "0", "description": "being processed" });
        assert_eq!(
            ApiError::from_response_body(&body),
            Some(ApiError::Api {
                code: Some(0),
                description: "being processed".to_string()
            })
        );

        let body = json!({ "code": 0.5, "description": "being processed" });
        assert_eq!(
            ApiError::from_response_body(&body),
            Some(ApiError::Api {
                code: None,
                description: "being processed".to_string()
            })
        );
    }

    #[test]
    fn test_api_error_zero_code_without_processing_is_generic() {
        let body = json!({ "code": 0, "description": "Something else" });
        assert!(matches!(
            ApiError::from_response_body(&body),
            Some(ApiError::Api { code: Some(0), .. })
        ));
    }

    #[test]
    fn test_api_error_absent_for_success_bodies() {
        assert!(ApiError::check(&json!({ "renewId": "x", "sslId": 382 })).is_ok());
        assert!(ApiError::check(&json!({ "code": null })).is_ok());
        assert!(ApiError::check(&json!([{ "id": 25 }])).is_ok());
        assert!(ApiError::check(&json!("-----BEGIN CERTIFICATE-----")).is_ok());
    }
}
