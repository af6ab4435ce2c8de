//! Conversions from external infrastructure errors into `ApiError`.

use std::io::{Error as IoError, ErrorKind};

use greenloop_common::{ApiError, ErrorCode};
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the normalized error.
#[derive(Debug)]
pub struct InfraError(pub ApiError);

impl From<InfraError> for ApiError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ApiError> for InfraError {
    fn from(value: ApiError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoApiError {
    fn into_api_error(self) -> ApiError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl IntoApiError for HttpError {
    fn into_api_error(self) -> ApiError {
        if self.is_timeout() {
            return ApiError::new(ErrorCode::Timeout, 0, "HTTP request timed out");
        }

        if self.is_builder() {
            return ApiError::config(format!("Invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return ApiError::invalid_response(format!("Failed to decode response: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return ApiError::network(format!("Unable to connect: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            return ApiError::http(code, format!("Request failed with status {code}"));
        }

        ApiError::network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_api_error())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl IntoApiError for IoError {
    fn into_api_error(self) -> ApiError {
        match self.kind() {
            ErrorKind::PermissionDenied => {
                ApiError::config(format!("Permission denied accessing local file: {self}"))
            }
            ErrorKind::NotFound => ApiError::config(format!("Local file not found: {self}")),
            _ => ApiError::unknown(format!("I/O error: {self}")),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_api_error())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / toml → ApiError */
/* -------------------------------------------------------------------------- */

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(ApiError::from(value))
    }
}

impl IntoApiError for toml::de::Error {
    fn into_api_error(self) -> ApiError {
        ApiError::config(format!("Invalid TOML: {}", self.message()))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(value.into_api_error())
    }
}

/* -------------------------------------------------------------------------- */
/* greenloop_domain::ConfigError → ApiError */
/* -------------------------------------------------------------------------- */

impl From<greenloop_domain::ConfigError> for InfraError {
    fn from(value: greenloop_domain::ConfigError) -> Self {
        InfraError(ApiError::config(value.to_string()))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
