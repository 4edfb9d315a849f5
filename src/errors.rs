use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Missing template parameter: {0}")]
    TemplateParameter(&'static str),

    #[error("Vendor API request failed with status {status}: {body}")]
    VendorStatus { status: u16, body: String },

    #[error("Failed to reach vendor API: {0}")]
    VendorTransport(String),

    #[error("Failed to parse vendor response: {0}")]
    VendorResponseParse(String),

    #[error("Vendor response has no choices[0].message.content")]
    MissingContent,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Stable tag exposed to API callers in place of internal type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    TemplateParameter,
    VendorCall,
    VendorResponseParse,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::TemplateParameter => "template_parameter",
            ErrorKind::VendorCall => "vendor_call",
            ErrorKind::VendorResponseParse => "vendor_response_parse",
            ErrorKind::Internal => "internal",
        }
    }

    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::InvalidInput | ErrorKind::TemplateParameter => StatusCode::BAD_REQUEST,
            ErrorKind::VendorCall | ErrorKind::VendorResponseParse | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl RelayError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::InvalidInput(_) => ErrorKind::InvalidInput,
            RelayError::TemplateParameter(_) => ErrorKind::TemplateParameter,
            RelayError::VendorStatus { .. } | RelayError::VendorTransport(_) => {
                ErrorKind::VendorCall
            }
            RelayError::VendorResponseParse(_) | RelayError::MissingContent => {
                ErrorKind::VendorResponseParse
            }
            RelayError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// True for failures caused by the caller's input rather than the vendor.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.kind().status().is_client_error()
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            RelayError::VendorTransport(format!("request timed out: {error}"))
        } else {
            RelayError::VendorTransport(error.to_string())
        }
    }
}
