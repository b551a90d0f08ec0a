use thiserror::Error;

/// Failure of a single remote call, already classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteCallError {
    /// No response was obtained (connection refused, DNS failure, timeout).
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    /// The tunnel gateway returned a placeholder page instead of the API response.
    #[error("gateway returned an interstitial page")]
    GatewayInterstitial,

    /// The response was live but its body was not structured data.
    #[error("invalid response: {0}")]
    DecodeError(String),

    /// Well-formed error payload or non-ok status.
    #[error("{0}")]
    ApplicationError(String),

    /// Well-formed success payload lacking a required key.
    #[error("{0}")]
    MissingField(String),

    /// The local image could not be read, so no request was sent.
    #[error("image unreadable: {0}")]
    ImageUnreadable(String),
}

impl RemoteCallError {
    /// Short message shown to the user for this failure class.
    pub fn user_message(&self) -> String {
        match self {
            Self::NetworkUnreachable(_) => "Server unreachable.".to_string(),
            Self::GatewayInterstitial => {
                "Server unreachable or busy (the gateway returned a web page). Try again."
                    .to_string()
            }
            Self::DecodeError(_) => "Invalid response received.".to_string(),
            Self::ApplicationError(message) | Self::MissingField(message) => message.clone(),
            Self::ImageUnreadable(_) => "Could not read the selected image.".to_string(),
        }
    }

    /// Stable name of the failure class, used in logs and CLI output.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::NetworkUnreachable(_) => "NetworkUnreachable",
            Self::GatewayInterstitial => "GatewayInterstitial",
            Self::DecodeError(_) => "DecodeError",
            Self::ApplicationError(_) => "ApplicationError",
            Self::MissingField(_) => "MissingField",
            Self::ImageUnreadable(_) => "ImageUnreadable",
        }
    }
}
