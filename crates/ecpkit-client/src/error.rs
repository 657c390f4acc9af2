use ecpkit_host::HostError;
use ecpkit_wire::WireError;

/// Errors surfaced by SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A required argument was absent or empty. The operation was
    /// aborted before anything reached the wire.
    #[error("\"{operation}\" requires the following parameters: {params}")]
    MissingParameter {
        operation: &'static str,
        params: String,
    },

    /// The message channel was used before the main frame existed.
    #[error("main frame does not exist; open a stream in the main container first")]
    MainFrameMissing,

    /// The host document rejected a frame operation.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// Envelope encoding or decoding failed.
    #[error("wire error: {0}")]
    Wire(#[from] WireError),
}

impl ClientError {
    pub(crate) fn missing_parameter(operation: &'static str, params: &[&str]) -> Self {
        Self::MissingParameter {
            operation,
            params: params.join(", "),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
