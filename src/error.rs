use thiserror::Error;

/// Errors raised while decoding a multilingual text payload.
///
/// Decoding either fully succeeds or fails with one of these; there is no
/// partial result.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid JSON, or a known field has the wrong type
    #[error("Malformed multilingual text payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload parsed, but its top level is not an object
    #[error("Expected a JSON object for multilingual text, got {0}")]
    NotAnObject(&'static str),
}
