//! # Bookorder Document Errors
//!
//! Failures raised while turning a byte stream into an [`OrderDocument`](super::OrderDocument).
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read document stream: {0}")]
    Read(#[from] std::io::Error),

    #[error("Document bytes are not valid {encoding}")]
    Encoding { encoding: &'static str },

    #[error("Document declares an unsupported encoding '{0}'")]
    UnsupportedEncoding(String),

    #[error("Document is not well-formed XML: {0}")]
    Malformed(#[from] roxmltree::Error),

    #[error("Document is empty")]
    Empty,
}
