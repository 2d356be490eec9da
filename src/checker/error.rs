// src/checker/error.rs
// =============================================================================
// The failures a link check can record.
//
// These errors are not fatal to the program. They are stored on the
// ResultSet (page-level failures) or on a single LinkResult (link-level
// failures) and printed in the report.
//
// Rust concepts:
// - thiserror: Derives std::error::Error and Display from attributes
// - #[from]: Lets `?` turn a reqwest::Error into a CheckError
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// The CSS selector given on the command line could not be parsed
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The request never produced a usable response (DNS, connect, TLS, body...)
    ///
    /// reqwest's own message already names the URL.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}
