// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - html: Extracts link targets (href, else src) from the selected elements
// - http: Fetches the page and requests every target, one at a time
// - result: The ResultSet / LinkResult types and their timing
// - error: The failures we record instead of aborting
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod error;
mod html;
mod http;
mod result;

// Re-export public items from submodules
// This lets users write `checker::check_page()` instead of
// `checker::http::check_page()`
pub use error::CheckError;
pub use http::{build_client, check_page};
pub use result::{LinkResult, ResultSet};
