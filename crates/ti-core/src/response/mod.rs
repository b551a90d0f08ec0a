//! Normalized view of raw HTTP responses.
//!
//! Every remote call passes its status and body through [`classify`] before any
//! business logic looks at the payload.

mod classifier;

pub use classifier::{classify, is_html_document, ClassifiedResponse, ResponseKind};
