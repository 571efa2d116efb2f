//! Page acquisition and content extraction.
//!
//! - [`fetch`]: HTTP retrieval of raw page markup with failure classification
//! - [`clean`]: boilerplate-stripping extraction of readable text
//!
//! Together these turn an arbitrary URL into a bounded plain-text document
//! ready for prompting.

pub mod clean;
pub mod fetch;

pub use clean::{clean, CleanContent};
pub use fetch::{Fetcher, SourceDocument};
