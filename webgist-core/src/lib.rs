//! Pipeline orchestration: single-URL summarization and batch coordination.
//!
//! [`Summarizer`] drives fetch -> clean -> compose -> generate for one URL and
//! returns a [`SummaryResult`]; [`Summarizer::batch_summarize`] fans that out
//! over many URLs with bounded concurrency and per-URL failure isolation.

pub mod batch;
pub mod summarizer;

pub use batch::BatchResult;
pub use summarizer::{Summarizer, SummaryResult, SummaryStatus};

pub use webgist_common::WebgistConfig;
