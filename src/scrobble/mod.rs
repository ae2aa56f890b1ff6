//! Scrobble orchestration and log file disposition

pub mod config;
pub mod disposition;
pub mod pipeline;
pub mod submit;

pub use config::ScrobbleConfig;
pub use disposition::{handle_file, FileDisposition};
pub use pipeline::{ScrobblePipeline, ScrobbleSummary};
pub use submit::{DryRunScrobbler, JsonLinesScrobbler, Scrobbler};
