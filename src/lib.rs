//! Rockbox Scrobbler - `.scrobbler.log` importer
//!
//! This library reads the Audioscrobbler portable log written by Rockbox
//! and similar players and turns its listens into UTC track records ready
//! for submission to a scrobbling service.

pub mod error;
pub mod model;
pub mod scrobble;
pub mod scrobbler_log;

pub use scrobble::config::ScrobbleConfig;
pub use scrobble::pipeline::ScrobblePipeline;
