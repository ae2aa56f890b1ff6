//! Data model shared by the log reader and the submission side
//!
//! Nothing here knows about the `.scrobbler.log` layout.

mod track;

pub use track::TrackRecord;
