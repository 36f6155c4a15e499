//! Event publishers
//!
//! - [`TracingEventPublisher`]: logs each committed event
//! - [`RecordingEventPublisher`]: retains committed events for inspection

pub mod recording_publisher;
pub mod tracing_publisher;

pub use recording_publisher::RecordingEventPublisher;
pub use tracing_publisher::TracingEventPublisher;
