//! Event Logging
//!
//! Herd events are defined in `llama-events`; this module writes them out.

pub mod logger;

pub use logger::EventLogger;
