//! Domain core for the candidate intake service.
//!
//! The crate owns the questionnaire scoring pipeline (catalog, trait
//! aggregation, destination field mapping) and the intake service facade
//! that hands finished payloads to external collaborators (the ATS record
//! system, the video-interview scheduler, and the notification sender).
//! Collaborator implementations live in the API service crate; everything
//! here stays synchronous and free of network I/O.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
