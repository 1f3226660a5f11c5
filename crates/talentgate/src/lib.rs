//! Core library for the Talentgate recruiting backend.
//!
//! The centerpiece is [`realtime`]: the notification hub that tracks which
//! clients are connected, which application record each user is viewing, and
//! fans out state-change events to every connected client. [`recruiting`]
//! carries the application intake surface that drives the hub with domain
//! events. The remaining modules are service plumbing: configuration,
//! telemetry, token validation, and the top-level error type.

pub mod auth;
pub mod config;
pub mod error;
pub mod realtime;
pub mod recruiting;
pub mod telemetry;
