//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `strum`).
//! Keep it lean: no I/O, networking, or policy logic. Just data and simple helpers.

pub mod config;
pub mod constants;
pub mod features;
pub mod role;
pub mod subscription;
