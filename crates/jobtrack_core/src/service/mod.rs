//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the tool-adapter layer decoupled from storage details.

pub mod activity_service;
pub mod job_apply_service;
pub mod job_posting_service;
