//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate evaluator and repository calls into use-case level APIs.
//! - Keep the HTTP layer decoupled from storage details.

pub mod submission_service;
