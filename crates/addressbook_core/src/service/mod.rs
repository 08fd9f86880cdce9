//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the surface the HTTP layer consumes.
//! - Keep outer layers decoupled from storage details.

pub mod contact_service;
