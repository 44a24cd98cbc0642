//! Drover Core
//!
//! Shared types for the drover task dispatcher.
//!
//! This crate contains:
//! - Domain types: task lifecycle statuses, failure entries, task definitions
//! - DTOs: wire shapes for orchestrator and lock-store communication

pub mod domain;
pub mod dto;
