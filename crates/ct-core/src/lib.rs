//! # ct-core
//!
//! Core types and error taxonomy for ConcreTrack.
//!
//! This crate provides the foundational types shared across all ConcreTrack crates:
//! - Entity structs for clients, projects, sample families, members and operatives
//! - Insert payloads (`New*`) for the save operations
//! - Id validation helpers
//! - The `ErrorKind` taxonomy every crate error maps onto

pub mod entities;
pub mod errors;
pub mod ids;
