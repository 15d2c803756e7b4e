//! # sift-core
//!
//! Core types, storage vocabulary, and ID generation for Sift.
//!
//! This crate provides the foundational types shared across all Sift crates:
//! - The review protocol document (`ReviewProtocol` and its tagged unions)
//! - Storage enums and the total mappers from protocol vocabulary
//! - The category flattener that turns the extraction tree into ordered fields
//! - Entity structs for every row created by a project installation
//! - ID prefix constants and generation
//! - Cross-cutting error types and response shapes

pub mod entities;
pub mod enums;
pub mod errors;
pub mod flatten;
pub mod identity;
pub mod ids;
pub mod protocol;
pub mod responses;
