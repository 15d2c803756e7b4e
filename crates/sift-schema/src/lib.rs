//! # sift-schema
//!
//! JSON Schema generation, protocol validation, and registry for Sift.
//!
//! This crate provides:
//! - `ProtocolValidator`: grammar and reference checks for review protocols,
//!   reporting every offending field as a JSON Pointer path
//! - `SchemaRegistry`: central store of all JSON Schemas in the system
//! - Schema export for external tooling (`sift schema` command, the web wizard)
//!
//! ## Architecture
//!
//! Protocol and entity types are defined in `sift-core` with
//! `#[derive(JsonSchema)]`. This crate turns those into validators. Tagged
//! unions are post-processed by [`discriminator::resolve_tagged_unions`] so
//! that validation dispatches on the explicit tag field, and optional
//! sections by [`nullable::resolve_nullable_options`] so that errors inside
//! them keep their own paths.

pub mod discriminator;
pub mod error;
pub mod nullable;
pub mod registry;
pub mod validator;

pub use error::{SchemaError, ValidationErrors};
pub use registry::{SchemaRegistry, protocol_schema};
pub use validator::ProtocolValidator;
