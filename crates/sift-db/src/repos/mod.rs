//! Repository modules for every Sift table.
//!
//! Each module adds methods to `SiftService` via `impl SiftService` blocks.
//! Insert helpers take a plain `&libsql::Connection` so they run equally on a
//! connection or inside a transaction.

pub mod extraction;
pub mod install;
pub mod project;
pub mod quality;
pub mod screening;
