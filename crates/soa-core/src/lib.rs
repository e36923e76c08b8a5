//! `soa-core` — foundational types for the `soa` container crates.
//!
//! This crate is a dependency of `soa-store` and `soa-mapped`.  It has no
//! `soa-*` dependencies and a single external one (`thiserror`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`row`]     | `Row`, `CloneRow`, `DefaultRow`, `Column<N>` tuple traits |
//! | [`error`]   | `SoaError`, `SoaResult`, `check_row`                      |

pub mod error;
pub mod row;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SoaError, SoaResult, check_row};
pub use row::{CloneRow, Column, DefaultRow, Row};
