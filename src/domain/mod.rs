//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep plan/IR/report structs in one place.
//! - Avoid cyclic imports and duplicated type definitions.
//! - Make artifact schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — plan, IR, explain, diagnostic and output structs.
//! - `constants.rs` — stable constants (IR version, baseline tables, word lists).
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects.
//!
//! ## Compatibility note
//! Changes in these structs change `prompt.ir.json`, `prompt.ir.explain.json`
//! and `--json` outputs. Keep schema-impacting changes in sync with
//! `services::schema`.

pub mod constants;
pub mod models;
