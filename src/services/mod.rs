//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `document.rs` — newline normalisation, comment stripping, section ranges.
//! - `parser.rs` — plan document → `Plan` (Goal, Constraints, Out of Scope).
//! - `slug.rs` — readable identifiers and collision-free allocation.
//! - `compiler.rs` — `Plan` → `PromptIR`, plus the explain report.
//! - `validate.rs` — structural IR checks; gate before every IR write.
//! - `linter.rs` — advisory diagnostics over the raw plan.
//! - `schema.rs` — JSON Schema artifact for `prompt.ir.json`.
//! - `migrate.rs` — IR version state machine and project migration.
//! - `audit.rs` — read-only IR/schema health check.
//! - `storage.rs` — project paths, artifact reads/writes, init/compile flows.
//! - `config.rs` — optional `promptforge.toml`.
//! - `templates.rs` — built-in plan templates.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized (`storage`, `migrate`, `audit`).
//! - Keep command handlers thin; delegate to services.

pub mod audit;
pub mod compiler;
pub mod config;
pub mod document;
pub mod linter;
pub mod migrate;
pub mod output;
pub mod parser;
pub mod schema;
pub mod slug;
pub mod storage;
pub mod templates;
pub mod validate;
