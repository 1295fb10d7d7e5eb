//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `authoring.rs` — init/compile/templates.
//! - `maintenance.rs` — lint/audit/migrate.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.
//! - Reports that describe a failure are printed in full, then the process
//!   exits with status 1.

pub mod authoring;
pub mod maintenance;

pub use authoring::handle_authoring_commands;
pub use maintenance::handle_maintenance_commands;
