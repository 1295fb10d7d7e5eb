//! PromptForge: compile a human-written plan document into a
//! machine-enforceable prompt contract (`prompt.ir.json`).
//!
//! Layering follows `commands` (binary) → `services` → `domain`. Everything
//! below the command layer lives here so integration tests can drive the
//! pipeline without spawning the binary.

pub mod domain;
pub mod error;
pub mod services;

pub use domain::models::{Diagnostic, Plan, PromptIR, Severity};
pub use error::{ForgeError, Result};
pub use services::compiler::{compile, compile_with_explain};
pub use services::linter::lint_plan;
pub use services::validate::validate_ir;
