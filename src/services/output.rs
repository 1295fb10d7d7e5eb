use crate::domain::models::{ErrorBody, JsonError, JsonOut};
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

/// Print a single report. `ok` is false for reports that describe a failure
/// (lint errors, audit errors) so JSON consumers can branch on it.
pub fn print_one<T: Serialize>(
    json: bool,
    ok: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

pub fn error_json(code: &str, message: &str) -> String {
    let body = JsonError {
        ok: false,
        error: ErrorBody {
            code: code.to_string(),
            message: message.to_string(),
        },
    };
    serde_json::to_string_pretty(&body).unwrap_or_else(|_| {
        format!("{{\"ok\":false,\"error\":{{\"code\":\"{code}\",\"message\":\"\"}}}}")
    })
}
