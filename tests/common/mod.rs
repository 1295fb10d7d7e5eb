#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const PLAN: &str = "# Prompt Plan

## Goal
Extract invoice totals from scanned vendor emails

## Constraints
- Output must be valid JSON
- Must be secure
- Must be secure!
- Handle currencies, dates, etc.

## Out of Scope
- Does not handle images
- Payments
";

pub struct TestEnv {
    _tmp: TempDir,
    pub project: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let project = tmp.path().join("project");
        fs::create_dir_all(&project).expect("create project dir");
        Self { _tmp: tmp, project }
    }

    /// Project with `plan` already written to `promptforge/plan.md`.
    pub fn with_plan(plan: &str) -> Self {
        let env = Self::new();
        env.write("promptforge/plan.md", plan);
        env
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.project.join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, contents).expect("write fixture file");
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).expect("read project file")
    }

    pub fn read_json(&self, rel: &str) -> Value {
        serde_json::from_str(&self.read(rel)).expect("valid json file")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("promptforge");
        cmd.env_remove("PROMPTFORGE_LOG")
            .env_remove("PROMPTFORGE_LOG_JSON")
            .arg("--project-dir")
            .arg(&self.project);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    /// Run a command expected to exit non-zero and return its JSON body.
    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}
