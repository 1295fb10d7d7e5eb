mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestEnv, PLAN};
use predicates::str::contains;
use serde_json::Value;

fn rule_ids(ir: &Value) -> Vec<String> {
    ir["rules"]
        .as_array()
        .expect("rules array")
        .iter()
        .map(|r| r["id"].as_str().expect("rule id").to_string())
        .collect()
}

#[test]
fn init_compile_lint_audit_roundtrip() {
    let env = TestEnv::new();

    let init = env.run_json(&["init", "Extract", "invoice", "totals", "from", "emails"]);
    assert_eq!(init["ok"], true);
    assert_eq!(init["data"]["plan"], "promptforge/plan.md");
    assert!(env.read("promptforge/plan.md").contains("## Goal\nExtract invoice totals from emails\n"));

    let compiled = env.run_json(&["compile"]);
    assert_eq!(compiled["data"]["version"], "1");
    assert_eq!(compiled["data"]["rules"], 4);
    assert_eq!(compiled["data"]["failure_modes"], 3);
    assert_eq!(compiled["data"]["explain"], Value::Null);
    assert!(env.path("prompt.ir.schema.json").exists());
    assert!(!env.path("prompt.ir.explain.json").exists());

    let ir = env.read_json("prompt.ir.json");
    assert_eq!(
        ir["system_role"],
        "You are an assistant designed to: Extract invoice totals from emails. You must follow all specified rules and constraints strictly."
    );

    // Blank template leaves both list sections empty.
    let lint = env.run_json(&["lint"]);
    assert_eq!(lint["data"]["errors"], 0);
    assert_eq!(lint["data"]["warnings"], 2);

    let audit = env.run_json(&["audit"]);
    assert_eq!(audit["ok"], true);
    assert_eq!(audit["data"]["overall"], "ok");
}

#[test]
fn compile_assigns_ids_in_document_order() {
    let env = TestEnv::with_plan(PLAN);
    env.run_json(&["compile"]);
    let ir = env.read_json("prompt.ir.json");
    assert_eq!(
        rule_ids(&ir),
        [
            "output-json",
            "no-explanations",
            "no-inference",
            "fail-ambiguity",
            "constraint-output-valid-json",
            "constraint-secure",
            "constraint-secure-1",
            "constraint-handle-currencies-dates",
        ]
    );
    let modes: Vec<&str> = ir["failure_modes"]
        .as_array()
        .expect("failure modes")
        .iter()
        .map(|f| f["id"].as_str().expect("id"))
        .collect();
    assert_eq!(
        modes,
        [
            "invalid-input",
            "ambiguous-request",
            "missing-required",
            "out-of-scope-images",
            "out-of-scope-payments",
        ]
    );
    assert_eq!(
        ir["failure_modes"][4]["response"],
        "Return error indicating that Payments is out of scope and cannot be handled"
    );
}

#[test]
fn compile_with_explain_traces_sources() {
    let env = TestEnv::with_plan(PLAN);
    let out = env.run_json(&["compile", "--explain"]);
    assert_eq!(out["data"]["explain"], "prompt.ir.explain.json");

    let explain = env.read_json("prompt.ir.explain.json");
    assert_eq!(explain["system_role"]["source"]["type"], "plan");
    assert_eq!(explain["system_role"]["source"]["section"], "Goal");
    assert_eq!(explain["system_role"]["source"]["line"], 4);
    assert_eq!(explain["rules"][0]["id"]["source"]["type"], "baseline");
    assert!(explain["rules"][0]["id"]["source"].get("line").is_none());
    assert_eq!(explain["rules"][6]["id"]["value"], "constraint-secure-1");
    assert_eq!(explain["rules"][6]["description"]["source"]["line"], 9);
    assert_eq!(explain["failure_modes"][4]["condition"]["source"]["section"], "Out of Scope");
    assert_eq!(explain["input_schema"]["type"]["value"], "object");
}

#[test]
fn compile_is_idempotent() {
    let env = TestEnv::with_plan(PLAN);
    env.run_json(&["compile"]);
    let first = env.read("prompt.ir.json");
    let schema = env.read("prompt.ir.schema.json");
    env.run_json(&["compile"]);
    assert_eq!(first, env.read("prompt.ir.json"));
    assert_eq!(schema, env.read("prompt.ir.schema.json"));
}

#[test]
fn compile_without_goal_fails_and_writes_nothing() {
    let env = TestEnv::with_plan("# Prompt Plan\n\n## Constraints\n- Must be fast\n");
    let err = env.run_json_failure(&["compile"]);
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"]["code"], "STRUCTURAL");
    assert!(err["error"]["message"]
        .as_str()
        .expect("message")
        .contains("Goal section is required"));
    assert!(!env.path("prompt.ir.json").exists());
}

#[test]
fn compile_without_plan_points_at_init() {
    let env = TestEnv::new();
    env.cmd()
        .arg("compile")
        .assert()
        .failure()
        .stderr(contains("promptforge init"));
}

#[test]
fn init_refuses_to_overwrite_existing_plan() {
    let env = TestEnv::with_plan(PLAN);
    let err = env.run_json_failure(&["init"]);
    assert_eq!(err["error"]["code"], "PLAN_EXISTS");
    assert_eq!(env.read("promptforge/plan.md"), PLAN);
}

#[test]
fn init_from_template() {
    let env = TestEnv::new();
    let out = env.run_json(&["init", "--template", "code-review"]);
    assert_eq!(out["data"]["template"], "code-review");
    assert!(env.read("promptforge/plan.md").contains("- Call out missing tests"));

    let unknown = TestEnv::new();
    let err = unknown.run_json_failure(&["init", "--template", "poetry"]);
    assert_eq!(err["error"]["code"], "UNKNOWN_TEMPLATE");
}

#[test]
fn templates_lists_registry() {
    let env = TestEnv::new();
    env.cmd()
        .arg("templates")
        .assert()
        .success()
        .stdout(contains(
            "api-guardrails - API assistant with strict input/output and error handling",
        ))
        .stdout(contains("data-extraction - "))
        .stdout(contains("code-review - "));

    let json = env.run_json(&["templates"]);
    assert_eq!(json["data"].as_array().map(Vec::len), Some(3));
}

#[test]
fn lint_reports_locations_and_fails_on_errors() {
    let env = TestEnv::with_plan("# Prompt Plan\n\n## Goals\nSomething\n");
    env.cmd()
        .arg("lint")
        .assert()
        .failure()
        .stdout(contains("promptforge/plan.md:3:1: error PF103 unknown section heading: Goals"))
        .stdout(contains("promptforge/plan.md:1:1: error PF100 missing required section: Goal"));

    let warn_only = TestEnv::with_plan(PLAN);
    let out = warn_only.run_json(&["lint"]);
    assert_eq!(out["ok"], true);
    assert_eq!(out["data"]["diagnostics"][0]["code"], "PF203");
    assert_eq!(out["data"]["diagnostics"][0]["line"], 10);
}

#[test]
fn migrate_unversioned_ir() {
    let env = TestEnv::with_plan(PLAN);
    env.run_json(&["compile"]);
    let raw = env.read("prompt.ir.json").replace("\"version\": \"1\"", "\"version\": \"0\"");
    env.write("prompt.ir.json", &raw);
    std::fs::remove_file(env.path("prompt.ir.schema.json")).expect("remove schema");

    let out = env.run_json(&["migrate"]);
    assert_eq!(out["data"]["migrated"], true);
    assert_eq!(out["data"]["from_version"], "0");
    assert_eq!(out["data"]["to_version"], "1");
    assert_eq!(env.read_json("prompt.ir.json")["version"], "1");
    assert!(env.path("prompt.ir.schema.json").exists());

    let again = env.run_json(&["migrate"]);
    assert_eq!(again["data"]["migrated"], false);
}

#[test]
fn migrate_null_version_and_reports_dropped_keys() {
    let env = TestEnv::with_plan(PLAN);
    env.run_json(&["compile"]);
    let mut ir = env.read_json("prompt.ir.json");
    ir["version"] = serde_json::Value::Null;
    ir["rules"][0]["priority"] = 2.into();
    env.write("prompt.ir.json", &ir.to_string());

    let out = env.run_json(&["migrate"]);
    assert_eq!(out["data"]["migrated"], true);
    assert_eq!(out["data"]["from_version"], "");
    assert_eq!(out["data"]["dropped_keys"][0], "rules[0].priority");
    let rewritten = env.read_json("prompt.ir.json");
    assert_eq!(rewritten["version"], "1");
    assert!(rewritten["rules"][0].get("priority").is_none());
}

#[test]
fn migrate_rejects_unknown_version_without_touching_files() {
    let env = TestEnv::with_plan(PLAN);
    env.run_json(&["compile"]);
    let raw = env.read("prompt.ir.json").replace("\"version\": \"1\"", "\"version\": \"9.9\"");
    env.write("prompt.ir.json", &raw);
    env.write("prompt.ir.schema.json", "stale\n");

    let err = env.run_json_failure(&["migrate"]);
    assert_eq!(err["error"]["code"], "VERSION");
    assert!(err["error"]["message"].as_str().expect("message").contains("9.9"));
    assert_eq!(env.read("prompt.ir.json"), raw);
    assert_eq!(env.read("prompt.ir.schema.json"), "stale\n");
}

#[test]
fn audit_flags_missing_schema_and_old_version() {
    let env = TestEnv::with_plan(PLAN);
    env.run_json(&["compile"]);
    std::fs::remove_file(env.path("prompt.ir.schema.json")).expect("remove schema");

    let warn = env.run_json(&["audit"]);
    assert_eq!(warn["data"]["overall"], "warn");
    assert_eq!(warn["data"]["issues"][0]["severity"], "warn");

    let raw = env.read("prompt.ir.json").replace("\"version\": \"1\"", "\"version\": \"0.9\"");
    env.write("prompt.ir.json", &raw);
    let failed = env.run_json_failure(&["audit"]);
    assert_eq!(failed["ok"], false);
    assert_eq!(failed["data"]["overall"], "error");
    assert_eq!(failed["data"]["issues"][0]["severity"], "error");

    env.cmd()
        .arg("audit")
        .assert()
        .failure()
        .stdout(contains("error: IR version 0.9 does not match current 1."));
}

#[test]
fn config_overrides_artifact_paths() {
    let env = TestEnv::with_plan(PLAN);
    env.write(
        "promptforge.toml",
        "[paths]\nir = \"build/contract.json\"\nschema = \"build/contract.schema.json\"\n",
    );
    let out = env.run_json(&["compile"]);
    assert_eq!(out["data"]["ir"], "build/contract.json");
    assert!(env.path("build/contract.json").exists());
    assert!(env.path("build/contract.schema.json").exists());
    assert!(!env.path("prompt.ir.json").exists());
    assert_eq!(env.run_json(&["audit"])["data"]["overall"], "ok");
}

#[test]
fn broken_config_is_reported() {
    let env = TestEnv::with_plan(PLAN);
    env.write("promptforge.toml", "[paths\n");
    let err = env.run_json_failure(&["compile"]);
    assert_eq!(err["error"]["code"], "CONFIG");
}

#[test]
fn missing_project_dir_is_reported() {
    let env = TestEnv::new();
    let missing = env.path("nope");
    let out = cargo_bin_cmd!("promptforge")
        .args(["--project-dir", missing.to_str().expect("utf8 path"), "--json", "compile"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let err: Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(err["error"]["code"], "PROJECT_MISSING");
}

#[test]
fn json_logs_go_to_stderr() {
    let env = TestEnv::with_plan(PLAN);
    let output = env
        .cmd()
        .env("PROMPTFORGE_LOG", "info")
        .env("PROMPTFORGE_LOG_JSON", "1")
        .args(["--json", "compile"])
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout: Value = serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(stdout["ok"], true);

    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    let lines: Vec<Value> = stderr
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("json log line"))
        .collect();
    assert!(lines
        .iter()
        .any(|l| l["fields"]["message"] == "wrote prompt IR"));
}
