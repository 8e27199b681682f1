//! Replays the JSON fixture cases under `fixtures/` against the type graph.
//!
//! Usage: `dev-test-runner [FIXTURES_DIR] [NAME_REGEX]`
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use typegraph::descriptor;
use typegraph::path_de;
use typegraph::{TypeLike, TypeRef};

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    #[serde(rename = "type")]
    ty: Value,
    signature: Option<String>,
    native: Option<String>,
    #[serde(default)]
    traverse: Option<Vec<String>>,
    #[serde(default)]
    accepts: Vec<Value>,
    #[serde(default)]
    rejects: Vec<Value>,
    #[serde(default)]
    matches: Vec<Value>,
    #[serde(default)]
    does_not_match: Vec<Value>,
    /// Expected construction error, matched against the error message.
    error: Option<String>,
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let fixtures_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("fixtures"));
    let filter = args.next();

    match run(&fixtures_dir, filter.as_deref()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(fixtures_dir: &Path, filter: Option<&str>) -> Result<bool> {
    let filter = filter.map(Regex::new).transpose().context("invalid case filter")?;

    let mut fixture_paths = std::fs::read_dir(fixtures_dir)
        .with_context(|| format!("failed to read fixtures dir ({})", fixtures_dir.display()))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    fixture_paths.retain(|path| path.extension().is_some_and(|ext| ext == "json"));
    fixture_paths.sort();

    let (mut passed, mut failed) = (0usize, 0usize);
    for fixture_path in fixture_paths {
        let source = std::fs::read_to_string(&fixture_path)?;
        let cases = path_de::from_str_with_path::<Vec<Case>>(&source)
            .with_context(|| format!("malformed fixture file ({})", fixture_path.display()))?;
        for case in cases {
            if filter.as_ref().is_some_and(|re| !re.is_match(&case.name)) {
                continue;
            }
            let failures = check_case(&case);
            if failures.is_empty() {
                passed += 1;
                eprintln!("{} {}", "✅".green(), case.name);
            } else {
                failed += 1;
                eprintln!("{} {}", "❌".red(), case.name);
                for failure in failures {
                    eprintln!("    {failure}");
                }
            }
        }
    }

    eprintln!("{passed} passed, {failed} failed");
    Ok(failed == 0)
}

fn check_case(case: &Case) -> Vec<String> {
    let mut failures = Vec::new();

    let ty = match descriptor::load_value(case.ty.clone()) {
        Ok(ty) => ty,
        Err(error) => {
            match &case.error {
                Some(expected) if error.to_string().contains(expected.as_str()) => {}
                _ => failures.push(format!("construction failed: {error}")),
            }
            return failures;
        }
    };
    if let Some(expected) = &case.error {
        failures.push(format!("expected construction error `{expected}`, built {ty}"));
        return failures;
    }

    if let Some(expected) = &case.signature {
        if ty.to_string() != *expected {
            failures.push(format!("signature: expected {expected}, got {ty}"));
        }
    }
    if let Some(expected) = &case.native {
        let native = ty.native_type();
        if native.to_string() != *expected {
            failures.push(format!("native type: expected {expected}, got {native}"));
        }
    }
    if let Some(expected) = &case.traverse {
        let actual = ty.traverse().iter().map(ToString::to_string).collect::<Vec<_>>();
        if actual != *expected {
            failures.push(format!("traverse: expected {expected:?}, got {actual:?}"));
        }
    }
    for value in &case.accepts {
        if !ty.accepts(value) {
            failures.push(format!("should accept {value}"));
        }
    }
    for value in &case.rejects {
        if ty.accepts(value) {
            failures.push(format!("should reject {value}"));
        }
    }
    check_matches(&ty, &case.matches, true, &mut failures);
    check_matches(&ty, &case.does_not_match, false, &mut failures);

    failures
}

fn check_matches(ty: &TypeRef, others: &[Value], expected: bool, failures: &mut Vec<String>) {
    for other in others {
        match descriptor::load_value(other.clone()) {
            Ok(other) if ty.matches(&other) != expected => {
                let verb = if expected { "should match" } else { "should not match" };
                failures.push(format!("{verb} {other}"));
            }
            Ok(_) => {}
            Err(error) => failures.push(format!("bad descriptor {other}: {error}")),
        }
    }
}
