//! Minimal CLI: describe | check | matches
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use typegraph::descriptor;
use typegraph::types::{TypeLike, TypeRef};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// inspect type graphs built from JSON descriptors and test JSON values against them
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// print diagnostics to stderr
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// print the signature, native type and traversal of a type
    Describe(DescribeOut),
    /// test every input value against a type
    Check(CheckOut),
    /// test whether one type is assignable where another is expected
    Matches(MatchesOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct DescribeOut {
    /// type descriptor (.json)
    #[arg(long = "type", short)]
    type_path: PathBuf,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    /// type descriptor (.json)
    #[arg(long = "type", short)]
    type_path: PathBuf,

    #[command(flatten)]
    input_settings: InputSettings,

    /// only print rejected values
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(clap::Parser, Debug)]
struct MatchesOut {
    /// candidate type descriptor (.json)
    #[arg(long = "type", short)]
    type_path: PathBuf,

    /// expected type descriptor (.json)
    #[arg(long, short)]
    expected: PathBuf,
}

/// One value pulled out of an input file.
struct Sample {
    label: String,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_samples(&self) -> Result<Vec<Sample>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let per_file = source_paths
            .par_iter()
            .map(|source_path| self.load_file(source_path))
            .collect::<Result<Vec<_>>>()?;
        Ok(per_file.into_iter().flatten().collect())
    }

    fn load_file(&self, source_path: &Path) -> Result<Vec<Sample>> {
        let source_path_str = source_path.to_string_lossy().to_string();
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("failed to read source file ({source_path_str})"))?;

        let mut documents = Vec::new();
        if self.ndjson {
            for (index, line) in source.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let label = format!("{source_path_str}:{}", index + 1);
                let value = serde_json::from_str::<Value>(line)
                    .with_context(|| format!("failed to parse NDJSON line ({label})"))?;
                documents.push(Sample { label, value });
            }
        } else {
            let value = serde_json::from_str::<Value>(&source)
                .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
            documents.push(Sample { label: source_path_str, value });
        }

        match self.json_pointer.as_ref() {
            None => Ok(documents),
            Some(pointer) => documents
                .into_iter()
                .map(|Sample { label, value }| match value.pointer(pointer) {
                    Some(selected) => Ok(Sample { label, value: selected.clone() }),
                    None => Err(anyhow!("JSON pointer {pointer} selects nothing in {label}")),
                })
                .collect(),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<ExitCode> {
        match &self.cmd {
            Command::Describe(target) => {
                let ty = self.load_type(&target.type_path)?;
                println!("{} {ty}", "signature:  ".bold());
                println!("{} {}", "native type:".bold(), ty.native_type());
                println!("{}", "traverse:".bold());
                for sub_type in ty.traverse() {
                    println!("  {sub_type}");
                }
                Ok(ExitCode::SUCCESS)
            }
            Command::Check(target) => {
                let ty = self.load_type(&target.type_path)?;
                let samples = target.input_settings.load_samples()?;
                self.note(format!("checking {} value(s) against {ty}", samples.len()));

                let verdicts = samples
                    .par_iter()
                    .map(|sample| ty.accepts(&sample.value))
                    .collect::<Vec<_>>();

                let mut rejected = 0usize;
                for (sample, accepted) in samples.iter().zip(verdicts) {
                    if accepted {
                        if !target.quiet {
                            println!("{} {}", "✅ accepted".green(), sample.label);
                        }
                    } else {
                        rejected += 1;
                        println!("{} {}", "❌ rejected".red(), sample.label);
                    }
                }
                self.note(format!("{rejected} of {} value(s) rejected", samples.len()));
                Ok(if rejected == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
            }
            Command::Matches(target) => {
                let candidate = self.load_type(&target.type_path)?;
                let expected = self.load_type(&target.expected)?;
                if candidate.matches(&expected) {
                    println!("{} {candidate} matches {expected}", "✅".green());
                    Ok(ExitCode::SUCCESS)
                } else {
                    println!("{} {candidate} does not match {expected}", "❌".red());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }

    fn load_type(&self, path: &Path) -> Result<TypeRef> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read type descriptor ({})", path.display()))?;
        let ty = descriptor::load_str(&source)
            .with_context(|| format!("invalid type descriptor ({})", path.display()))?;
        self.note(format!("loaded {ty} from {}", path.display()));
        Ok(ty)
    }

    fn note(&self, message: impl Display) {
        if self.verbose {
            eprintln!("{} {message}", "note:".dimmed());
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
