//! Minimal CLI: load host metadata → (check | emit)
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;

use crate::emit::emit;
use crate::model::{AnnotatedType, EmittedContract};
use crate::validate::validate_type;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// synthesize public-contract interface declarations from host type metadata
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// synthesize one `I<Name>.g.cs` artifact per qualifying annotated type
    Emit(EmitOut),
    /// parse and validate metadata inputs without emitting anything
    Check(CheckRun),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// jq filter applied to each document before deserialization
    /// (e.g. '.generator.types[]')
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs; literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug)]
struct EmitOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// directory for the generated artifacts (stdout if omitted)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(Args, Debug)]
struct CheckRun {
    #[command(flatten)]
    input_settings: InputSettings,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

/// One candidate type plus where it came from, for diagnostics.
#[derive(Debug)]
struct Candidate {
    origin: String,
    ty: AnnotatedType,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Emit(target) => {
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                run_emit(target)
            }
            Command::Check(target) => {
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                run_check(target)
            }
        }
    }
}

fn run_emit(target: &EmitOut) -> Result<()> {
    let candidates = target.input_settings.load_candidates()?;

    // Ill-formed candidates fail loudly but never block their siblings.
    let mut sound = Vec::new();
    let mut failures = 0usize;
    for candidate in candidates {
        match validate_type(&candidate.ty) {
            Ok(()) => sound.push(candidate),
            Err(err) => {
                failures += 1;
                eprintln!(
                    "{} {} ({}): {err}",
                    "invalid".red().bold(),
                    candidate.ty.name,
                    candidate.origin,
                );
            }
        }
    }

    // Candidates are independent, so synthesis parallelizes freely; sorting
    // by key afterwards keeps output order deterministic.
    let mut contracts: Vec<EmittedContract> = sound
        .par_iter()
        .filter_map(|candidate| emit(&candidate.ty))
        .collect();
    contracts.sort_by(|a, b| a.artifact_key.cmp(&b.artifact_key));

    match target.out_dir.as_ref() {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            for contract in &contracts {
                let path = dir.join(format!("{}.g.cs", contract.artifact_key));
                std::fs::write(&path, &contract.text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
        }
        None => {
            for contract in &contracts {
                println!("// {}.g.cs", contract.artifact_key);
                println!("{}", contract.text);
            }
        }
    }

    if failures > 0 {
        bail!("{failures} candidate type(s) had invalid metadata");
    }
    Ok(())
}

fn run_check(target: &CheckRun) -> Result<()> {
    let candidates = target.input_settings.load_candidates()?;
    let mut failures = 0usize;

    for candidate in &candidates {
        match validate_type(&candidate.ty) {
            Ok(()) => {
                eprintln!("{} {} ({})", "ok".green(), candidate.ty.name, candidate.origin);
            }
            Err(err) => {
                failures += 1;
                eprintln!(
                    "{} {} ({}): {err}",
                    "error".red().bold(),
                    candidate.ty.name,
                    candidate.origin,
                );
            }
        }
    }

    eprintln!("{} checked, {} failed", candidates.len(), failures);
    if failures > 0 {
        bail!("metadata check failed");
    }
    Ok(())
}

impl InputSettings {
    /// Read every input document, apply the optional jq filter, and
    /// deserialize each resulting value (an object, or an array of them)
    /// into annotated-type candidates.
    fn load_candidates(&self) -> Result<Vec<Candidate>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut out = Vec::new();

        for source_path in source_paths {
            let origin = source_path.display().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read {origin}"))?;
            let document: serde_json::Value = serde_json::from_str(&source)
                .with_context(|| format!("failed to parse JSON in {origin}"))?;

            let documents = match self.jq_expr.as_deref() {
                None => vec![document],
                Some(expr) => crate::filter::apply_filter(expr, &document)
                    .with_context(|| format!("jq filter failed on {origin}"))?,
            };

            for doc in documents {
                let values = match doc {
                    serde_json::Value::Array(items) => items,
                    other => vec![other],
                };
                for value in values {
                    let ty = deserialize_candidate(value)
                        .with_context(|| format!("bad type metadata in {origin}"))?;
                    out.push(Candidate { origin: origin.clone(), ty });
                }
            }
        }

        Ok(out)
    }
}

/// Deserialize with JSON-path context in error messages.
fn deserialize_candidate(value: serde_json::Value) -> Result<AnnotatedType> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        anyhow::anyhow!("at JSON path {path}: {}", err.into_inner())
    })
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
                // An explicit glob that matches nothing is a caller mistake.
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(Path::new(pattern).to_path_buf());
        }
    }

    Ok(out)
}
