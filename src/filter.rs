//! Optional jq preprocessing of input documents.
//!
//! Host dumps rarely contain bare type metadata; `--jq-expr` lets the caller
//! carve the metadata subtree out of whatever envelope the host wrote
//! (e.g. `.generator.types[]`) before deserialization.

use anyhow::{anyhow, Context, Result};
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Run `expr` over one document; every value the filter yields becomes one
/// candidate document of its own.
pub fn apply_filter(expr: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: expr, path: () };

    let modules = loader.load(&arena, program).map_err(parse_failure)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(undefined_failure)?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut values = Vec::new();
    for item in outputs {
        let val = item.map_err(|e| anyhow!("jq evaluation failed: {e:?}"))?;
        let text = format!("{val}");
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("jq produced non-JSON output: {text}"))?;
        values.push(value);
    }
    Ok(values)
}

fn parse_failure(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> anyhow::Error {
    let lines = errs
        .iter()
        .map(|(file, err)| format!("jq parse error: {err:?} in `{}`", file.code))
        .collect::<Vec<_>>();
    anyhow!(lines.join("\n"))
}

fn undefined_failure(
    errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>,
) -> anyhow::Error {
    let mut lines = Vec::new();
    for (file, list) in errs {
        for (name, undef) in list {
            lines.push(format!("jq undefined `{name}`: {undef:?} in `{}`", file.code));
        }
    }
    anyhow!(lines.join("\n"))
}
