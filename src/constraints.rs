//! Generic-parameter constraint rendering.
//!
//! Term order is fixed so repeated runs emit byte-identical text:
//! `class`/`struct` first, then `notnull`, `unmanaged`, the named constraint
//! types in declared order, and `new()` last.

use crate::keywords;
use crate::model::ConstraintSet;
use crate::render::render;

/// `where <name> : <terms>` or the empty string when unconstrained.
pub fn render_constraints(param_name: &str, constraints: &ConstraintSet) -> String {
    if constraints.is_empty() {
        return String::new();
    }

    let mut terms: Vec<String> = Vec::new();

    if constraints.reference_type {
        terms.push("class".to_string());
    } else if constraints.value_type {
        terms.push("struct".to_string());
    }

    if constraints.not_null {
        terms.push("notnull".to_string());
    }

    if constraints.unmanaged {
        terms.push("unmanaged".to_string());
    }

    for ty in &constraints.types {
        terms.push(render(ty));
    }

    if constraints.constructor_required {
        terms.push("new()".to_string());
    }

    format!("where {} : {}", keywords::escape(param_name), terms.join(", "))
}
