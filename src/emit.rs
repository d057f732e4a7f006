//! Declaration emitter: one annotated type in, one contract artifact out.
//!
//! Orchestrates the whole pass: anchor gate → member selection → name and
//! constraint rendering → ordered-append assembly. The builder lives and dies
//! inside one `emit` call; output for a fixed input is byte-identical across
//! runs.

use crate::anchor::anchor_allows;
use crate::constraints::render_constraints;
use crate::keywords;
use crate::model::{
    Accessibility, AnnotatedType, EmittedContract, Member, MemberKind, Param, PassingMode,
    TypeParam,
};
use crate::render::render;
use crate::select::select_members;

/// Synthesize the contract declaration for one annotated type.
/// `None` means the type was gated out by its anchor; that is a silent skip
/// and never affects other candidates.
pub fn emit(ty: &AnnotatedType) -> Option<EmittedContract> {
    if !anchor_allows(&ty.ancestor_chain, ty.anchor.as_deref()) {
        return None;
    }

    let mut out = String::new();

    if !ty.namespace.is_empty() {
        out.push_str(&format!("namespace {};\n\n", ty.namespace));
    }
    out.push_str("#nullable enable\n");

    // Declared accessibility collapses to the two the contract can carry.
    let accessibility = match ty.accessibility {
        Accessibility::Public => "public",
        _ => "internal",
    };

    out.push_str(&format!(
        "{accessibility} partial interface I{}{}\n",
        ty.name,
        type_param_list(&ty.type_params),
    ));

    // The contract carries the type's own parameters, so their constraints
    // ride along as indented `where` lines above the body.
    for tp in &ty.type_params {
        let rendered = render_constraints(&tp.name, &tp.constraints);
        if !rendered.is_empty() {
            out.push_str(&format!("    {rendered}\n"));
        }
    }

    out.push_str("{\n");
    for member in select_members(&ty.members) {
        emit_member(&mut out, member);
    }
    out.push_str("}\n");

    Some(EmittedContract { artifact_key: format!("I{}", ty.name), text: out })
}

fn emit_member(out: &mut String, member: &Member) {
    match &member.kind {
        MemberKind::Property { shape, public_get, public_set } => {
            let mut accessors = String::new();
            if *public_get {
                accessors.push_str("get; ");
            }
            if *public_set {
                accessors.push_str("set; ");
            }
            out.push_str(&format!(
                "    {} {} {{ {accessors}}}\n",
                render(shape),
                member.name,
            ));
        }
        MemberKind::Method { return_shape, type_params, params } => {
            let rendered_params =
                params.iter().map(render_param).collect::<Vec<_>>().join(", ");

            let mut constraints = String::new();
            for tp in type_params {
                let rendered = render_constraints(&tp.name, &tp.constraints);
                if !rendered.is_empty() {
                    constraints.push(' ');
                    constraints.push_str(&rendered);
                }
            }

            out.push_str(&format!(
                "    {} {}{}({rendered_params}){constraints};\n",
                render(return_shape),
                member.name,
                type_param_list(type_params),
            ));
        }
        // Not renderable in a contract; the selector already dropped them.
        MemberKind::Event | MemberKind::Indexer => {}
    }
}

fn render_param(param: &Param) -> String {
    let mut s = String::new();

    if let Some(when) = param.maybe_null_when {
        s.push_str(&format!(
            "[global::System.Diagnostics.CodeAnalysis.MaybeNullWhen({when})] "
        ));
    }

    if let Some(keyword) = passing_keyword(param.passing) {
        s.push_str(keyword);
        s.push(' ');
    }

    s.push_str(&render(&param.shape));
    s.push(' ');
    s.push_str(&keywords::escape(&param.name));

    if let Some(default) = &param.default_value {
        s.push_str(&format!(" = {default}"));
    }

    s
}

fn passing_keyword(mode: PassingMode) -> Option<&'static str> {
    match mode {
        PassingMode::Value => None,
        PassingMode::Ref => Some("ref"),
        PassingMode::Out => Some("out"),
        PassingMode::In => Some("in"),
    }
}

fn type_param_list(type_params: &[TypeParam]) -> String {
    if type_params.is_empty() {
        return String::new();
    }
    let names = type_params
        .iter()
        .map(|tp| keywords::escape(&tp.name).into_owned())
        .collect::<Vec<_>>();
    format!("<{}>", names.join(", "))
}

// ------------------------------- Tests ------------------------------------ //
