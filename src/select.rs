//! Member selection: filter the host's member list down to what belongs in
//! the contract, preserving declaration order, then drop repeated signatures
//! (first occurrence wins).

use indexmap::IndexSet;

use crate::model::{Member, MemberKind};
use crate::render::render;

/// Filtering rules, all required for inclusion:
/// - no per-member exclusion marker
/// - not compiler-synthesized
/// - not static
/// - public, or a property with at least one public accessor
/// - renderable member shape (events and indexers are skipped silently)
pub fn select_members(members: &[Member]) -> Vec<&Member> {
    let mut seen = IndexSet::<String>::new();
    let mut out = Vec::new();

    for member in members {
        if member.excluded || member.synthesized || member.is_static {
            continue;
        }

        match &member.kind {
            MemberKind::Event | MemberKind::Indexer => continue,
            MemberKind::Property { public_get, public_set, .. } => {
                if !member.is_public && !public_get && !public_set {
                    continue;
                }
            }
            MemberKind::Method { .. } => {
                if !member.is_public {
                    continue;
                }
            }
        }

        if seen.insert(signature_key(member)) {
            out.push(member);
        }
    }

    out
}

/// Identity for deduplication: bare name for properties, name plus the
/// rendered parameter-type list for methods (overloads stay distinct).
pub fn signature_key(member: &Member) -> String {
    match &member.kind {
        MemberKind::Method { params, .. } => {
            let types = params.iter().map(|p| render(&p.shape)).collect::<Vec<_>>();
            format!("{}({})", member.name, types.join(","))
        }
        _ => member.name.clone(),
    }
}
