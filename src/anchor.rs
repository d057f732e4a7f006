//! Anchor gating: an optional ancestor name on the marker restricts
//! synthesis to types whose ancestor chain contains it.

/// True when synthesis may proceed. With no requested anchor every type
/// qualifies (own members only; ancestry is never pulled in). With one, the
/// chain is walked nearest-to-farthest looking for a simple-name match; a
/// miss means the type is skipped outright, never a partial contract.
pub fn anchor_allows(ancestor_chain: &[String], requested: Option<&str>) -> bool {
    let Some(wanted) = requested else {
        return true;
    };
    for ancestor in ancestor_chain {
        if ancestor == wanted {
            return true;
        }
    }
    false
}
