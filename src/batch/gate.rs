use crate::document::model::{Container, TAG_TRUE};

/// Whether `container` was produced by an earlier run for `purpose_tag`.
///
/// True iff the tag is present with the exact value `"true"`.
pub fn is_previously_processed(container: &Container, purpose_tag: &str) -> bool {
    container
        .tags
        .get(purpose_tag)
        .is_some_and(|v| v == TAG_TRUE)
}

/// Mark `container` so later passes gated on `purpose_tag` skip it.
pub fn mark_processed(container: &mut Container, purpose_tag: &str) {
    container.tag(purpose_tag, TAG_TRUE);
}

#[cfg(test)]
#[path = "../../tests/unit/batch/gate.rs"]
mod tests;
