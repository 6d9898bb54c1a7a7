//! Extension and disablement classification.

use crate::analysis::index::DeclarationSet;
use crate::model::{DeclarationKind, Marker};
use std::collections::HashSet;
use wirescope_core::BindingKey;

/// Mark indexed declarations whose key raw type is a registered extension.
pub fn mark_extensions(set: &mut DeclarationSet, extensions: &[String]) -> usize {
    if extensions.is_empty() {
        return 0;
    }
    let types: HashSet<&str> = extensions.iter().map(String::as_str).collect();
    let keys: Vec<BindingKey> = set
        .index()
        .keys()
        .filter(|key| types.contains(key.raw_type()))
        .cloned()
        .collect();

    for key in &keys {
        if let Some(dec) = set.get_mut(key) {
            dec.markers.insert(Marker::Extension);
        }
    }
    keys.len()
}

/// Mark declarations of disabled extensions `REMOVED`. Linked keys are also
/// removed when their target is disabled.
pub fn mark_disabled(set: &mut DeclarationSet, disabled: &[String]) -> usize {
    if disabled.is_empty() {
        return 0;
    }
    let types: HashSet<&str> = disabled.iter().map(String::as_str).collect();
    let mut marked = 0;
    set.mark_each(&mut |dec| {
        let by_key = dec.key().is_some_and(|k| types.contains(k.raw_type()));
        let by_target = dec.kind() == DeclarationKind::LinkedKey
            && dec.target().is_some_and(|t| types.contains(t.raw_type()));
        if by_key || by_target {
            dec.markers.insert(Marker::Removed);
            marked += 1;
        }
    });
    marked
}
