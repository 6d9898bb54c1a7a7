use crate::analysis::index::DeclarationSet;
use crate::model::Marker;
use wirescope_core::BindingKey;

/// Mark every key bound in both sets: `OVERRIDDEN` on the primary
/// declaration, `OVERRIDE` on the overriding one. Returns the number of
/// overridden keys.
///
/// Probes the smaller index against the larger one.
pub fn mark_overrides(primary: &mut DeclarationSet, overriding: &mut DeclarationSet) -> usize {
    let (small, large) = if primary.index().len() <= overriding.index().len() {
        (primary.index(), overriding.index())
    } else {
        (overriding.index(), primary.index())
    };
    let shared: Vec<BindingKey> = small
        .keys()
        .filter(|key| large.contains_key(key))
        .cloned()
        .collect();

    for key in &shared {
        if let Some(dec) = primary.get_mut(key) {
            dec.markers.insert(Marker::Overridden);
        }
        if let Some(dec) = overriding.get_mut(key) {
            dec.markers.insert(Marker::Override);
        }
    }
    tracing::debug!(overridden = shared.len(), "Marked overrides");
    shared.len()
}
