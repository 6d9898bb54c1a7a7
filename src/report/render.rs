//! Line formatting for report trees.

use crate::model::{BindingDeclaration, DeclarationKind, ModuleDeclaration};
use wirescope_core::core::key::{render_key, simplify_type};

/// Target length of abbreviated package names
pub const PACKAGE_LENGTH: usize = 20;

/// Shorten a dotted name to about `target` characters by cutting leading
/// segments down to their first letter, left to right. The last segment is
/// always kept whole.
///
/// `com.example.very.long.package.name` becomes `c.e.v.l.package.name`.
pub fn abbreviate(name: &str, target: usize) -> String {
    if name.len() < target {
        return name.to_string();
    }
    let segments: Vec<&str> = name.split('.').collect();
    let Some((last, leading)) = segments.split_last() else {
        return name.to_string();
    };
    if leading.is_empty() {
        return name.to_string();
    }

    let mut to_trim = name.len() as isize - target as isize;
    let mut parts: Vec<&str> = Vec::with_capacity(segments.len());
    for segment in leading {
        if to_trim > 0 {
            let cut = segment.char_indices().nth(1).map(|(i, _)| i).unwrap_or(segment.len());
            to_trim -= (segment.len() - cut) as isize;
            parts.push(&segment[..cut]);
        } else {
            parts.push(segment);
        }
    }
    parts.push(last);
    parts.join(".")
}

/// Abbreviated package
pub fn render_package(package: &str) -> String {
    abbreviate(package, PACKAGE_LENGTH)
}

pub fn brackets(text: &str) -> String {
    format!("({})", text)
}

/// Module line: `SimpleName (abbrev.package) *MARKERS`
pub fn module_line(module: &ModuleDeclaration) -> String {
    let line = format!(
        "{:<28} {:<26} {}",
        module.simple_name(),
        brackets(&render_package(module.package())),
        module.markers
    );
    line.trim_end().to_string()
}

/// Kind label, scope, element, source and markers in padded columns
pub fn declaration_line(dec: &BindingDeclaration) -> String {
    let scope = dec
        .scope_name()
        .map(|scope| format!("[@{}]", scope))
        .unwrap_or_default();
    let mut line = format!(
        "{:<20} {:<16} {:<45}   at {}",
        dec.kind().label(),
        scope,
        render_element(dec),
        dec.source.as_deref().unwrap_or("-")
    );
    if !dec.markers.is_empty() {
        line.push(' ');
        line.push_str(&dec.markers.to_string());
    }
    line
}

/// Undeclared binding line: element and abbreviated package
pub fn undeclared_line(dec: &BindingDeclaration) -> String {
    let package = dec.key().map(|k| k.package()).unwrap_or("-");
    let line = format!(
        "{:<28} {:<26}",
        render_element(dec),
        brackets(&render_package(package))
    );
    line.trim_end().to_string()
}

/// Rendered element of a declaration.
///
/// Keyless registrations show their special objects, linked keys show their
/// target, auxiliary data follows in brackets.
pub fn render_element(dec: &BindingDeclaration) -> String {
    if dec.key().is_none() && !dec.special.is_empty() {
        return dec
            .special
            .iter()
            .map(|s| simplify_type(s))
            .collect::<Vec<_>>()
            .join(",");
    }

    let mut res = render_key(dec.key());
    if dec.kind() == DeclarationKind::LinkedKey {
        if let Some(target) = dec.target() {
            res.push_str(" --> ");
            res.push_str(&target.render());
        }
    }
    if !dec.special.is_empty() {
        res.push_str(&format!(" ({})", dec.special.join(", ")));
    }
    res
}
