use crate::analysis::{BindingChain, DeclarationSet};
use crate::model::{BindingDeclaration, ModuleDeclaration};
use crate::report::bindings::{BindingsReport, SectionFailure};
use crate::report::render::render_element;
use serde::Serialize;

/// JSON-serializable report format.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub modules: JsonTree,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overriding_modules: Option<JsonTree>,
    pub undeclared: Vec<JsonUndeclared>,
    pub chains: Vec<JsonChain>,
    pub failures: Vec<SectionFailure>,
}

#[derive(Debug, Serialize)]
pub struct JsonTree {
    pub module_count: usize,
    pub binding_count: usize,
    pub modules: Vec<ModuleDeclaration>,
}

#[derive(Debug, Serialize)]
pub struct JsonUndeclared {
    pub key: String,
    pub kind: String,
    pub element: String,
}

#[derive(Debug, Serialize)]
pub struct JsonChain {
    pub text: String,
    #[serde(flatten)]
    pub chain: BindingChain,
}

fn to_json_tree(set: &DeclarationSet) -> JsonTree {
    JsonTree {
        module_count: set.module_count(),
        binding_count: set.binding_count(),
        modules: set.modules().to_vec(),
    }
}

fn to_json_undeclared(dec: &BindingDeclaration) -> JsonUndeclared {
    JsonUndeclared {
        key: dec.key().map(|k| k.to_string()).unwrap_or_default(),
        kind: dec.kind().name().to_string(),
        element: render_element(dec),
    }
}

/// Convert a BindingsReport to a JSON-serializable format.
///
/// Unlike the text form, hidden sections are included: consumers filter
/// for themselves.
pub fn to_json_report(report: &BindingsReport) -> JsonReport {
    JsonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        modules: to_json_tree(&report.modules),
        overriding_modules: (!report.overriding.is_empty()).then(|| to_json_tree(&report.overriding)),
        undeclared: report
            .undeclared_bindings()
            .iter()
            .map(to_json_undeclared)
            .collect(),
        chains: report
            .chains
            .iter()
            .map(|chain| JsonChain {
                text: chain.to_string(),
                chain: chain.clone(),
            })
            .collect(),
        failures: report.failures.clone(),
    }
}
