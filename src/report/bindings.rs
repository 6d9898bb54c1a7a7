//! Bindings report: the full diagnostic pipeline and its text sections.

use crate::analysis::{
    mark_disabled, mark_extensions, mark_overrides, BindingChain, BindingIndex, ChainResolver,
    DeclarationFilter, DeclarationSet, ImplicitDetector,
};
use crate::config::ReportConfig;
use crate::container::{ContainerContext, ContainerSnapshot, ContainerView};
use crate::model::{BindingDeclaration, ModuleDeclaration};
use crate::report::json::{to_json_report, JsonReport};
use crate::report::render::{declaration_line, module_line, undeclared_line};
use crate::report::tree::TreeNode;
use crate::spi::{Element, ModelParser};
use serde::Serialize;
use std::fmt;
use wirescope_core::{WireError, WireResult};

/// Everything the report consumes from the container side.
#[derive(Clone, Copy)]
pub struct ReportInput<'a> {
    /// Element stream of the primary modules
    pub modules: &'a [Element],
    /// Element stream of the overriding modules
    pub overriding_modules: &'a [Element],
    pub container: &'a dyn ContainerView,
    pub context: &'a ContainerContext,
}

impl ContainerSnapshot {
    /// Report input backed by this snapshot
    pub fn input(&self) -> ReportInput<'_> {
        ReportInput {
            modules: &self.modules,
            overriding_modules: &self.overriding_modules,
            container: self,
            context: &self.context,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    Modules,
    OverridingModules,
    Undeclared,
    Chains,
}

impl fmt::Display for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportSection::Modules => "modules",
            ReportSection::OverridingModules => "overriding modules",
            ReportSection::Undeclared => "undeclared bindings",
            ReportSection::Chains => "binding chains",
        };
        f.write_str(name)
    }
}

/// A section that could not be built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionFailure {
    pub section: ReportSection,
    pub message: String,
}

/// Analyzed container wiring, ready for rendering.
#[derive(Debug, Clone)]
pub struct BindingsReport {
    pub modules: DeclarationSet,
    pub overriding: DeclarationSet,
    /// Synthetic module of undeclared bindings
    pub undeclared: Option<ModuleDeclaration>,
    pub chains: Vec<BindingChain>,
    pub failures: Vec<SectionFailure>,
    show_undeclared: bool,
    show_chains: bool,
}

impl BindingsReport {
    /// Run the pipeline: filter, index, mark, merge, detect implicit
    /// bindings, resolve chains.
    ///
    /// A section failing with an internal error is logged and recorded in
    /// `failures`; the remaining sections are still built.
    pub fn build(input: ReportInput<'_>, config: &ReportConfig) -> Self {
        let context = input.context;
        let mut failures = Vec::new();
        let mut filter = DeclarationFilter::new(
            config.ignore_modules.iter().cloned(),
            config.ignore_packages.iter().cloned(),
        );
        // without analysis nothing was removed from the container
        if context.analysis_enabled {
            filter = filter.with_disabled_modules(context.disabled_modules.iter().cloned());
        }
        let parser =
            ModelParser::new(input.container).with_web_modules(context.web_modules.iter().cloned());

        let mut modules = section(
            &mut failures,
            ReportSection::Modules,
            parse_set(&parser, input.modules, &filter),
        )
        .unwrap_or_default();
        if context.analysis_enabled {
            mark_extensions(&mut modules, &context.extensions);
        }

        let mut overriding = if input.overriding_modules.is_empty() {
            DeclarationSet::default()
        } else {
            section(
                &mut failures,
                ReportSection::OverridingModules,
                parse_set(&parser, input.overriding_modules, &filter),
            )
            .unwrap_or_default()
        };
        mark_overrides(&mut modules, &mut overriding);

        if context.analysis_enabled {
            mark_disabled(&mut modules, &context.disabled_extensions);
            mark_disabled(&mut overriding, &context.disabled_extensions);
        }

        // merged only now: overriding entries must not shadow primary ones before marking
        let mut merged: BindingIndex = modules.to_binding_index();
        merged.merge(overriding.to_binding_index());

        let detector = ImplicitDetector::new(input.container);
        let undeclared = section(
            &mut failures,
            ReportSection::Undeclared,
            detector.resolve(&mut merged, &filter, &context.extensions),
        )
        .flatten();

        let chains = ChainResolver::new(&merged, input.container).resolve_all();

        tracing::debug!(
            modules = modules.module_count(),
            bindings = modules.binding_count(),
            overriding = overriding.module_count(),
            undeclared = undeclared.as_ref().map(|m| m.declarations.len()).unwrap_or(0),
            chains = chains.len(),
            failures = failures.len(),
            "Built bindings report"
        );

        Self {
            modules,
            overriding,
            undeclared,
            chains,
            failures,
            show_undeclared: config.show_undeclared,
            show_chains: config.show_chains,
        }
    }

    fn failed(&self, section: ReportSection) -> bool {
        self.failures.iter().any(|f| f.section == section)
    }

    /// Declarations of the undeclared bindings section
    pub fn undeclared_bindings(&self) -> &[BindingDeclaration] {
        self.undeclared
            .as_ref()
            .map(|m| m.declarations.as_slice())
            .unwrap_or(&[])
    }

    /// Rendered sections in report order. Empty and failed sections are left out.
    pub fn render_sections(&self) -> Vec<(ReportSection, String)> {
        let mut res = Vec::new();

        if !self.failed(ReportSection::Modules) {
            let mut root = TreeNode::new(format!(
                "{} MODULES with {} bindings",
                self.modules.module_count(),
                self.modules.binding_count()
            ));
            for module in self.modules.modules() {
                render_module(&mut root, module);
            }
            res.push((ReportSection::Modules, root.render()));
        }

        if !self.overriding.is_empty() {
            let mut root = TreeNode::new(format!(
                "{} OVERRIDING MODULES with {} bindings",
                self.overriding.module_count(),
                self.overriding.binding_count()
            ));
            for module in self.overriding.modules() {
                render_module(&mut root, module);
            }
            if root.has_children() {
                res.push((ReportSection::OverridingModules, root.render()));
            }
        }

        let undeclared = self.undeclared_bindings();
        if self.show_undeclared && !undeclared.is_empty() {
            let mut root = TreeNode::new(format!("{} UNDECLARED bindings", undeclared.len()));
            for dec in undeclared {
                root.child(undeclared_line(dec));
            }
            res.push((ReportSection::Undeclared, root.render()));
        }

        if self.show_chains && !self.chains.is_empty() {
            let mut root = TreeNode::new("BINDING CHAINS");
            for chain in &self.chains {
                root.child(chain.to_string());
            }
            res.push((ReportSection::Chains, root.render()));
        }

        res
    }

    /// Full text report, sections separated by a blank line
    pub fn render(&self) -> String {
        self.render_sections()
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json(&self) -> JsonReport {
        to_json_report(self)
    }

    /// Fail when any section could not be built
    pub fn ensure_complete(&self) -> WireResult<()> {
        match self.failures.first() {
            None => Ok(()),
            Some(failure) => Err(WireError::Report(format!(
                "{} section skipped: {}",
                failure.section, failure.message
            ))),
        }
    }
}

fn parse_set(
    parser: &ModelParser<'_>,
    elements: &[Element],
    filter: &DeclarationFilter,
) -> WireResult<DeclarationSet> {
    let mut modules = parser.parse(elements)?;
    filter.apply(&mut modules);
    Ok(DeclarationSet::new(modules))
}

/// Unwrap a section result, recording the failure.
fn section<T>(
    failures: &mut Vec<SectionFailure>,
    section: ReportSection,
    result: WireResult<T>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(section = %section, error = %e, "Report section skipped");
            failures.push(SectionFailure {
                section,
                message: e.to_string(),
            });
            None
        }
    }
}

fn render_module(root: &mut TreeNode, module: &ModuleDeclaration) {
    let node = root.child(module_line(module));
    for dec in module.declarations.iter().filter(|d| !d.is_synthetic()) {
        node.child(declaration_line(dec));
    }
    for child in &module.children {
        render_module(node, child);
    }
}
