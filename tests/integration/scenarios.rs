//! Report pipeline scenarios

use super::common::{
    context, instance, jit, key, linked, service_container, APP_MODULE, TEST_MODULE,
};
use wirescope::analysis::{ChainEnd, ImplicitDetector};
use wirescope::config::ReportConfig;
use wirescope::container::mocks::MockContainer;
use wirescope::container::ContainerContext;
use wirescope::model::{visit_bindings, visit_modules, Marker};
use wirescope::report::{BindingsReport, ReportInput, ReportSection};
use wirescope::spi::{BindingTarget, Element, ElementSource, RawBinding};

fn primary_elements() -> Vec<Element> {
    vec![
        linked(APP_MODULE, 10, "com.app.Service", "com.app.ServiceImpl"),
        instance(APP_MODULE, 11, "com.app.ServiceImpl"),
    ]
}

fn build(
    modules: &[Element],
    overriding: &[Element],
    container: &MockContainer,
    context: &ContainerContext,
    config: &ReportConfig,
) -> BindingsReport {
    let input = ReportInput {
        modules,
        overriding_modules: overriding,
        container,
        context,
    };
    BindingsReport::build(input, config)
}

fn section(report: &BindingsReport, section: ReportSection) -> Option<String> {
    report
        .render_sections()
        .into_iter()
        .find(|(s, _)| *s == section)
        .map(|(_, text)| text)
}

#[test]
fn test_linked_chain_to_terminal_binding() {
    let container = service_container();
    let report = build(
        &primary_elements(),
        &[],
        &container,
        &context(),
        &ReportConfig::default(),
    );

    assert!(report.failures.is_empty());
    let lines: Vec<String> = report.chains.iter().map(ToString::to_string).collect();
    assert_eq!(lines, vec!["Service --[linked]--> ServiceImpl"]);
    assert_eq!(report.chains[0].end, ChainEnd::Complete);
    assert!(report.undeclared.is_none());

    let modules = section(&report, ReportSection::Modules).unwrap();
    assert!(modules.starts_with("    1 MODULES with 2 bindings\n"));
    assert!(modules.contains("AppModule"));
}

#[test]
fn test_override_markers() {
    let container = MockContainer::new().with_bindings([
        RawBinding::linked(key("com.app.Service"), key("com.app.MockServiceImpl")),
        RawBinding::new(key("com.app.ServiceImpl"), BindingTarget::Instance),
        jit("com.app.MockServiceImpl"),
    ]);
    let overriding = vec![linked(
        TEST_MODULE,
        5,
        "com.app.Service",
        "com.app.MockServiceImpl",
    )];
    let report = build(
        &primary_elements(),
        &overriding,
        &container,
        &context(),
        &ReportConfig::default(),
    );

    let service = key("com.app.Service");
    let primary = report.modules.get(&service).unwrap();
    assert!(primary.markers.contains(Marker::Overridden));
    assert!(!primary.markers.contains(Marker::Override));
    let replacement = report.overriding.get(&service).unwrap();
    assert!(replacement.markers.contains(Marker::Override));

    let overriding_tree = section(&report, ReportSection::OverridingModules).unwrap();
    assert!(overriding_tree.starts_with("    1 OVERRIDING MODULES with 1 bindings\n"));
    let line = overriding_tree
        .lines()
        .find(|l| l.contains("MockServiceImpl"))
        .unwrap();
    assert!(line.ends_with("*OVERRIDE"));

    let primary_tree = section(&report, ReportSection::Modules).unwrap();
    let line = primary_tree
        .lines()
        .find(|l| l.contains("Service --> ServiceImpl"))
        .unwrap();
    assert!(line.ends_with("*OVERRIDDEN"));

    // the overriding declaration wins in the merged index
    let lines: Vec<String> = report.chains.iter().map(ToString::to_string).collect();
    assert_eq!(lines, vec!["Service --[linked]--> MockServiceImpl"]);
}

#[test]
fn test_undeclared_binding_reported() {
    let container = service_container().with_binding(jit("com.app.Clock"));
    let report = build(
        &primary_elements(),
        &[],
        &container,
        &context(),
        &ReportConfig::default(),
    );

    let undeclared = report.undeclared_bindings();
    assert_eq!(undeclared.len(), 1);
    assert_eq!(undeclared[0].key(), Some(&key("com.app.Clock")));

    let text = section(&report, ReportSection::Undeclared).unwrap();
    assert!(text.starts_with("    1 UNDECLARED bindings\n"));
    assert!(text.contains(&format!("└── {:<28} (com.app)", "Clock")));
}

#[test]
fn test_undeclared_detection_is_idempotent() {
    let container = service_container().with_binding(jit("com.app.Clock"));
    let report = build(
        &primary_elements(),
        &[],
        &container,
        &context(),
        &ReportConfig::default(),
    );
    let mut merged = report.modules.to_binding_index();
    let filter = wirescope::analysis::DeclarationFilter::new(Vec::<String>::new(), Vec::<String>::new());
    let detector = ImplicitDetector::new(&container);

    let first = detector.resolve(&mut merged, &filter, &[]).unwrap();
    assert_eq!(first.map(|m| m.declarations.len()), Some(1));
    let second = detector.resolve(&mut merged, &filter, &[]).unwrap();
    assert!(second.is_none());
}

#[test]
fn test_missing_link_target_removes_chain() {
    let container = MockContainer::new()
        .with_binding(RawBinding::linked(key("com.app.A"), key("com.app.B")));
    let elements = vec![linked(APP_MODULE, 3, "com.app.A", "com.app.B")];
    let report = build(
        &elements,
        &[],
        &container,
        &context(),
        &ReportConfig::default(),
    );

    let lines: Vec<String> = report.chains.iter().map(ToString::to_string).collect();
    assert_eq!(lines, vec!["A --[linked]--> B       *CHAIN REMOVED"]);
    assert_eq!(report.chains[0].end, ChainEnd::Removed);
    assert_eq!(container.lookups().last(), Some(&key("com.app.B")));
}

#[test]
fn test_ignored_packages_and_modules_are_hidden() {
    let elements = vec![
        linked(APP_MODULE, 10, "com.app.Service", "com.app.ServiceImpl"),
        instance(APP_MODULE, 11, "org.lib.Helper"),
        instance("org.lib.LibModule", 1, "org.lib.Thing"),
        Element::Binding(
            RawBinding::new(key("com.app.Db"), BindingTarget::Instance).at(ElementSource::new(
                "com.app.DbModule.configure(DbModule.java:4)",
                ["com.app.DbModule", APP_MODULE],
            )),
        ),
    ];
    let container = MockContainer::new();
    let config = ReportConfig {
        ignore_modules: vec!["com.app.DbModule".to_string()],
        ignore_packages: vec!["org.lib".to_string()],
        ..Default::default()
    };
    let report = build(&elements, &[], &container, &context(), &config);

    let mut module_types = Vec::new();
    visit_modules(report.modules.modules(), &mut |m| module_types.push(m.type_name.clone()));
    assert_eq!(module_types, vec![APP_MODULE.to_string()]);

    let mut keys = Vec::new();
    visit_bindings(report.modules.modules(), &mut |d| {
        if let Some(k) = d.key() {
            keys.push(k.raw_type().to_string());
        }
    });
    assert_eq!(keys, vec!["com.app.Service".to_string()]);
}

#[test]
fn test_disabled_module_marked_removed() {
    let elements = vec![
        linked(APP_MODULE, 10, "com.app.Service", "com.app.ServiceImpl"),
        instance("com.app.LegacyModule", 2, "com.app.Legacy"),
    ];
    let container = MockContainer::new();
    let context = ContainerContext {
        disabled_modules: vec!["com.app.LegacyModule".to_string()],
        ..Default::default()
    };
    let report = build(&elements, &[], &container, &context, &ReportConfig::default());

    let legacy = report
        .modules
        .modules()
        .iter()
        .find(|m| m.type_name == "com.app.LegacyModule")
        .unwrap();
    assert!(legacy.markers.contains(Marker::Removed));
    assert!(legacy.declarations.is_empty());
    assert!(report.modules.get(&key("com.app.Legacy")).is_none());

    let text = section(&report, ReportSection::Modules).unwrap();
    assert!(text.lines().any(|l| l.contains("LegacyModule") && l.ends_with("*REMOVED")));
}

#[test]
fn test_failed_section_does_not_hide_others() {
    // DbModule is reached through two different parents
    let elements = vec![
        Element::Binding(
            RawBinding::new(key("com.app.A"), BindingTarget::Instance)
                .at(ElementSource::new("a(A.java:1)", ["com.app.DbModule", APP_MODULE])),
        ),
        Element::Binding(
            RawBinding::new(key("com.app.B"), BindingTarget::Instance)
                .at(ElementSource::new("b(B.java:1)", ["com.app.DbModule", "com.app.Other"])),
        ),
    ];
    let overriding = vec![linked(TEST_MODULE, 5, "com.app.Service", "com.app.MockServiceImpl")];
    let container = MockContainer::new().with_binding(jit("com.app.MockServiceImpl"));
    let report = build(
        &elements,
        &overriding,
        &container,
        &context(),
        &ReportConfig::default(),
    );

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].section, ReportSection::Modules);
    let sections: Vec<ReportSection> = report
        .render_sections()
        .into_iter()
        .map(|(s, _)| s)
        .collect();
    assert_eq!(
        sections,
        vec![ReportSection::OverridingModules, ReportSection::Chains]
    );
    assert!(report.ensure_complete().is_err());
}

#[test]
fn test_provider_bindings_not_reported_as_undeclared() {
    let provider = key("com.google.inject.Provider").with_type_args(["com.app.Service"]);
    let container = service_container().with_binding(
        RawBinding::new(
            provider.clone(),
            BindingTarget::Provider {
                provided: key("com.app.Service"),
            },
        )
        .just_in_time(),
    );
    let report = build(
        &primary_elements(),
        &[],
        &container,
        &context(),
        &ReportConfig::default(),
    );

    assert!(report.undeclared_bindings().is_empty());
    assert!(section(&report, ReportSection::Undeclared).is_none());
    assert!(!report.render().contains("UNDECLARED"));
}

#[test]
fn test_web_module_mappings() {
    const WEB_MODULE: &str = "com.app.WebModule";
    let mut elements = primary_elements();
    elements.push(Element::Binding(
        RawBinding::new(
            key("com.google.inject.servlet.FilterDefinition"),
            BindingTarget::FilterKey {
                pattern: "/api/*".to_string(),
                filter: key("com.app.AuthFilter"),
            },
        )
        .at(ElementSource::new(
            "com.app.WebModule.configureServlets(WebModule.java:7)",
            [WEB_MODULE, APP_MODULE],
        )),
    ));
    let container = service_container().with_binding(jit("com.app.AuthFilter"));
    let context = ContainerContext {
        web_modules: vec![WEB_MODULE.to_string()],
        ..Default::default()
    };
    let report = build(&elements, &[], &container, &context, &ReportConfig::default());

    let text = section(&report, ReportSection::Modules).unwrap();
    assert!(text.lines().any(|l| l.contains("WebModule") && l.ends_with("*WEB")));
    assert!(text
        .lines()
        .any(|l| l.contains("<filterkey>") && l.contains("AuthFilter (/api/*)")));
    // the filter type is declared by its mapping
    assert!(report.undeclared_bindings().is_empty());
}
