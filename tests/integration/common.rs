//! Common utilities for integration tests

use std::process::Command;
use wirescope::container::mocks::MockContainer;
use wirescope::container::ContainerContext;
use wirescope::spi::{BindingTarget, Element, ElementSource, RawBinding};
use wirescope::BindingKey;

pub const APP_MODULE: &str = "com.app.AppModule";
pub const TEST_MODULE: &str = "com.app.TestModule";

pub fn wirescope_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wirescope"))
}

pub fn key(name: &str) -> BindingKey {
    BindingKey::new(name)
}

/// Source in `module`, declared at `line` of its configure method
pub fn source(module: &str, line: u32) -> ElementSource {
    let simple = module.rsplit('.').next().unwrap_or(module);
    ElementSource::new(
        format!("{}.configure({}.java:{})", module, simple, line),
        [module],
    )
}

pub fn linked(module: &str, line: u32, from: &str, to: &str) -> Element {
    Element::Binding(RawBinding::linked(key(from), key(to)).at(source(module, line)))
}

pub fn instance(module: &str, line: u32, name: &str) -> Element {
    Element::Binding(RawBinding::new(key(name), BindingTarget::Instance).at(source(module, line)))
}

pub fn jit(name: &str) -> RawBinding {
    RawBinding::new(key(name), BindingTarget::Constructor).just_in_time()
}

/// Live container for the `Service -> ServiceImpl` application
pub fn service_container() -> MockContainer {
    MockContainer::new().with_bindings([
        RawBinding::linked(key("com.app.Service"), key("com.app.ServiceImpl")),
        RawBinding::new(key("com.app.ServiceImpl"), BindingTarget::Instance),
    ])
}

pub fn context() -> ContainerContext {
    ContainerContext::default()
}

/// Snapshot file contents for CLI tests
pub const SNAPSHOT_YAML: &str = r#"
modules:
  - element: binding
    key: com.app.Service
    target: { kind: linked_key, linked: com.app.ServiceImpl }
    source:
      declaring: com.app.AppModule.configure(AppModule.java:12)
      modules: [com.app.AppModule]
  - element: binding
    key: com.app.Repository
    target: { kind: linked_key, linked: com.app.MissingRepository }
    source:
      declaring: com.app.AppModule.configure(AppModule.java:13)
      modules: [com.app.AppModule]
overriding_modules:
  - element: binding
    key: com.app.Service
    target: { kind: linked_key, linked: com.app.MockServiceImpl }
    source:
      declaring: com.app.TestModule.configure(TestModule.java:5)
      modules: [com.app.TestModule]
bindings:
  - key: com.app.Service
    target: { kind: linked_key, linked: com.app.MockServiceImpl }
  - key: com.app.Repository
    target: { kind: linked_key, linked: com.app.MissingRepository }
  - key: com.app.MockServiceImpl
    target: { kind: constructor }
    just_in_time: true
  - key: com.app.Clock
    target: { kind: constructor }
    just_in_time: true
"#;
