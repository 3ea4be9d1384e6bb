//! End-to-end expansion of fixture modules

use dm_macro::{MacroExpansionError, MetaField};
use dm_span::Span;
use dm_transform::{TransformError, TransformReport};
use expect_test::expect;
use integration_tests::Fixture;

const APP: &str = include_str!("fixtures/app.json");
const UNSUPPORTED_FLAG: &str = include_str!("fixtures/unsupported_flag.json");
const CONSOLE: &str = include_str!("fixtures/console.toml");
const GLOBAL: &str = include_str!("fixtures/global.toml");
const LOCAL: &str = include_str!("fixtures/local.toml");

fn expand(module: &str, config: &str) -> (String, TransformReport) {
    Fixture::parse(module, config)
        .expect("Fixture should parse")
        .expand()
        .expect("Fixture should expand")
}

#[test]
fn test_console_helpers() {
    let (output, report) = expand(APP, CONSOLE);

    assert_eq!(
        report,
        TransformReport {
            expanded: 4,
            constants: 3,
            removed_imports: 1,
            binding: Some("DEBUG".to_string()),
        }
    );
    expect![[r#"
        const DEBUG = 1;
        const FEATURE_OUTLET = 1;
        const routing = 0;
        (DEBUG && owner && console.assert(owner, "an owner is required"));
        (DEBUG && destroyedMessage && console.assert(owner.isDestroyed(), destroyedMessage));
        (DEBUG && console.warn("rendering took too long"));
        (DEBUG && usesPrivateRouter && console.warn("DEPRECATED [ember-routing.private-router]: Use the router service instead. Will be removed in 4.0.0. See https://emberjs.com/deprecations for more information."));
        boot(FEATURE_OUTLET, routing);
    "#]]
    .assert_eq(&output);
}

#[test]
fn test_global_helpers_guard_predicate_only() {
    let (output, report) = expand(APP, GLOBAL);

    assert_eq!(report.expanded, 4);
    assert_eq!(report.removed_imports, 1);
    expect![[r#"
        const DEBUG = 0;
        const FEATURE_OUTLET = 1;
        const routing = 0;
        (DEBUG && owner && Ember.assert(owner, "an owner is required"));
        (DEBUG && Ember.assert(owner.isDestroyed(), destroyedMessage));
        (DEBUG && Ember.warn("rendering took too long"));
        (DEBUG && usesPrivateRouter && Ember.deprecate("DEPRECATED [ember-routing.private-router]: Use the router service instead. Will be removed in 4.0.0. See https://emberjs.com/deprecations for more information."));
        boot(FEATURE_OUTLET, routing);
    "#]]
    .assert_eq(&output);
}

#[test]
fn test_local_helpers_without_assert_guards() {
    let (output, report) = expand(APP, LOCAL);

    assert_eq!(report.removed_imports, 0);
    expect![[r#"
        const DEBUG = 1;
        const FEATURE_OUTLET = 1;
        const routing = 1;
        import { assert, warn, deprecate } from "@ember/debug-tools";
        (DEBUG && assert(owner, "an owner is required"));
        (DEBUG && assert(owner.isDestroyed(), destroyedMessage));
        (DEBUG && warn("rendering took too long"));
        (DEBUG && usesPrivateRouter && deprecate("DEPRECATED [ember-routing.private-router]: Use the router service instead. Will be removed in 4.0.0. See https://emberjs.com/deprecations for more information."));
        boot(FEATURE_OUTLET, routing);
    "#]]
    .assert_eq(&output);
}

#[test]
fn test_deprecation_without_url() {
    let module = APP.replace(
        r#"{ "key": "url", "value": { "type": "literal", "value": "https://emberjs.com/deprecations" } }"#,
        r#"{ "key": "url", "value": { "type": "literal", "value": "" } }"#,
    );
    assert_ne!(module, APP);

    let (output, _) = expand(&module, CONSOLE);
    assert!(output.contains(
        r#"console.warn("DEPRECATED [ember-routing.private-router]: Use the router service instead. Will be removed in 4.0.0."));"#
    ));
}

#[test]
fn test_missing_until_is_reported() {
    let module = APP.replace(r#""key": "until""#, r#""key": "since""#);
    assert_ne!(module, APP);

    let error = Fixture::parse(&module, CONSOLE)
        .expect("Fixture should parse")
        .expand()
        .expect_err("Expansion should fail");

    match error {
        TransformError::Macro { source, span } => {
            assert_eq!(span, Span::new(316, 480));
            assert_eq!(
                source,
                MacroExpansionError::MissingMetadata {
                    kind: dm_macro::MacroKind::Deprecate,
                    field: MetaField::Until,
                    id: Some("ember-routing.private-router".to_string()),
                }
            );
            assert_eq!(
                source.to_string(),
                "deprecate's meta information requires an \"until\" field."
            );
        }
        other => panic!("Expected missing metadata, found {other:?}"),
    }
}

#[test]
fn test_unsupported_flag() {
    let error = Fixture::parse(UNSUPPORTED_FLAG, CONSOLE)
        .expect("Fixture should parse")
        .expand()
        .expect_err("Expansion should fail");

    assert_eq!(error.to_string(), "macro expansion failed at 0..66");
    let TransformError::Macro { source, .. } = error else {
        panic!("Expected a macro expansion error");
    };
    assert_eq!(
        source.to_string(),
        "Imported FEATURE_TELEPORT from @ember/features which is not a supported flag."
    );
}

#[test]
fn test_flag_imports_without_macros() {
    let module = r#"{
        "body": [
            {
                "type": "import",
                "specifiers": [{ "imported": "FEATURE_ROUTING" }],
                "source": "@ember/features"
            },
            {
                "type": "expression",
                "expression": {
                    "type": "call",
                    "callee": { "type": "identifier", "name": "route" },
                    "arguments": [{ "type": "identifier", "name": "FEATURE_ROUTING" }]
                }
            }
        ]
    }"#;

    let (output, report) = expand(module, CONSOLE);
    assert_eq!(report.binding, None);
    assert_eq!(report.constants, 1);
    expect![[r#"
        const FEATURE_ROUTING = 0;
        route(FEATURE_ROUTING);
    "#]]
    .assert_eq(&output);
}
