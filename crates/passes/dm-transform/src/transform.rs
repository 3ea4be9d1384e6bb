//! Module pass: import scanning, macro recognition and expansion

use crate::config::{DEBUG_FLAG, MacroConfig};
use crate::error::TransformError;
use dm_macro::{
    DeprecateArgs, ExpansionQueue, HelperConfig, MacroBuilder, MacroKind, debug_flag,
    flag_constants,
};
use dm_span::Span;
use dm_syntax::{CallSite, Expr, Module, Stmt, StmtId, StmtKind};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// Summary of one module transform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Macro call sites rewritten
    pub expanded: usize,
    /// Flag constants emitted, including an injected `DEBUG`
    pub constants: usize,
    /// Debug tools imports dropped
    pub removed_imports: usize,
    /// Name the expansions were gated on, when any were made
    pub binding: Option<String>,
}

/// What the import declarations of a module tell the pass
#[derive(Debug, Default)]
struct ImportScan {
    /// Local name of an imported `DEBUG`
    binding: Option<String>,
    /// Flag imports and the constants replacing them
    flag_imports: Vec<(StmtId, Vec<Stmt>)>,
    /// Imports of the debug tools source
    debug_imports: Vec<StmtId>,
    /// Local names bound to debug macros
    macros: FxHashMap<String, MacroKind>,
}

/// Expands debug macros and flag imports of a module
///
/// Every check runs before the module is touched, so a failed transform
/// leaves the module as it was.
#[derive(Debug, Clone)]
pub struct MacroTransform<'cfg> {
    config: &'cfg MacroConfig,
    builder: MacroBuilder,
}

impl<'cfg> MacroTransform<'cfg> {
    /// Creates a transform for `config`
    pub fn new(config: &'cfg MacroConfig) -> Self {
        let builder =
            MacroBuilder::new(config.helper_config()).with_assert_guards(config.assert_guards());
        Self { config, builder }
    }

    /// Runs the transform over `module`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a flag import names an unsupported flag
    /// - a debug tools import names something other than a macro
    /// - a debug macro is imported under an alias while helpers are local
    /// - a macro call has the wrong argument shape
    /// - a `deprecate` call lacks `id` or `until`
    /// - macros are used without an imported or configured `DEBUG`
    pub fn run(&self, module: &mut Module) -> Result<TransformReport, TransformError> {
        let scan = self.scan_imports(module)?;

        let mut queue = ExpansionQueue::new();
        self.collect_macros(module, &scan.macros, &mut queue)?;

        let mut report = TransformReport::default();
        let mut injected = None;
        if !queue.is_empty() {
            let binding = if let Some(binding) = &scan.binding {
                binding.clone()
            } else {
                let value =
                    self.config
                        .debug_value()
                        .ok_or_else(|| TransformError::MissingDebugFlag {
                            module: self.config.env_flags.source.clone(),
                        })?;
                injected = Some(debug_flag(DEBUG_FLAG, value));
                DEBUG_FLAG.to_string()
            };
            report.expanded = queue.expand_macros(module, &binding);
            report.binding = Some(binding);
        }

        for (id, constants) in scan.flag_imports {
            report.constants += constants.len();
            module.splice(id, constants);
        }

        // Local helpers are called through the import, so it has to stay.
        if *self.builder.helpers() != HelperConfig::Local {
            for id in scan.debug_imports {
                if module.remove(id) {
                    report.removed_imports += 1;
                }
            }
        }

        if let Some(stmt) = injected {
            module.insert(after_imports(module), stmt);
            report.constants += 1;
        }

        info!(
            expanded = report.expanded,
            constants = report.constants,
            removed_imports = report.removed_imports,
            "transformed module"
        );
        Ok(report)
    }

    fn scan_imports(&self, module: &Module) -> Result<ImportScan, TransformError> {
        let env_source = &self.config.env_flags.source;
        let env_table = self.config.env_table();
        let debug_source = &self.config.debug_tools.source;
        let local_helpers = *self.builder.helpers() == HelperConfig::Local;
        let mut scan = ImportScan::default();

        for &id in module.ids() {
            let stmt = module.get(id);
            let StmtKind::Import { specifiers, source } = &stmt.kind else {
                continue;
            };
            let span = stmt.span;

            if source == env_source {
                if let Some(flag) = specifiers
                    .iter()
                    .find(|specifier| specifier.imported == DEBUG_FLAG)
                {
                    scan.binding = Some(flag.local_name().to_string());
                }
                let constants = flag_constants(specifiers, &env_table, source)
                    .map_err(|source| TransformError::Macro { source, span })?;
                scan.flag_imports.push((id, constants));
            } else if let Some(table) = self.config.feature_table(source) {
                let constants = flag_constants(specifiers, &table, source)
                    .map_err(|source| TransformError::Macro { source, span })?;
                scan.flag_imports.push((id, constants));
            } else if source == debug_source {
                for specifier in specifiers {
                    let kind = MacroKind::from_name(&specifier.imported).ok_or_else(|| {
                        TransformError::UnknownDebugTool {
                            name: specifier.imported.clone(),
                            module: source.clone(),
                            span,
                        }
                    })?;
                    // Local helpers are emitted under the macro's own name.
                    if local_helpers && specifier.local_name() != specifier.imported {
                        return Err(TransformError::AliasedLocalHelper {
                            name: specifier.imported.clone(),
                            local: specifier.local_name().to_string(),
                            span,
                        });
                    }
                    debug!(local = specifier.local_name(), %kind, "registered debug macro");
                    scan.macros.insert(specifier.local_name().to_string(), kind);
                }
                scan.debug_imports.push(id);
            }
        }

        Ok(scan)
    }

    fn collect_macros(
        &self,
        module: &Module,
        macros: &FxHashMap<String, MacroKind>,
        queue: &mut ExpansionQueue,
    ) -> Result<(), TransformError> {
        if macros.is_empty() {
            return Ok(());
        }

        for &id in module.ids() {
            let stmt = module.get(id);
            let StmtKind::Expression { expression } = &stmt.kind else {
                continue;
            };
            let Some((name, arguments)) = expression.as_named_call() else {
                continue;
            };
            let Some(&kind) = macros.get(name) else {
                continue;
            };

            let site = CallSite::new(id);
            let span = stmt.span;
            match kind {
                MacroKind::Assert => {
                    require_arguments(kind, arguments, span)?;
                    self.builder.assert(queue, site, arguments);
                }
                MacroKind::Warn => {
                    require_arguments(kind, arguments, span)?;
                    self.builder.warn(queue, site, arguments);
                }
                MacroKind::Deprecate => {
                    let arguments = deprecate_arguments(arguments, span)?;
                    self.builder
                        .deprecate(queue, site, arguments)
                        .map_err(|source| TransformError::Macro { source, span })?;
                }
            }
        }

        Ok(())
    }
}

fn require_arguments(
    kind: MacroKind,
    arguments: &[Expr],
    span: Span,
) -> Result<(), TransformError> {
    if arguments.is_empty() {
        return Err(TransformError::MalformedMacro {
            kind,
            reason: "expected at least one argument",
            span,
        });
    }
    Ok(())
}

fn deprecate_arguments(
    arguments: &[Expr],
    span: Span,
) -> Result<DeprecateArgs<'_>, TransformError> {
    let malformed = |reason: &'static str| TransformError::MalformedMacro {
        kind: MacroKind::Deprecate,
        reason,
        span,
    };
    let [message, predicate, meta] = arguments else {
        return Err(malformed("expected a message, a predicate and a metadata object"));
    };
    let message = message
        .as_string_literal()
        .ok_or_else(|| malformed("the message must be a string literal"))?;
    let meta = meta
        .as_object()
        .ok_or_else(|| malformed("the metadata must be an object literal"))?;
    Ok(DeprecateArgs {
        message,
        predicate,
        meta,
    })
}

/// Body position right after the last import
fn after_imports(module: &Module) -> usize {
    module
        .body()
        .enumerate()
        .filter(|(_, stmt)| matches!(stmt.kind, StmtKind::Import { .. }))
        .map(|(index, _)| index + 1)
        .last()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm_macro::{MacroExpansionError, MetaField};
    use dm_syntax::{ImportSpecifier, Property};
    use expect_test::expect;

    const CONSOLE_CONFIG: &str = r#"
        [env-flags]
        flags = { DEBUG = true }

        [[features]]
        source = "@ember/features"
        flags = { FEATURE_A = 1, FEATURE_B = 0 }
    "#;

    fn config(contents: &str) -> MacroConfig {
        MacroConfig::from_toml_str(contents).unwrap()
    }

    fn call(name: &str, arguments: Vec<Expr>) -> Stmt {
        Stmt::expression(Expr::call(Expr::identifier(name), arguments))
    }

    fn debug_tools(names: &[&str]) -> Stmt {
        Stmt::import(
            names.iter().map(|name| ImportSpecifier::new(*name)).collect(),
            "@ember/debug-tools",
        )
    }

    fn deprecation(meta: Vec<Property>) -> Stmt {
        call(
            "deprecate",
            vec![Expr::string("old"), Expr::identifier("usesOld"), Expr::object(meta)],
        )
    }

    #[test]
    fn test_console_module() {
        let config = config(CONSOLE_CONFIG);
        let mut module: Module = vec![
            Stmt::import(vec![ImportSpecifier::new("DEBUG")], "@ember/env-flags"),
            Stmt::import(vec![ImportSpecifier::new("FEATURE_A")], "@ember/features"),
            debug_tools(&["assert", "warn", "deprecate"]),
            call("assert", vec![Expr::identifier("value"), Expr::string("needs a value")]),
            call("warn", vec![Expr::string("careful")]),
            deprecation(vec![
                Property::new("id", Expr::string("X")),
                Property::new("until", Expr::string("2.0")),
            ]),
            call("render", vec![]),
        ]
        .into_iter()
        .collect();

        let report = MacroTransform::new(&config).run(&mut module).unwrap();
        assert_eq!(
            report,
            TransformReport {
                expanded: 3,
                constants: 2,
                removed_imports: 1,
                binding: Some("DEBUG".to_string()),
            }
        );
        expect![[r#"
            const DEBUG = 1;
            const FEATURE_A = 1;
            (DEBUG && value && console.assert(value, "needs a value"));
            (DEBUG && console.warn("careful"));
            (DEBUG && usesOld && console.warn("DEPRECATED [X]: old. Will be removed in 2.0."));
            render();
        "#]]
        .assert_eq(&module.to_string());
    }

    #[test]
    fn test_injects_debug_flag_when_not_imported() {
        let config = config("[env-flags]\nflags = { DEBUG = false }\n");
        let mut module: Module = vec![
            debug_tools(&["warn"]),
            call("warn", vec![Expr::string("hi")]),
        ]
        .into_iter()
        .collect();

        let report = MacroTransform::new(&config).run(&mut module).unwrap();
        assert_eq!(report.constants, 1);
        expect![[r#"
            const DEBUG = 0;
            (DEBUG && console.warn("hi"));
        "#]]
        .assert_eq(&module.to_string());
    }

    #[test]
    fn test_aliased_imports() {
        let config = config(CONSOLE_CONFIG);
        let mut module: Module = vec![
            Stmt::import(
                vec![ImportSpecifier::aliased("DEBUG", "isDebug")],
                "@ember/env-flags",
            ),
            Stmt::import(
                vec![ImportSpecifier::aliased("warn", "debugWarn")],
                "@ember/debug-tools",
            ),
            call("debugWarn", vec![Expr::string("aliased")]),
            call("warn", vec![Expr::string("not a macro here")]),
        ]
        .into_iter()
        .collect();

        MacroTransform::new(&config).run(&mut module).unwrap();
        expect![[r#"
            const isDebug = 1;
            (isDebug && console.warn("aliased"));
            warn("not a macro here");
        "#]]
        .assert_eq(&module.to_string());
    }

    #[test]
    fn test_local_helpers_keep_import() {
        let config = config("[env-flags]\nflags = { DEBUG = 1 }\n\n[externalize-helpers]\n");
        let mut module: Module = vec![
            debug_tools(&["assert"]),
            call("assert", vec![Expr::identifier("ok"), Expr::identifier("reason")]),
        ]
        .into_iter()
        .collect();

        let report = MacroTransform::new(&config).run(&mut module).unwrap();
        assert_eq!(report.removed_imports, 0);
        expect![[r#"
            import { assert } from "@ember/debug-tools";
            const DEBUG = 1;
            (DEBUG && ok && reason && assert(ok, reason));
        "#]]
        .assert_eq(&module.to_string());
    }

    #[test]
    fn test_local_helpers_reject_aliased_import() {
        let config = config("[env-flags]\nflags = { DEBUG = 1 }\n\n[externalize-helpers]\n");
        let mut module: Module = vec![
            Stmt::import(
                vec![ImportSpecifier::aliased("warn", "debugWarn")],
                "@ember/debug-tools",
            )
            .with_span(Span::new(0, 48)),
            call("debugWarn", vec![Expr::string("x")]),
        ]
        .into_iter()
        .collect();
        let before = module.to_string();

        let error = MacroTransform::new(&config).run(&mut module).unwrap_err();
        assert!(matches!(
            error,
            TransformError::AliasedLocalHelper { ref name, ref local, span }
                if name == "warn" && local == "debugWarn" && span == Span::new(0, 48)
        ));
        assert_eq!(
            error.to_string(),
            "`warn` is imported as `debugWarn` but local helpers are called as `warn`"
        );
        assert_eq!(module.to_string(), before);
    }

    #[test]
    fn test_local_helpers_accept_unaliased_specifier() {
        let config = config("[env-flags]\nflags = { DEBUG = 1 }\n\n[externalize-helpers]\n");
        let mut module: Module = vec![
            Stmt::import(
                vec![ImportSpecifier::aliased("warn", "warn")],
                "@ember/debug-tools",
            ),
            call("warn", vec![Expr::string("x")]),
        ]
        .into_iter()
        .collect();

        MacroTransform::new(&config).run(&mut module).unwrap();
        expect![[r#"
            import { warn } from "@ember/debug-tools";
            const DEBUG = 1;
            (DEBUG && warn("x"));
        "#]]
        .assert_eq(&module.to_string());
    }

    #[test]
    fn test_unsupported_flag_leaves_module_untouched() {
        let config = config(CONSOLE_CONFIG);
        let mut module: Module = vec![
            Stmt::import(
                vec![ImportSpecifier::new("FEATURE_A"), ImportSpecifier::new("FEATURE_C")],
                "@ember/features",
            )
            .with_span(Span::new(0, 50)),
            debug_tools(&["warn"]),
            call("warn", vec![Expr::string("hi")]),
        ]
        .into_iter()
        .collect();
        let before = module.to_string();

        let error = MacroTransform::new(&config).run(&mut module).unwrap_err();
        match error {
            TransformError::Macro { source, span } => {
                assert_eq!(span, Span::new(0, 50));
                assert_eq!(
                    source,
                    MacroExpansionError::UnsupportedFlag {
                        name: "FEATURE_C".to_string(),
                        source_label: "@ember/features".to_string(),
                    }
                );
            }
            other => panic!("expected an unsupported flag, found {other:?}"),
        }
        assert_eq!(module.to_string(), before);
    }

    #[test]
    fn test_missing_metadata() {
        let config = config(CONSOLE_CONFIG);
        let mut module: Module = vec![
            debug_tools(&["deprecate"]),
            deprecation(vec![Property::new("until", Expr::string("2.0"))]),
        ]
        .into_iter()
        .collect();

        let error = MacroTransform::new(&config).run(&mut module).unwrap_err();
        assert!(matches!(
            error,
            TransformError::Macro {
                source: MacroExpansionError::MissingMetadata {
                    field: MetaField::Id,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_deprecate() {
        let config = config(CONSOLE_CONFIG);
        let mut module: Module = vec![
            debug_tools(&["deprecate"]),
            call(
                "deprecate",
                vec![
                    Expr::identifier("message"),
                    Expr::identifier("test"),
                    Expr::object(vec![]),
                ],
            ),
        ]
        .into_iter()
        .collect();

        let error = MacroTransform::new(&config).run(&mut module).unwrap_err();
        assert_eq!(
            error.to_string(),
            "malformed `deprecate` call at 0..0: the message must be a string literal"
        );
    }

    #[test]
    fn test_unknown_debug_tool() {
        let config = config(CONSOLE_CONFIG);
        let mut module: Module = vec![debug_tools(&["assert", "log"])].into_iter().collect();

        let error = MacroTransform::new(&config).run(&mut module).unwrap_err();
        assert!(matches!(
            error,
            TransformError::UnknownDebugTool { ref name, .. } if name == "log"
        ));
    }

    #[test]
    fn test_missing_debug_flag() {
        let config = config("");
        let mut module: Module = vec![
            debug_tools(&["warn"]),
            call("warn", vec![Expr::string("hi")]),
        ]
        .into_iter()
        .collect();

        let error = MacroTransform::new(&config).run(&mut module).unwrap_err();
        assert_eq!(
            error.to_string(),
            "debug macros are used but no `DEBUG` flag is configured for @ember/env-flags"
        );
    }

    #[test]
    fn test_module_without_macros_is_unchanged() {
        let config = config(CONSOLE_CONFIG);
        let mut module: Module = vec![call("render", vec![])].into_iter().collect();
        let report = MacroTransform::new(&config).run(&mut module).unwrap();
        assert_eq!(report, TransformReport::default());
        assert_eq!(module.to_string(), "render();\n");
    }
}
