//! Construction of the sandboxed script engine.

use rhai::module_resolvers::DummyModuleResolver;
use rhai::Engine;
use tbforge_config::SandboxConfig;

/// Builds a fresh engine with the configured resource limits.
///
/// The engine cannot import modules from disk, and script `print`/`debug`
/// output goes to the log instead of stdout. A new engine is built for every
/// run so that nothing a script registers can outlive it.
pub fn build_engine(limits: &SandboxConfig) -> Engine {
    let mut engine = Engine::new();
    engine.set_module_resolver(DummyModuleResolver::new());
    engine.set_max_operations(limits.max_operations);
    engine.set_max_call_levels(limits.max_call_levels);
    engine.set_max_expr_depths(limits.max_expr_depth, limits.max_expr_depth);
    engine.set_max_string_size(limits.max_string_size);
    engine.set_max_array_size(limits.max_array_size);
    engine.set_max_map_size(limits.max_map_size);
    engine.on_print(|text| log::debug!("reference model: {text}"));
    engine.on_debug(|text, _source, pos| log::debug!("reference model {pos}: {text}"));
    engine
}
