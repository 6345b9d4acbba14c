//! Loading a reference model and running it over test vectors.

use rhai::{CallFnOptions, Dynamic, Engine, Scope, AST};
use serde_json::{Map, Value};
use tbforge_common::{Golden, ModuleSignature, Stimulus, TestVector};
use tbforge_config::SandboxConfig;

use crate::convert::{outputs_from_script, to_script};
use crate::error::GoldenError;
use crate::sandbox::build_engine;

/// Suffix appended to the module name to form the entry point name.
pub const REFERENCE_SUFFIX: &str = "_golden";

/// The resolved entry point of a loaded reference model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Function name.
    pub name: String,
    /// Parameter names in declaration order.
    pub params: Vec<String>,
}

/// Loads reference models and evaluates them over test vectors.
#[derive(Debug, Clone)]
pub struct ReferenceModelRunner {
    limits: SandboxConfig,
    default_module_name: String,
}

impl ReferenceModelRunner {
    /// Creates a runner with the given sandbox limits.
    ///
    /// `default_module_name` names the entry point when a signature has no
    /// module name.
    pub fn new(limits: SandboxConfig, default_module_name: impl Into<String>) -> Self {
        Self {
            limits,
            default_module_name: default_module_name.into(),
        }
    }

    /// Returns the entry point name for `signature`: `<name>_golden`.
    pub fn entry_point_name(&self, signature: &ModuleSignature) -> String {
        let module = if signature.name.is_empty() {
            &self.default_module_name
        } else {
            &signature.name
        };
        format!("{module}{REFERENCE_SUFFIX}")
    }

    /// Compiles and loads `source` in a fresh engine and resolves the entry
    /// point for `signature`.
    pub fn load(
        &self,
        source: &str,
        signature: &ModuleSignature,
    ) -> Result<ReferenceModel, GoldenError> {
        let engine = build_engine(&self.limits);
        let ast = engine.compile(source).map_err(|e| GoldenError::Compile {
            reason: e.to_string(),
        })?;

        engine
            .run_ast_with_scope(&mut Scope::new(), &ast)
            .map_err(|e| GoldenError::Load {
                reason: e.to_string(),
            })?;

        let name = self.entry_point_name(signature);
        let entry = ast
            .iter_functions()
            .find(|f| f.name == name)
            .map(|f| EntryPoint {
                name: f.name.to_string(),
                params: f.params.iter().map(|p| p.to_string()).collect(),
            })
            .ok_or(GoldenError::MissingEntryPoint { name })?;

        log::debug!(
            "loaded reference model entry point {}({})",
            entry.name,
            entry.params.join(", ")
        );

        Ok(ReferenceModel { engine, ast, entry })
    }

    /// Runs the reference model over `vectors`, returning resolved copies in
    /// the same order.
    ///
    /// Fails as a whole only if the model cannot be loaded or has no entry
    /// point; individual vector failures are recorded as
    /// [`Golden::Failed`] and do not stop the batch.
    pub fn try_run(
        &self,
        source: &str,
        vectors: &[TestVector],
        signature: &ModuleSignature,
    ) -> Result<Vec<TestVector>, GoldenError> {
        let model = self.load(source, signature)?;
        Ok(vectors
            .iter()
            .enumerate()
            .map(|(index, vector)| {
                let golden = model.verdict(&vector.inputs);
                if let Golden::Failed(reason) = &golden {
                    log::warn!("reference model failed on vector {index}: {reason}");
                }
                vector.with_golden(golden)
            })
            .collect())
    }

    /// Like [`try_run`](Self::try_run), but a load or resolve failure is
    /// logged and yields an empty list.
    pub fn run(
        &self,
        source: &str,
        vectors: &[TestVector],
        signature: &ModuleSignature,
    ) -> Vec<TestVector> {
        match self.try_run(source, vectors, signature) {
            Ok(resolved) => resolved,
            Err(e) => {
                log::error!("{e}; no expected outputs are available");
                Vec::new()
            }
        }
    }
}

/// A compiled, loaded reference model with a resolved entry point.
pub struct ReferenceModel {
    engine: Engine,
    ast: AST,
    entry: EntryPoint,
}

impl ReferenceModel {
    /// Returns the resolved entry point.
    pub fn entry_point(&self) -> &EntryPoint {
        &self.entry
    }

    /// Evaluates the entry point on one stimulus.
    ///
    /// The script's top level is re-run in a fresh scope before each call,
    /// so top-level constants are visible to the entry point as `global::`
    /// and no binding made during one evaluation reaches the next.
    pub fn evaluate(&self, stimulus: &Stimulus) -> Result<Map<String, Value>, GoldenError> {
        let args = self.bind_arguments(stimulus)?;
        let mut scope = Scope::new();
        let options = CallFnOptions::new().eval_ast(true).rewind_scope(true);
        let result: Dynamic = self
            .engine
            .call_fn_with_options(options, &mut scope, &self.ast, &self.entry.name, args)
            .map_err(|e| GoldenError::Evaluation {
                reason: e.to_string(),
            })?;
        outputs_from_script(result)
    }

    /// Evaluates one stimulus and folds the outcome into a verdict.
    pub fn verdict(&self, stimulus: &Stimulus) -> Golden {
        match self.evaluate(stimulus) {
            Ok(outputs) => Golden::Computed(outputs),
            Err(e) => Golden::Failed(e.to_string()),
        }
    }

    /// Orders the stimulus values to match the entry point's parameters.
    fn bind_arguments(&self, stimulus: &Stimulus) -> Result<Vec<Dynamic>, GoldenError> {
        let params = &self.entry.params;
        match stimulus {
            Stimulus::Named(inputs) => {
                if let Some(name) = inputs.keys().find(|k| !params.contains(k)) {
                    return Err(GoldenError::UnexpectedInput { name: name.clone() });
                }
                params
                    .iter()
                    .map(|param| {
                        inputs
                            .get(param)
                            .ok_or_else(|| GoldenError::MissingInput {
                                name: param.clone(),
                            })
                            .and_then(to_script)
                    })
                    .collect()
            }
            Stimulus::Positional(values) => {
                if values.len() != params.len() {
                    return Err(GoldenError::ArgumentCount {
                        expected: params.len(),
                        actual: values.len(),
                    });
                }
                values.iter().map(to_script).collect()
            }
            Stimulus::Scalar(value) => {
                if params.len() != 1 {
                    return Err(GoldenError::ArgumentCount {
                        expected: params.len(),
                        actual: 1,
                    });
                }
                Ok(vec![to_script(value)?])
            }
        }
    }
}
