use crate::workflow::config::{MatrixDecl, WorkflowConfig};
use anyhow::{bail, Context};
use log::debug;
use matcore::telemetry::MetricsSnapshot;
use matcore::{Matrix, MatrixEngine};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;

#[derive(Debug, Serialize)]
pub struct WorkflowResult {
    /// Matrices flagged for display, in pipeline order.
    pub displayed: Vec<Matrix>,
    /// Registry keys of every step result, in pipeline order.
    pub produced: Vec<String>,
    pub metrics: MetricsSnapshot,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Runs every declared matrix and step through `engine`.
    ///
    /// Registry keys are write-once: a step whose result key (alias or
    /// derived name) is already taken fails instead of rebinding it.
    pub fn execute(&self, engine: &MatrixEngine) -> anyhow::Result<WorkflowResult> {
        let mut registry: HashMap<String, Matrix> = HashMap::new();
        let mut displayed = Vec::new();

        for decl in &self.config.matrices {
            if registry.contains_key(&decl.name) {
                bail!("matrix {} is declared twice", decl.name);
            }
            let matrix = build_matrix(engine, decl)
                .with_context(|| format!("building matrix {}", decl.name))?;
            if decl.display {
                displayed.push(matrix.clone());
            }
            registry.insert(decl.name.clone(), matrix);
        }

        let mut produced = Vec::with_capacity(self.config.steps.len());
        for (index, step) in self.config.steps.iter().enumerate() {
            let op = step
                .operation()
                .with_context(|| format!("validating step {}", index + 1))?;
            let lhs = lookup(&registry, &step.lhs)
                .with_context(|| format!("resolving lhs of step {} ({})", index + 1, op))?;
            let rhs = match step.rhs.as_deref() {
                Some(name) => Some(
                    lookup(&registry, name)
                        .with_context(|| format!("resolving rhs of step {} ({})", index + 1, op))?,
                ),
                None => None,
            };

            let result = engine
                .apply(op, lhs, rhs)
                .with_context(|| format!("executing step {} ({})", index + 1, op))?;
            let key = step
                .alias
                .clone()
                .unwrap_or_else(|| result.name().to_string());
            if registry.contains_key(&key) {
                bail!(
                    "step {} ({}) would rebind {}; give the step an alias",
                    index + 1,
                    op,
                    key
                );
            }
            debug!("step {} registered result as {}", index + 1, key);

            if step.display {
                displayed.push(result.clone());
            }
            produced.push(key.clone());
            registry.insert(key, result);
        }

        Ok(WorkflowResult {
            displayed,
            produced,
            metrics: engine.metrics(),
        })
    }
}

/// Renders `matrix` through the engine's row view, one line per row.
pub fn render(engine: &MatrixEngine, matrix: &Matrix) -> String {
    let mut out = String::new();
    for row in engine.display(matrix) {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}

fn build_matrix(engine: &MatrixEngine, decl: &MatrixDecl) -> anyhow::Result<Matrix> {
    let mut matrix = engine.create(&decl.name, decl.rows, decl.cols)?;
    let values = match &decl.random {
        Some(fill) => fill.values(decl.rows, decl.cols)?,
        None => decl.values.clone(),
    };
    engine.load(&mut matrix, &values)?;
    Ok(matrix)
}

fn lookup<'a>(registry: &'a HashMap<String, Matrix>, name: &str) -> anyhow::Result<&'a Matrix> {
    registry
        .get(name)
        .with_context(|| format!("unknown matrix {}", name))
}
