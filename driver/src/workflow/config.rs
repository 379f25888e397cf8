use crate::generator::random::RandomFill;
use anyhow::{bail, Context};
use matcore::{Element, EngineConfig, Operation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A matrix declared up front in a workflow.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatrixDecl {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    /// Leading row-major values; missing slots stay zero.
    #[serde(default)]
    pub values: Vec<Element>,
    /// Fill every slot from a seeded generator instead of `values`.
    #[serde(default)]
    pub random: Option<RandomFill>,
    #[serde(default)]
    pub display: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Add,
    Sub,
    Mul,
    MulScalar,
    Transpose,
}

/// One operation in the pipeline. Operands refer to declared matrices or to
/// results of earlier steps, by derived name or alias.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepDecl {
    pub op: StepKind,
    pub lhs: String,
    #[serde(default)]
    pub rhs: Option<String>,
    #[serde(default)]
    pub scalar: Option<Element>,
    /// Register the result under this key instead of its derived name.
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default = "default_display")]
    pub display: bool,
}

fn default_display() -> bool {
    true
}

impl StepDecl {
    pub fn operation(&self) -> anyhow::Result<Operation> {
        let op = match self.op {
            StepKind::Add => Operation::Add,
            StepKind::Sub => Operation::Sub,
            StepKind::Mul => Operation::Mul,
            StepKind::Transpose => Operation::Transpose,
            StepKind::MulScalar => match self.scalar {
                Some(scalar) => Operation::MulScalar(scalar),
                None => bail!("mul_scalar step on {} is missing `scalar`", self.lhs),
            },
        };
        if op.arity() == 2 && self.rhs.is_none() {
            bail!("{} step on {} is missing `rhs`", op, self.lhs);
        }
        if let (1, Some(rhs)) = (op.arity(), self.rhs.as_deref()) {
            bail!("{} step on {} takes no `rhs`, got {}", op, self.lhs, rhs);
        }
        if self.op != StepKind::MulScalar && self.scalar.is_some() {
            bail!("{} step on {} takes no `scalar`", op, self.lhs);
        }
        Ok(op)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub matrices: Vec<MatrixDecl>,
    #[serde(default)]
    pub steps: Vec<StepDecl>,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Alpha (3x2) times Beta (2x3), displaying both inputs and the product.
    pub fn demo() -> Self {
        Self {
            engine: EngineConfig::default(),
            matrices: vec![
                MatrixDecl {
                    name: "Alpha".into(),
                    rows: 3,
                    cols: 2,
                    values: vec![3, 0, -1, 2, 1, 1],
                    random: None,
                    display: true,
                },
                MatrixDecl {
                    name: "Beta".into(),
                    rows: 2,
                    cols: 3,
                    values: vec![1, 4, 2, 3, 1, 5],
                    random: None,
                    display: true,
                },
            ],
            steps: vec![StepDecl {
                op: StepKind::Mul,
                lhs: "Alpha".into(),
                rhs: Some("Beta".into()),
                scalar: None,
                alias: None,
                display: true,
            }],
        }
    }
}
