use crate::math::matrix::{Element, Matrix, Rows};
use crate::math::ops::Operation;
use crate::prelude::{EngineConfig, MatrixResult};
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};

/// Front door for matrix construction, loading and algebra.
///
/// Wraps the pure operations on [`Matrix`] with the diagnostic stream:
/// every matrix the engine hands out is announced, and every rejected
/// operation is logged with the operands it was given before the error is
/// returned to the caller.
pub struct MatrixEngine {
    config: EngineConfig,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl MatrixEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            logger: LogManager::with_creation(config.log_creation),
            metrics: MetricsRecorder::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Creates a zero-filled matrix.
    pub fn create(&self, name: &str, rows: usize, cols: usize) -> MatrixResult<Matrix> {
        let created = Matrix::new(name, rows, cols);
        self.track(created)
    }

    /// Copies `values` into the leading slots of `matrix`, all or nothing.
    pub fn load(&self, matrix: &mut Matrix, values: &[Element]) -> MatrixResult<()> {
        let loaded = matrix.load(values);
        if let Err(err) = &loaded {
            self.metrics.record_error();
            self.logger.record_failure(err);
        } else {
            self.metrics.record_processed();
        }
        loaded
    }

    /// Lazy row-major view of `matrix` for printing.
    pub fn display<'a>(&self, matrix: &'a Matrix) -> Rows<'a> {
        self.logger.record(&format!("reading matrix {}", matrix.name()));
        matrix.rows()
    }

    pub fn transpose(&self, matrix: &Matrix) -> Matrix {
        let result = matrix.transpose();
        self.announce(&result);
        result
    }

    pub fn add(&self, lhs: &Matrix, rhs: &Matrix) -> MatrixResult<Matrix> {
        self.track(lhs.add(rhs))
    }

    pub fn sub(&self, lhs: &Matrix, rhs: &Matrix) -> MatrixResult<Matrix> {
        self.track(lhs.sub(rhs))
    }

    pub fn mul(&self, lhs: &Matrix, rhs: &Matrix) -> MatrixResult<Matrix> {
        self.track(lhs.mul(rhs))
    }

    pub fn mul_scalar(&self, matrix: &Matrix, scalar: Element) -> Matrix {
        let result = matrix.mul_scalar(scalar);
        self.announce(&result);
        result
    }

    /// Runs `op` against the given operands.
    pub fn apply(
        &self,
        op: Operation,
        lhs: &Matrix,
        rhs: Option<&Matrix>,
    ) -> MatrixResult<Matrix> {
        self.track(op.apply(lhs, rhs))
    }

    fn announce(&self, matrix: &Matrix) {
        self.metrics.record_created();
        self.logger.record_created(matrix.name(), matrix.shape());
    }

    fn track(&self, result: MatrixResult<Matrix>) -> MatrixResult<Matrix> {
        match &result {
            Ok(matrix) => self.announce(matrix),
            Err(err) => {
                self.metrics.record_error();
                self.logger.record_failure(err);
            }
        }
        result
    }
}

impl Default for MatrixEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
