use crate::prelude::{MatrixError, Shape};
use log::{error, info};

/// Diagnostic stream for engine events.
pub struct LogManager {
    creation_enabled: bool,
}

impl LogManager {
    pub fn new() -> Self {
        Self {
            creation_enabled: true,
        }
    }

    pub fn with_creation(creation_enabled: bool) -> Self {
        Self { creation_enabled }
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    pub fn record_created(&self, name: &str, shape: Shape) {
        if self.creation_enabled {
            self.record(&format!("matrix {} {} is created", name, shape));
        }
    }

    pub fn record_failure(&self, err: &MatrixError) {
        error!("err: {}", err);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
