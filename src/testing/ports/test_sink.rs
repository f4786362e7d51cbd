use std::path::PathBuf;

use crate::domain::AppError;
use crate::ports::BundleSink;

/// Records delivered bundles in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub delivered: Vec<(String, Vec<u8>)>,
    pub fail: bool,
}

#[allow(dead_code)]
impl MemorySink {
    pub fn failing() -> Self {
        Self { delivered: Vec::new(), fail: true }
    }
}

impl BundleSink for MemorySink {
    fn deliver(&mut self, bytes: &[u8], file_name: &str) -> Result<PathBuf, AppError> {
        if self.fail {
            return Err(AppError::Delivery("sink rejected the bundle".to_string()));
        }
        self.delivered.push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}
