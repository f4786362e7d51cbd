use crate::ports::SecretSource;

/// Deterministic alphanumeric tokens: `a0000...`, `a0001...`, and so on.
#[derive(Debug, Default)]
pub struct SequentialSecrets {
    issued: usize,
}

#[allow(dead_code)]
impl SequentialSecrets {
    pub fn issued(&self) -> usize {
        self.issued
    }
}

impl SecretSource for SequentialSecrets {
    fn generate(&mut self, length: usize) -> String {
        let seed = format!("a{:04}", self.issued);
        self.issued += 1;
        seed.chars().chain(std::iter::repeat('x')).take(length).collect()
    }
}
