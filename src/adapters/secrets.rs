//! Random alphanumeric secret tokens.

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};

use crate::ports::SecretSource;

/// Secret source backed by the thread-local random generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSecrets;

impl SecretSource for RandomSecrets {
    fn generate(&mut self, length: usize) -> String {
        thread_rng().sample_iter(&Alphanumeric).take(length).map(char::from).collect()
    }
}
