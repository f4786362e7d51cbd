/// Port for producing generated secret values.
pub trait SecretSource {
    /// Produce a fresh token of exactly `length` characters.
    fn generate(&mut self, length: usize) -> String;
}
