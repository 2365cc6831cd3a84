/// Semantic checks run after a configuration has been deserialized and
/// before it is written back.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
