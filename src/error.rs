use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NysiisError {
    /// The normalized name is too short for the prefix rules to apply.
    #[error("name {name:?} is too short to be encoded ({len} < 3 characters)")]
    InvalidInput { name: String, len: usize },
}
