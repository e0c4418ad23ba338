mod error;
pub mod phonetics;

pub use error::NysiisError;
pub use phonetics::{nysiis, NYSIIS_KEY_LENGTH};
