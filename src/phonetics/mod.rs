mod nysiis;

pub use nysiis::{nysiis, NYSIIS_KEY_LENGTH};
