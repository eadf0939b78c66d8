pub mod key_value;

pub use key_value::{FileStore, KeyValueStore, MemoryStore, UnavailableStore};
