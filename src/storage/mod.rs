/// Token persistence backends
pub mod token_store;

pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, token_key};
