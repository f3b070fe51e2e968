//! Client-side cart state: the local cache and the engine that keeps it in step with the
//! server cart store.

pub mod engine;
pub mod local_cache;

pub use engine::*;
pub use local_cache::*;
