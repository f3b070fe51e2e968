//! # Tracing Setup
//!
//! Actor loops log every request with an `entity_type` field (`Cart`, `StockAlert`) and the
//! resource key, so module paths are left out of the output.
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle and outcomes
//! RUST_LOG=debug cargo run    # payloads, admission decisions
//! ```
//!
//! A mirrored add that the store rejects shows up as:
//!
//! ```text
//! WARN Action failed entity_type="Cart" id=u1 error=Entity error: Invalid quantity: 0
//! WARN Mirroring to stored cart failed owner=u1 mutation="add" error=Invalid quantity: 0
//! ```

/// Installs the global subscriber. Call once, before starting the system.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
