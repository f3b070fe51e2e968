//! # B2B Cart
//!
//! > **Cart contents and stock admission for a B2B storefront.**
//!
//! For a product and a requested quantity, this crate decides whether the item may enter
//! the cart now, only after the buyer confirms a delayed delivery, partially, or not at
//! all. It keeps a cart's lines, `total` and `count` consistent for anonymous sessions,
//! for signed-in users whose cart lives on the server, and across the merge when an
//! anonymous buyer signs in.
//!
//! Nothing is reserved: admission is advice, and inventory is never decremented here.
//!
//! ## Module Tour
//!
//! ### 1. Pure rules ([`stock`], [`aggregate`])
//! - [`stock::classify`] maps stock and quantity to an
//!   [`AdmissionDecision`](model::AdmissionDecision).
//! - [`aggregate::apply`] and [`aggregate::merge`] are the only code that changes lines,
//!   and [`aggregate::cart_total`] the only code that prices them.
//!
//! ### 2. Server state ([`cart_actor`], [`alert_actor`], [`clients`])
//! Both stores are [`ResourceActor`](actor_framework::ResourceActor)s from the
//! `actor-framework` crate, keyed by user id and by `(product, email)`. They are reached
//! through [`CartClient`](clients::CartClient) and [`AlertClient`](clients::AlertClient).
//!
//! ### 3. Client state ([`sync`])
//! [`CartSyncEngine`](sync::CartSyncEngine) owns a session's cart: it admits items,
//! writes every change to a [`LocalCartCache`](sync::LocalCartCache), mirrors changes to
//! the server while signed in and merges on sign-in.
//!
//! ### 4. Service ([`http`], [`lifecycle`], [`config`])
//! An axum router over the clients, the [`CartSystem`](lifecycle::CartSystem) that starts
//! and stops the actors, and environment configuration.
//!
//! ## Add sums, merge takes the max
//!
//! Adding a product twice adds the quantities. Merging a local cart into a stored one takes
//! the larger quantity per product. See [`aggregate`].
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info CART_PORT=8080 CATALOG_SEED_PATH=./catalog.json cargo run
//! curl -H 'x-user-id: u1' localhost:8080/api/cart
//! ```

pub mod aggregate;
pub mod alert_actor;
pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod stock;
pub mod sync;
