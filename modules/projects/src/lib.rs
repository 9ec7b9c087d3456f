// === PUBLIC CONTRACT ===
// Only the contract module should be relied upon by other crates
pub mod contract;

// Re-export the public contract components
pub use contract::{client, error, model};

pub mod config;
pub use config::ProjectsConfig;

// === INTERNAL MODULES ===
// Exposed for wiring (CLI) and for comprehensive testing.
// Prefer the `contract` module for stable public APIs.
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
