//! Pact service surface.
//!
//! Wires the authorization gate, record store, signing coordinator, and
//! approval queue behind the platform's operation set. Every mutating
//! call is checked against the gate using the calling actor's permission
//! set before anything else happens; lifecycle writes go through the
//! store's compare-and-set so concurrent attempts cannot both land.
//!
//! Presentation layers (navigation, theming, forms, charts) are external
//! collaborators: they call these operations and render the result.

#![deny(unsafe_code)]

mod config;
mod service;
mod telemetry;

pub use config::ServiceConfig;
pub use service::{ContractDetail, ContractListItem, PactService};
pub use telemetry::init_tracing;
