//! chart-axes: Cartesian axis negotiation for chart visuals.
//!
//! Given one or more chart layers, a viewport and the user's axis settings,
//! the engine decides whether value axes merge, resolves every axis and
//! negotiates the plot margins that fit their tick labels and titles.
//! Rendering and text shaping stay with the host; text measurement is an
//! injected [`api::TextMeasurer`].

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{CartesianAxesCoordinator, CartesianAxesLayout, NegotiationTuning};
pub use error::{AxesError, AxesResult};
