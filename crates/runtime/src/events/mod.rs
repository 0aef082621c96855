//! Event distribution for UI, animation and telemetry collaborators.

mod bus;

pub use bus::EventBus;
