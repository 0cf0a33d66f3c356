//! E2 service models
//!
//! Provides the [`ServiceModel`] trait consumed by the E2 agent and the
//! E2SM-KPM (key performance measurement) model.
//!
//! # Modules
//!
//! - `model` - Service model trait and shared types
//! - `kpm` - E2SM-KPM payload codec and service model
//! - `error` - Error types

pub mod error;
pub mod kpm;
pub mod model;

pub use error::ServiceModelError;
pub use kpm::{KpmServiceModel, MeasurementSource, RandomMeasurementSource};
pub use model::{EventTrigger, IndicationContent, ServiceModel};
