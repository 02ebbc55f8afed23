//! Core library for the heat pump quote generator.
//!
//! This crate defines:
//! - Configuration handling
//! - The static house / heat-pump reference tables
//! - The resilient weather client (degree-days lookup with retries)
//! - Quote generation and the text presenter
//!
//! It is used by `quote-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod format;
pub mod model;
pub mod quote;
pub mod tables;
pub mod weather;

pub use config::Config;
pub use format::format_quote;
pub use model::{CostItem, HeatPump, House, Quote};
pub use quote::{FALLBACK_HEAT_LOSS, generate_quotes};
pub use weather::{DegreeDaysProvider, WeatherService};
