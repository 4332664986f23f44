pub mod coercer;
pub mod loader;
pub mod metrics;
pub mod normalizer;
pub mod types;
pub mod utils;
