pub mod api;
pub mod configuration;
pub mod model;
pub mod relay;
pub mod startup;
pub mod telemetry;
pub mod util;
