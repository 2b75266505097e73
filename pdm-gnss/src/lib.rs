pub mod blast;
pub mod error;
pub mod reading;
pub mod severity;
pub mod site;
pub mod telemetry;
#[cfg(feature = "api")]
pub mod upstream;
