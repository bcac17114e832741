pub mod config;
pub mod efiling;
pub mod error;
pub mod service;
pub mod telemetry;
pub mod wizard;

/// Release tag of the forms bundle the rule tables were written against.
pub const FORMS_VERSION: &str = "1.2.5.6";
