//! GRC platform API module: the pooled HTTP client plus typed wrappers for
//! the survey schema, response, and listing endpoints.

pub mod client;
pub mod surveys;

pub use client::GrcClient;
pub use surveys::Page;
