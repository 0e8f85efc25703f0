// ATS Guidelines Engine
// Section validators, weighted aggregation and auto-fix transformations over a
// structured resume. Everything here is synchronous and pure; handlers.rs is
// the only module that touches HTTP.

pub mod auto_fix;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod validators;
