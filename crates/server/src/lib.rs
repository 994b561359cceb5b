//! HTTP layer for the agency site: public endpoints, the role-gated admin
//! API, and process startup.

pub mod auth;
pub mod errors;
pub mod extract;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run;
