//! Service layer: the business operations behind the admin panel and the
//! public site.
//! - `auth` owns credential checks, hashing and session tokens.
//! - `db` holds one module per admin resource plus the dashboard and settings.
//! - Entities and field validation come from the `models` crate.

pub mod errors;
pub mod auth;
pub mod db;
pub mod user_service;
#[cfg(test)]
pub mod test_support;
