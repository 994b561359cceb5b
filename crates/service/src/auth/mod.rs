//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Credential checks, password hashing and session tokens live here so the
//! HTTP layer only has to move tokens between headers, cookies and handlers.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;
pub mod repo;

pub use service::AuthService;
