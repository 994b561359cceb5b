//! Persistence layer: sea-orm entities for the agency site, their closed
//! label sets, field validation, and the database connection.

pub mod errors;
pub mod db;
pub mod validate;
pub mod timestamps;
pub mod status;
pub mod user;
pub mod user_credentials;
pub mod page;
pub mod offering;
pub mod lead;
pub mod setting;

#[cfg(test)]
mod tests;
