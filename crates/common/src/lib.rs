//! Shared building blocks for the agency site crates: logging setup,
//! pagination math, and small response types used by more than one layer.

pub mod types;
pub mod utils;
pub mod pagination;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok("development", true);
        assert_eq!(h.status, "ok");
        assert_eq!(h.database, "connected");
    }
}
