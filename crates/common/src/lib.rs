//! Shared building blocks for the marketplace services: the response
//! envelope, the sibling-service existence client and logging setup.

pub mod types;
pub mod utils;
pub mod envelope;
pub mod remote;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }
}
