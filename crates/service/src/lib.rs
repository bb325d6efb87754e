//! Service layer: business rules for the four marketplace services.
//! - Each domain has a repository abstraction with a SeaORM and an in-memory implementation.
//! - Field rules come from the `models` crate; references to sibling services go through
//!   `common::remote::ExistenceCheck`.

pub mod errors;
pub mod memory;
pub mod references;
pub mod geography;
pub mod products;
pub mod shopping;
pub mod users;
#[cfg(test)]
pub mod test_support;
