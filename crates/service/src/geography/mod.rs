//! Geography: regions, comunas and addresses.
//!
//! Addresses reference users living in the users service.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::GeographyService;
