//! Users: roles and accounts, plus password login.

pub mod domain;
pub mod password;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::UsersService;
