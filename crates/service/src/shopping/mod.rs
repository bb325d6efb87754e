//! Shopping: buys and their order details.
//!
//! Every reference except `Detail.buy_id` lives in a sibling service.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::{ShoppingRemotes, ShoppingService};
