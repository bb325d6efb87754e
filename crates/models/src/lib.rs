//! SeaORM entities for the four services plus the field rules every write
//! goes through. References are plain id columns; reads join through
//! explicit filter queries in the service layer.

pub mod errors;
pub mod db;
pub mod rules;
pub mod geography;
pub mod products;
pub mod shopping;
pub mod users;
