pub mod region;
pub mod comuna;
pub mod address;
