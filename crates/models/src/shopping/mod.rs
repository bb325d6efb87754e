pub mod buy;
pub mod detail;
