pub mod category;
pub mod status;
pub mod product;
