pub mod email;
pub mod product;
pub mod root;
pub mod supplier;
