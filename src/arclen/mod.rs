pub mod cache;
pub mod table;
