pub mod corners;
pub mod model;
pub mod split;
