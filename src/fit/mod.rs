pub mod fine_tune;
pub mod fitter;
