pub mod easing;
pub mod evaluator;
