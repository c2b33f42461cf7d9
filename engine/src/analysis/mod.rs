pub mod evaluator;
pub mod ranking;

pub use evaluator::{evaluate, evaluate_history};
pub use ranking::rank;
