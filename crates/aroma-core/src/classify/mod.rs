pub mod medium;

pub use medium::{classify_formula, classify_recipe};
