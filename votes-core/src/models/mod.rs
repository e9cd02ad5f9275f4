mod feature;
mod validation;
mod vote;

pub use feature::*;
pub use validation::*;
pub use vote::*;
