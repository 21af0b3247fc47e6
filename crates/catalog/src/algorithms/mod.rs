pub mod preprocessing;
pub mod recognition;

pub use preprocessing::*;
pub use recognition::*;
