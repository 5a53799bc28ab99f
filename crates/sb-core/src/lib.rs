pub mod error;
pub mod segment;

pub use error::*;
pub use segment::*;
