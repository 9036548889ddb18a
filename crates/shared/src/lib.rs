mod payload;
mod result;

pub use payload::*;
pub use result::*;
