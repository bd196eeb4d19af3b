mod decode;
mod encode;
mod error;
mod flags;

pub use error::*;
pub use flags::*;
