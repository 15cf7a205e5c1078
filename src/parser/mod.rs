pub mod decoder;
pub mod stream;

pub use decoder::*;
pub use stream::*;
