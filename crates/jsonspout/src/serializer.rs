mod encoder;
mod float;
mod profile;

pub use encoder::*;
pub use profile::*;
