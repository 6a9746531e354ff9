mod pools;
#[cfg(test)]
mod tests;
mod value;

pub use pools::*;
pub use value::*;
