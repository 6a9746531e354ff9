#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub mod generator;
pub mod rand;
pub mod serializer;
pub mod splitter;
#[cfg(feature = "futures")]
mod stream;
mod value;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::rand::*;
pub use crate::serializer::*;
pub use crate::splitter::*;
pub use crate::value::*;
