mod interface;
mod mersenne;
mod seed;
#[cfg(feature = "thread-seed")]
mod thread_random;

pub use interface::*;
pub use mersenne::*;
pub use seed::*;
#[cfg_attr(docsrs, doc(cfg(feature = "thread-seed")))]
#[cfg(feature = "thread-seed")]
pub use thread_random::*;
