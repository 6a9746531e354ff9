//! Response bodies.
//!
//! - [`body`] - [`body::ResponseStream`], one seeded chunk stream per
//!   response, ended by disconnect or shutdown.

pub mod body;
