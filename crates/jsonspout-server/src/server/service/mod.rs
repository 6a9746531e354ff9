//! HTTP service implementation.
//!
//! Every request, whatever its method or path, is answered with `200 OK` and
//! an endless `application/x-json-stream` body. CORS preflight requests are
//! answered by the CORS layer so browser clients can connect.
//!
//! ## Structure
//!
//! - [`handler`] - service entry point (`StreamService`).

pub mod handler;
