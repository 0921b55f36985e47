//! Host payload handling
//!
//! Parsing the raw envelope, classifying its shape, and keeping the latest
//! accepted payload per endpoint.

mod envelope;
pub mod error;
mod inbox;
mod router;

pub use envelope::{parse_payload, Payload, PayloadType};
pub use error::{PayloadError, PayloadResult};
pub use inbox::{Delivery, EndpointKind, PayloadInbox};
pub use router::{classify, route, PayloadShape};
