//! Building blocks for HTTP clients: query string serialization, response
//! header text parsing, and Base64 for Latin1 text.
pub mod base64;
pub mod clock;
pub mod error;
pub mod header;
mod parse;
pub mod query;
pub mod util;
pub mod value;

pub use value::{Map, Value};
