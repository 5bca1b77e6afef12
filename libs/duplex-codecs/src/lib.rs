//! Leaf conversions over bytes and text.
//!
//! Direction convention: `apply` decodes (raw → structured), `unapply`
//! encodes (structured → raw), matching the parse / print split.

pub mod compress;
pub mod json;
pub mod parse;
pub mod text;

pub use compress::{Gzip, Lz4};
pub use json::Json;
pub use parse::Parse;
pub use text::{Base64, Utf8};
