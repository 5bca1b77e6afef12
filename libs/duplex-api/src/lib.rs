//! Bidirectional conversion contract.
//!
//! A [`Conversion`] turns `Input` into `Output` and back. Parsers use
//! `apply` to produce domain values, printers use `unapply` to recover the
//! raw form. Structural combinators and the concurrent executor live in
//! `duplex-engine`; byte/text leaves live in `duplex-codecs`.

pub mod conversion;
pub mod convert;
pub mod error;
pub mod identity;
pub mod inverted;
pub mod lifted;
pub mod pipeline;

pub use conversion::{AsyncConversion, Conversion, ConversionFuture};
pub use convert::{AsyncConvert, Convert, convert};
pub use error::{ConversionError, ErrorKind};
pub use identity::Identity;
pub use inverted::{Inverted, invert};
pub use lifted::Lifted;
pub use pipeline::Pipeline;
