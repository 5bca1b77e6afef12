//! Structural combinators and the concurrent batch executor.
//!
//! Each combinator implements both [`Conversion`](duplex_api::Conversion)
//! (sequential, in declared order) and
//! [`AsyncConversion`](duplex_api::AsyncConversion) (fan-out / fan-in on
//! the tokio runtime). Async forms must run inside a tokio runtime.

pub mod batch;
pub mod exactly;
pub mod map_entries;
pub mod map_values;
pub mod tuple;

pub use batch::{BatchOptions, join_indexed};
pub use exactly::Exactly;
pub use map_entries::{MapEntries, map_entries};
pub use map_values::{MapValues, map_values};
pub use tuple::{Tuple, tuple};
