use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use duplex_api::{Conversion, ConversionError};

/// Text ↔ any `FromStr + Display` value (integers, floats, IPs, ...).
///
/// The round-trip law holds for canonical spellings: `"007"` parses to `7`
/// and prints back as `"7"`.
pub struct Parse<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> Parse<T> {
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Default for Parse<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Parse<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Parse<T> {}

impl<T> std::fmt::Debug for Parse<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse<{}>", std::any::type_name::<T>())
    }
}

impl<T> Conversion for Parse<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    type Input = String;
    type Output = T;

    fn apply(&self, input: String) -> Result<T, ConversionError> {
        input.parse::<T>().map_err(|e| {
            ConversionError::transform(format!("{input:?} as {}: {e}", std::any::type_name::<T>()))
        })
    }

    fn unapply(&self, output: T) -> Result<String, ConversionError> {
        Ok(output.to_string())
    }
}
