use std::fmt;
use std::marker::PhantomData;

use crate::conversion::{AsyncConversion, Conversion, ConversionFuture};
use crate::error::ConversionError;

/// Conversion that returns its input unchanged in both directions.
///
/// The empty composition: `chain![]` builds one.
pub struct Identity<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> Identity<T> {
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Default for Identity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Identity<T> {}

impl<T> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Identity")
    }
}

impl<T> Conversion for Identity<T> {
    type Input = T;
    type Output = T;

    #[inline]
    fn apply(&self, input: T) -> Result<T, ConversionError> {
        Ok(input)
    }

    #[inline]
    fn unapply(&self, output: T) -> Result<T, ConversionError> {
        Ok(output)
    }
}

impl<T: Send> AsyncConversion for Identity<T> {
    type Input = T;
    type Output = T;

    fn apply_async(&self, input: T) -> ConversionFuture<'_, T> {
        Box::pin(std::future::ready(Ok(input)))
    }

    fn unapply_async(&self, output: T) -> ConversionFuture<'_, T> {
        Box::pin(std::future::ready(Ok(output)))
    }
}
