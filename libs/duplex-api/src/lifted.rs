use crate::conversion::{AsyncConversion, Conversion, ConversionFuture};
use crate::error::ConversionError;

/// Runs a synchronous conversion behind the async contract.
///
/// The returned futures are immediately ready; lifting introduces no
/// suspension point of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lifted<C> {
    conversion: C,
}

impl<C> Lifted<C> {
    pub fn new(conversion: C) -> Self {
        Self { conversion }
    }
}

impl<C: Conversion> Conversion for Lifted<C> {
    type Input = C::Input;
    type Output = C::Output;

    fn apply(&self, input: C::Input) -> Result<C::Output, ConversionError> {
        self.conversion.apply(input)
    }

    fn unapply(&self, output: C::Output) -> Result<C::Input, ConversionError> {
        self.conversion.unapply(output)
    }
}

impl<C> AsyncConversion for Lifted<C>
where
    C: Conversion + Send + Sync,
    C::Input: Send,
    C::Output: Send,
{
    type Input = C::Input;
    type Output = C::Output;

    fn apply_async(&self, input: C::Input) -> ConversionFuture<'_, C::Output> {
        Box::pin(std::future::ready(self.conversion.apply(input)))
    }

    fn unapply_async(&self, output: C::Output) -> ConversionFuture<'_, C::Input> {
        Box::pin(std::future::ready(self.conversion.unapply(output)))
    }
}
