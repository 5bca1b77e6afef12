use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::ConversionError;
use crate::inverted::Inverted;
use crate::lifted::Lifted;
use crate::pipeline::Pipeline;

/// Boxed future returned by [`AsyncConversion`] methods.
///
/// The API crate defines only the contract, without a dependency on any
/// runtime; executors live in `duplex-engine`.
pub type ConversionFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ConversionError>> + Send + 'a>>;

// ════════════════════════════════════════════════════════════════
//  Conversion
// ════════════════════════════════════════════════════════════════

/// Transforms an `Input` value into an `Output` value *and* an `Output`
/// value back into an `Input` value.
///
/// Lets a parser-printer emit domain types while staying printable: for
/// every `x` where `apply(x)` succeeds, `unapply(apply(x))` must equal `x`.
/// The runtime does not check this law.
///
/// Implementations are immutable descriptors: `apply` / `unapply` take
/// `&self`, hold no state between calls, and may be shared freely.
pub trait Conversion {
    /// The type of values this conversion converts from.
    type Input;
    /// The type of values this conversion converts to.
    type Output;

    /// Attempts to transform an input into an output.
    fn apply(&self, input: Self::Input) -> Result<Self::Output, ConversionError>;

    /// Attempts to transform an output back into an input.
    ///
    /// The reverse process of [`Conversion::apply`].
    fn unapply(&self, output: Self::Output) -> Result<Self::Input, ConversionError>;

    /// Chains `next` after this conversion.
    ///
    /// `apply` runs `self` then `next`; `unapply` runs `next` then `self`.
    fn then<D>(self, next: D) -> Pipeline<Self, D>
    where
        Self: Sized,
        D: Conversion<Input = Self::Output>,
    {
        Pipeline::new(self, next)
    }

    /// Swaps the two directions.
    fn inverted(self) -> Inverted<Self>
    where
        Self: Sized,
    {
        Inverted::new(self)
    }

    /// Runs this conversion behind the [`AsyncConversion`] contract.
    fn lift(self) -> Lifted<Self>
    where
        Self: Sized,
    {
        Lifted::new(self)
    }
}

// ════════════════════════════════════════════════════════════════
//  AsyncConversion
// ════════════════════════════════════════════════════════════════

/// Same contract as [`Conversion`], but `apply` / `unapply` may suspend
/// while awaiting external work (disk, network, a worker pool).
///
/// Methods carry an `_async` suffix so a type can implement both traits
/// without making call sites ambiguous.
pub trait AsyncConversion: Send + Sync {
    type Input: Send;
    type Output: Send;

    fn apply_async(&self, input: Self::Input) -> ConversionFuture<'_, Self::Output>;

    fn unapply_async(&self, output: Self::Output) -> ConversionFuture<'_, Self::Input>;

    /// Async analogue of [`Conversion::then`].
    fn then_async<D>(self, next: D) -> Pipeline<Self, D>
    where
        Self: Sized,
        D: AsyncConversion<Input = Self::Output>,
    {
        Pipeline::new(self, next)
    }
}

// ---------------------------------------------------------------------------
// Forwarding impls: references and smart pointers behave like the pointee
// ---------------------------------------------------------------------------

macro_rules! forward_conversion {
    ($($ptr:ty),* $(,)?) => {$(
        impl<C: Conversion + ?Sized> Conversion for $ptr {
            type Input = C::Input;
            type Output = C::Output;

            fn apply(&self, input: Self::Input) -> Result<Self::Output, ConversionError> {
                (**self).apply(input)
            }

            fn unapply(&self, output: Self::Output) -> Result<Self::Input, ConversionError> {
                (**self).unapply(output)
            }
        }

        impl<C: AsyncConversion + ?Sized> AsyncConversion for $ptr {
            type Input = C::Input;
            type Output = C::Output;

            fn apply_async(&self, input: Self::Input) -> ConversionFuture<'_, Self::Output> {
                (**self).apply_async(input)
            }

            fn unapply_async(&self, output: Self::Output) -> ConversionFuture<'_, Self::Input> {
                (**self).unapply_async(output)
            }
        }
    )*};
}

forward_conversion!(&C, Box<C>, Arc<C>);
