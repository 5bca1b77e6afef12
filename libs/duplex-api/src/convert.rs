use std::future::Future;
use std::marker::PhantomData;

use crate::conversion::{AsyncConversion, Conversion, ConversionFuture};
use crate::error::ConversionError;

// ════════════════════════════════════════════════════════════════
//  Convert: closure pair as a leaf conversion
// ════════════════════════════════════════════════════════════════

/// Ad hoc conversion built from a forward and a backward function.
///
/// Used when no structural combinator fits. The two closures must be
/// inverse to each other on the values where `apply` succeeds.
pub struct Convert<I, O, F, G> {
    apply: F,
    unapply: G,
    _marker: PhantomData<fn(I) -> O>,
}

impl<I, O, F, G> Convert<I, O, F, G>
where
    F: Fn(I) -> Result<O, ConversionError>,
    G: Fn(O) -> Result<I, ConversionError>,
{
    pub fn new(apply: F, unapply: G) -> Self {
        Self { apply, unapply, _marker: PhantomData }
    }
}

impl<I, O, F: Clone, G: Clone> Clone for Convert<I, O, F, G> {
    fn clone(&self) -> Self {
        Self {
            apply: self.apply.clone(),
            unapply: self.unapply.clone(),
            _marker: PhantomData,
        }
    }
}

impl<I, O, F, G> Conversion for Convert<I, O, F, G>
where
    F: Fn(I) -> Result<O, ConversionError>,
    G: Fn(O) -> Result<I, ConversionError>,
{
    type Input = I;
    type Output = O;

    #[inline]
    fn apply(&self, input: I) -> Result<O, ConversionError> {
        (self.apply)(input)
    }

    #[inline]
    fn unapply(&self, output: O) -> Result<I, ConversionError> {
        (self.unapply)(output)
    }
}

/// Shorthand for [`Convert::new`].
pub fn convert<I, O, F, G>(apply: F, unapply: G) -> Convert<I, O, F, G>
where
    F: Fn(I) -> Result<O, ConversionError>,
    G: Fn(O) -> Result<I, ConversionError>,
{
    Convert::new(apply, unapply)
}

// ════════════════════════════════════════════════════════════════
//  AsyncConvert: closures returning futures
// ════════════════════════════════════════════════════════════════

/// Async counterpart of [`Convert`]: each closure returns a future.
///
/// Futures must be `'static`; closures that need shared state should
/// capture an `Arc` and clone it into the returned `async move` block.
pub struct AsyncConvert<I, O, F, G> {
    apply: F,
    unapply: G,
    _marker: PhantomData<fn(I) -> O>,
}

impl<I, O, F, G, FA, FU> AsyncConvert<I, O, F, G>
where
    F: Fn(I) -> FA,
    G: Fn(O) -> FU,
    FA: Future<Output = Result<O, ConversionError>>,
    FU: Future<Output = Result<I, ConversionError>>,
{
    pub fn new(apply: F, unapply: G) -> Self {
        Self { apply, unapply, _marker: PhantomData }
    }
}

impl<I, O, F, G, FA, FU> AsyncConversion for AsyncConvert<I, O, F, G>
where
    I: Send,
    O: Send,
    F: Fn(I) -> FA + Send + Sync,
    G: Fn(O) -> FU + Send + Sync,
    FA: Future<Output = Result<O, ConversionError>> + Send + 'static,
    FU: Future<Output = Result<I, ConversionError>> + Send + 'static,
{
    type Input = I;
    type Output = O;

    fn apply_async(&self, input: I) -> ConversionFuture<'_, O> {
        Box::pin((self.apply)(input))
    }

    fn unapply_async(&self, output: O) -> ConversionFuture<'_, I> {
        Box::pin((self.unapply)(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn celsius_to_fahrenheit() -> impl Conversion<Input = i32, Output = i32> {
        convert(
            |c: i32| Ok(c * 9 / 5 + 32),
            |f: i32| {
                if (f - 32) % 9 != 0 {
                    return Err(ConversionError::inverse(format!("{f}F has no whole Celsius value")));
                }
                Ok((f - 32) * 5 / 9)
            },
        )
    }

    #[test]
    fn test_convert_delegates_to_closures() {
        let c = celsius_to_fahrenheit();
        assert_eq!(c.apply(100).unwrap(), 212);
        assert_eq!(c.unapply(212).unwrap(), 100);
        assert_eq!(c.apply(-40).unwrap(), -40);
    }

    #[test]
    fn test_convert_propagates_failure() {
        let c = celsius_to_fahrenheit();
        let err = c.unapply(100).unwrap_err();
        assert!(matches!(err, ConversionError::InverseTransform(_)));
    }

    #[tokio::test]
    async fn test_async_convert() {
        let c = AsyncConvert::new(
            |s: String| async move {
                s.parse::<u16>().map_err(|e| ConversionError::transform(e.to_string()))
            },
            |n: u16| async move { Ok::<_, ConversionError>(n.to_string()) },
        );
        assert_eq!(c.apply_async("8080".into()).await.unwrap(), 8080);
        assert_eq!(c.unapply_async(443).await.unwrap(), "443");
        assert!(c.apply_async("http".into()).await.is_err());
    }
}
