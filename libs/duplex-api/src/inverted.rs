use crate::conversion::{AsyncConversion, Conversion, ConversionFuture};
use crate::error::ConversionError;

/// Conversion with `apply` and `unapply` swapped.
///
/// `Inverted::new(Inverted::new(c))` behaves exactly like `c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inverted<C> {
    conversion: C,
}

impl<C> Inverted<C> {
    pub fn new(conversion: C) -> Self {
        Self { conversion }
    }

    /// Unwrap the original conversion.
    pub fn into_inner(self) -> C {
        self.conversion
    }
}

impl<C: Conversion> Conversion for Inverted<C> {
    type Input = C::Output;
    type Output = C::Input;

    #[inline]
    fn apply(&self, input: C::Output) -> Result<C::Input, ConversionError> {
        self.conversion.unapply(input)
    }

    #[inline]
    fn unapply(&self, output: C::Input) -> Result<C::Output, ConversionError> {
        self.conversion.apply(output)
    }
}

impl<C: AsyncConversion> AsyncConversion for Inverted<C> {
    type Input = C::Output;
    type Output = C::Input;

    fn apply_async(&self, input: C::Output) -> ConversionFuture<'_, C::Input> {
        self.conversion.unapply_async(input)
    }

    fn unapply_async(&self, output: C::Input) -> ConversionFuture<'_, C::Output> {
        self.conversion.apply_async(output)
    }
}

/// Shorthand for [`Inverted::new`]; works for sync and async conversions.
pub fn invert<C>(conversion: C) -> Inverted<C> {
    Inverted::new(conversion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert;

    fn to_upper() -> impl Conversion<Input = String, Output = String> + Send + Sync {
        convert(
            |s: String| {
                if s.chars().any(|c| c.is_ascii_uppercase()) {
                    return Err(ConversionError::transform(format!("{s:?} is not lowercase")));
                }
                Ok(s.to_ascii_uppercase())
            },
            |s: String| Ok(s.to_ascii_lowercase()),
        )
    }

    #[test]
    fn test_inverted_swaps_directions() {
        let inv = to_upper().inverted();
        assert_eq!(inv.apply("ABC".into()).unwrap(), "abc");
        assert_eq!(inv.unapply("abc".into()).unwrap(), "ABC");
        assert!(inv.unapply("Abc".into()).is_err());
    }

    #[test]
    fn test_involution() {
        let original = to_upper();
        let twice = invert(invert(to_upper()));
        for s in ["", "abc", "hello world", "Mixed"] {
            assert_eq!(twice.apply(s.into()), original.apply(s.into()));
            assert_eq!(twice.unapply(s.into()), original.unapply(s.into()));
        }

        let unwrapped = to_upper().inverted().into_inner();
        assert_eq!(unwrapped.apply("abc".into()).unwrap(), "ABC");
    }

    #[tokio::test]
    async fn test_inverted_async() {
        let inv = invert(to_upper().lift());
        assert_eq!(inv.apply_async("XY".into()).await.unwrap(), "xy");
        assert_eq!(inv.unapply_async("xy".into()).await.unwrap(), "XY");
    }
}
