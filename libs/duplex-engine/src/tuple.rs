use duplex_api::{AsyncConversion, Conversion, ConversionError, ConversionFuture};

/// Positionwise conversion of a fixed-arity tuple.
///
/// Slot `i` of the input goes through conversion `i`; positions are
/// independent. Implemented for tuples of 1 to 8 conversions.
///
/// ```
/// use duplex_api::{convert, Conversion, ConversionError, Identity};
/// use duplex_engine::Tuple;
///
/// let int = convert(
///     |s: String| s.parse::<i64>().map_err(|e| ConversionError::transform(e.to_string())),
///     |n: i64| Ok(n.to_string()),
/// );
/// let t = Tuple::new((int, Identity::<String>::new()));
/// assert_eq!(t.apply(("5".into(), "x".into())).unwrap(), (5, "x".to_string()));
/// ```
///
/// A slot whose type does not match its conversion is rejected when the
/// program is compiled:
///
/// ```compile_fail
/// use duplex_api::{convert, Conversion, ConversionError, Identity};
/// use duplex_engine::Tuple;
///
/// let int = convert(
///     |s: String| s.parse::<i64>().map_err(|e| ConversionError::transform(e.to_string())),
///     |n: i64| Ok(n.to_string()),
/// );
/// let t = Tuple::new((int, Identity::<String>::new()));
/// let _ = t.apply((5_i64, "x".to_string()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Tuple<T> {
    conversions: T,
}

impl<T> Tuple<T> {
    pub fn new(conversions: T) -> Self {
        Self { conversions }
    }
}

/// Shorthand for [`Tuple::new`].
pub fn tuple<T>(conversions: T) -> Tuple<T> {
    Tuple::new(conversions)
}

// Sync: позиции идут в объявленном порядке, первая ошибка останавливает остальные.
// Async: все позиции опрашиваются вместе внутри одного родительского future,
// первая ошибка отбрасывает соседей.
macro_rules! tuple_impls {
    ($( ($($C:ident $idx:tt),+) )+) => {$(
        impl<$($C: Conversion),+> Conversion for Tuple<($($C,)+)> {
            type Input = ($($C::Input,)+);
            type Output = ($($C::Output,)+);

            fn apply(&self, input: Self::Input) -> Result<Self::Output, ConversionError> {
                Ok(($(self.conversions.$idx.apply(input.$idx)?,)+))
            }

            fn unapply(&self, output: Self::Output) -> Result<Self::Input, ConversionError> {
                Ok(($(self.conversions.$idx.unapply(output.$idx)?,)+))
            }
        }

        impl<$($C: AsyncConversion),+> AsyncConversion for Tuple<($($C,)+)> {
            type Input = ($($C::Input,)+);
            type Output = ($($C::Output,)+);

            fn apply_async(&self, input: Self::Input) -> ConversionFuture<'_, Self::Output> {
                Box::pin(async move {
                    tokio::try_join!($(self.conversions.$idx.apply_async(input.$idx)),+)
                })
            }

            fn unapply_async(&self, output: Self::Output) -> ConversionFuture<'_, Self::Input> {
                Box::pin(async move {
                    tokio::try_join!($(self.conversions.$idx.unapply_async(output.$idx)),+)
                })
            }
        }
    )+};
}

tuple_impls! {
    (C0 0)
    (C0 0, C1 1)
    (C0 0, C1 1, C2 2)
    (C0 0, C1 1, C2 2, C3 3)
    (C0 0, C1 1, C2 2, C3 3, C4 4)
    (C0 0, C1 1, C2 2, C3 3, C4 4, C5 5)
    (C0 0, C1 1, C2 2, C3 3, C4 4, C5 5, C6 6)
    (C0 0, C1 1, C2 2, C3 3, C4 4, C5 5, C6 6, C7 7)
}
