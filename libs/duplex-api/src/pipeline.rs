use crate::conversion::{AsyncConversion, Conversion, ConversionFuture};
use crate::error::ConversionError;

// ════════════════════════════════════════════════════════════════
//  Pipeline: upstream → downstream
// ════════════════════════════════════════════════════════════════

/// Sequential composition of two conversions.
///
/// - `apply`: `upstream.apply` → `downstream.apply`
/// - `unapply`: `downstream.unapply` → `upstream.unapply` (reverse order)
///
/// A failing stage stops the chain; later stages are never invoked.
/// Built with [`Conversion::then`], [`AsyncConversion::then_async`],
/// [`chain!`](crate::chain) or [`chain_async!`](crate::chain_async), which
/// check `upstream.Output == downstream.Input` where the pipeline is built.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<U, D> {
    upstream: U,
    downstream: D,
}

impl<U, D> Pipeline<U, D> {
    pub fn new(upstream: U, downstream: D) -> Self {
        Self { upstream, downstream }
    }
}

impl<U, D> Conversion for Pipeline<U, D>
where
    U: Conversion,
    D: Conversion<Input = U::Output>,
{
    type Input = U::Input;
    type Output = D::Output;

    fn apply(&self, input: U::Input) -> Result<D::Output, ConversionError> {
        let mid = self.upstream.apply(input)?;
        self.downstream.apply(mid)
    }

    fn unapply(&self, output: D::Output) -> Result<U::Input, ConversionError> {
        let mid = self.downstream.unapply(output)?;
        self.upstream.unapply(mid)
    }
}

impl<U, D> AsyncConversion for Pipeline<U, D>
where
    U: AsyncConversion,
    D: AsyncConversion<Input = U::Output>,
{
    type Input = U::Input;
    type Output = D::Output;

    fn apply_async(&self, input: U::Input) -> ConversionFuture<'_, D::Output> {
        Box::pin(async move {
            let mid = self.upstream.apply_async(input).await?;
            self.downstream.apply_async(mid).await
        })
    }

    fn unapply_async(&self, output: D::Output) -> ConversionFuture<'_, U::Input> {
        Box::pin(async move {
            let mid = self.downstream.unapply_async(output).await?;
            self.upstream.unapply_async(mid).await
        })
    }
}

// ════════════════════════════════════════════════════════════════
//  chain! / chain_async!
// ════════════════════════════════════════════════════════════════

/// Compose conversions left to right.
///
/// - `chain![]` → [`Identity`](crate::Identity)
/// - `chain![c]` → `c`
/// - `chain![c1, c2, ..]` → `c1.then(c2).then(..)`
///
/// ```
/// use duplex_api::{chain, convert, Conversion, ConversionError};
///
/// let inc = convert(|x: i32| Ok::<_, ConversionError>(x + 1), |y: i32| Ok(y - 1));
/// let dbl = convert(|x: i32| Ok::<_, ConversionError>(x * 2), |y: i32| Ok(y / 2));
/// let c = chain![inc, dbl];
/// assert_eq!(c.apply(3).unwrap(), 8);
/// assert_eq!(c.unapply(8).unwrap(), 3);
/// ```
#[macro_export]
macro_rules! chain {
    () => {
        $crate::Identity::new()
    };
    ($only:expr $(,)?) => {
        $only
    };
    ($first:expr, $second:expr $(, $rest:expr)* $(,)?) => {
        $crate::chain!($crate::Conversion::then($first, $second) $(, $rest)*)
    };
}

/// Async analogue of [`chain!`].
#[macro_export]
macro_rules! chain_async {
    () => {
        $crate::Identity::new()
    };
    ($only:expr $(,)?) => {
        $only
    };
    ($first:expr, $second:expr $(, $rest:expr)* $(,)?) => {
        $crate::chain_async!($crate::AsyncConversion::then_async($first, $second) $(, $rest)*)
    };
}
