use std::marker::PhantomData;

use duplex_api::{AsyncConversion, Conversion, ConversionError, ConversionFuture};

/// `Vec<T>` ↔ `[T; N]`.
///
/// Bridges a variable-length sequence into a fixed-arity shape; `apply`
/// fails with [`ConversionError::ArityMismatch`] when the length is not `N`.
pub struct Exactly<T, const N: usize> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T, const N: usize> Exactly<T, N> {
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T, const N: usize> Default for Exactly<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Clone for Exactly<T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for Exactly<T, N> {}

impl<T, const N: usize> std::fmt::Debug for Exactly<T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Exactly<{N}>")
    }
}

impl<T, const N: usize> Conversion for Exactly<T, N> {
    type Input = Vec<T>;
    type Output = [T; N];

    fn apply(&self, input: Vec<T>) -> Result<[T; N], ConversionError> {
        let actual = input.len();
        <[T; N]>::try_from(input).map_err(|_| ConversionError::arity(N, actual))
    }

    fn unapply(&self, output: [T; N]) -> Result<Vec<T>, ConversionError> {
        Ok(Vec::from(output))
    }
}

impl<T: Send, const N: usize> AsyncConversion for Exactly<T, N> {
    type Input = Vec<T>;
    type Output = [T; N];

    fn apply_async(&self, input: Vec<T>) -> ConversionFuture<'_, [T; N]> {
        Box::pin(std::future::ready(self.apply(input)))
    }

    fn unapply_async(&self, output: [T; N]) -> ConversionFuture<'_, Vec<T>> {
        Box::pin(std::future::ready(self.unapply(output)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_values;

    #[test]
    fn test_exact_length() {
        let c = Exactly::<u8, 3>::new();
        assert_eq!(c.apply(vec![1, 2, 3]).unwrap(), [1, 2, 3]);
        assert_eq!(c.unapply([4, 5, 6]).unwrap(), vec![4, 5, 6]);
    }

    #[test]
    fn test_wrong_length_is_arity_mismatch() {
        let c = Exactly::<u8, 2>::new();
        assert_eq!(c.apply(vec![1, 2, 3]).unwrap_err(), ConversionError::arity(2, 3));
        assert_eq!(c.apply(Vec::new()).unwrap_err(), ConversionError::arity(2, 0));
    }

    #[tokio::test]
    async fn test_rows_of_pairs() {
        let rows = map_values(Exactly::<&str, 2>::new());
        let out = rows.apply_async(vec![vec!["a", "1"], vec!["b", "2"]]).await.unwrap();
        assert_eq!(out, vec![["a", "1"], ["b", "2"]]);

        let err = rows.apply_async(vec![vec!["a", "1"], vec!["b"]]).await.unwrap_err();
        assert_eq!(err, ConversionError::arity(2, 1));
    }
}
