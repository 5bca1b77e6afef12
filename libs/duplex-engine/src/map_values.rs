use std::sync::Arc;

use duplex_api::{AsyncConversion, Conversion, ConversionError, ConversionFuture};

use crate::batch::{BatchOptions, join_indexed};

/// Поэлементная конвертация `Vec`.
///
/// - sync: elements are converted strictly in order, stopping at the
///   first failure.
/// - async: one batch unit per element, results reassembled in input order.
///
/// Either way a failing element fails the whole call; a shorter vector is
/// never returned.
#[derive(Debug)]
pub struct MapValues<C> {
    transform: Arc<C>,
    options: BatchOptions,
}

impl<C> Clone for MapValues<C> {
    fn clone(&self) -> Self {
        Self { transform: Arc::clone(&self.transform), options: self.options }
    }
}

impl<C> MapValues<C> {
    pub fn new(transform: C) -> Self {
        Self { transform: Arc::new(transform), options: BatchOptions::default() }
    }

    /// Cap the number of elements converted at once in async mode.
    /// `0` means unbounded.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.options = BatchOptions::with_max_concurrency(limit);
        self
    }
}

impl<C: Conversion> Conversion for MapValues<C> {
    type Input = Vec<C::Input>;
    type Output = Vec<C::Output>;

    fn apply(&self, input: Vec<C::Input>) -> Result<Vec<C::Output>, ConversionError> {
        input.into_iter().map(|x| self.transform.apply(x)).collect()
    }

    fn unapply(&self, output: Vec<C::Output>) -> Result<Vec<C::Input>, ConversionError> {
        output.into_iter().map(|y| self.transform.unapply(y)).collect()
    }
}

impl<C> AsyncConversion for MapValues<C>
where
    C: AsyncConversion + 'static,
    C::Input: 'static,
    C::Output: 'static,
{
    type Input = Vec<C::Input>;
    type Output = Vec<C::Output>;

    fn apply_async(&self, input: Vec<C::Input>) -> ConversionFuture<'_, Vec<C::Output>> {
        let units: Vec<_> = input
            .into_iter()
            .map(|x| {
                let transform = Arc::clone(&self.transform);
                async move { transform.apply_async(x).await }
            })
            .collect();
        Box::pin(join_indexed(units, self.options))
    }

    fn unapply_async(&self, output: Vec<C::Output>) -> ConversionFuture<'_, Vec<C::Input>> {
        let units: Vec<_> = output
            .into_iter()
            .map(|y| {
                let transform = Arc::clone(&self.transform);
                async move { transform.unapply_async(y).await }
            })
            .collect();
        Box::pin(join_indexed(units, self.options))
    }
}

/// Shorthand for [`MapValues::new`].
pub fn map_values<C>(transform: C) -> MapValues<C> {
    MapValues::new(transform)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use duplex_api::{AsyncConvert, convert};

    use super::*;

    fn parse_int() -> impl Conversion<Input = String, Output = i64> + Send + Sync + 'static {
        convert(
            |s: String| s.parse::<i64>().map_err(|e| ConversionError::transform(format!("{s:?}: {e}"))),
            |n: i64| Ok(n.to_string()),
        )
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sync_maps_each_element() {
        let c = map_values(parse_int());
        let out = c.apply(strings(&["1", "-2", "30"])).unwrap();
        assert_eq!(out, vec![1, -2, 30]);
        assert_eq!(c.unapply(out).unwrap(), strings(&["1", "-2", "30"]));
        assert_eq!(c.apply(Vec::new()).unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_sync_fail_fast() {
        let c = map_values(parse_int());
        let err = c.apply(strings(&["1", "two", "3"])).unwrap_err();
        assert!(matches!(err, ConversionError::Transform(_)));
    }

    #[test]
    fn test_sync_stops_before_later_elements() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let counted = convert(
            move |s: String| {
                counter.fetch_add(1, Ordering::SeqCst);
                s.parse::<i64>().map_err(|e| ConversionError::transform(e.to_string()))
            },
            |n: i64| Ok(n.to_string()),
        );

        let c = map_values(counted);
        assert!(c.apply(strings(&["1", "bad", "3", "4"])).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_async_preserves_order_under_reordered_completion() {
        let completed = Arc::new(Mutex::new(Vec::new()));
        let log = completed.clone();
        let slow_square = AsyncConvert::new(
            move |x: u64| {
                let log = log.clone();
                async move {
                    // Larger values finish first.
                    tokio::time::sleep(Duration::from_millis(60 - x * 10)).await;
                    log.lock().unwrap().push(x);
                    Ok::<_, ConversionError>(x * x)
                }
            },
            |y: u64| async move { Ok::<_, ConversionError>(y.isqrt()) },
        );

        let c = map_values(slow_square);
        let out = c.apply_async(vec![1, 2, 3]).await.unwrap();
        assert_eq!(out, vec![1, 4, 9]);
        assert_eq!(*completed.lock().unwrap(), vec![3, 2, 1]);

        assert_eq!(c.unapply_async(vec![9, 4, 1]).await.unwrap(), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_async_fail_fast_returns_no_partial_output() {
        let c = map_values(parse_int().lift());
        let result = c.apply_async(strings(&["7", "oops", "9"])).await;
        assert!(matches!(result, Err(ConversionError::Transform(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_async_matches_sync() {
        let input: Vec<String> = (0..100).map(|n| (n * 7 - 300).to_string()).collect();
        let sync = map_values(parse_int()).apply(input.clone()).unwrap();
        let concurrent = map_values(parse_int().lift())
            .with_max_concurrency(8)
            .apply_async(input)
            .await
            .unwrap();
        assert_eq!(sync, concurrent);
    }
}
