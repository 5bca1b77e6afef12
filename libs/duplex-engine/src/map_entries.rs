use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use duplex_api::{AsyncConversion, Conversion, ConversionError, ConversionFuture};

use crate::batch::{BatchOptions, join_indexed};

/// Lifts a key conversion and a value conversion over a `HashMap`.
///
/// Output keys must stay unique: if two source keys convert to the same
/// key the call fails with [`ConversionError::KeyCollision`] and no map is
/// produced. The same check guards `unapply`.
///
/// In async mode every entry is its own batch unit, and within an entry
/// the key and the value are converted concurrently.
#[derive(Debug)]
pub struct MapEntries<K, V> {
    keys: Arc<K>,
    values: Arc<V>,
    options: BatchOptions,
}

impl<K, V> Clone for MapEntries<K, V> {
    fn clone(&self) -> Self {
        Self {
            keys: Arc::clone(&self.keys),
            values: Arc::clone(&self.values),
            options: self.options,
        }
    }
}

impl<K, V> MapEntries<K, V> {
    pub fn new(keys: K, values: V) -> Self {
        Self {
            keys: Arc::new(keys),
            values: Arc::new(values),
            options: BatchOptions::default(),
        }
    }

    /// Cap the number of entries converted at once in async mode.
    /// `0` means unbounded.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.options = BatchOptions::with_max_concurrency(limit);
        self
    }
}

/// Build a map from converted pairs, rejecting duplicate keys.
fn collect_unique<K, V, I>(pairs: I) -> Result<HashMap<K, V>, ConversionError>
where
    K: Eq + Hash + Debug,
    I: IntoIterator<Item = Result<(K, V), ConversionError>>,
{
    let pairs = pairs.into_iter();
    let mut out = HashMap::with_capacity(pairs.size_hint().0);
    for pair in pairs {
        let (key, value) = pair?;
        match out.entry(key) {
            Entry::Occupied(occupied) => {
                return Err(ConversionError::key_collision(occupied.key()));
            }
            Entry::Vacant(vacant) => {
                vacant.insert(value);
            }
        }
    }
    Ok(out)
}

impl<K, V> Conversion for MapEntries<K, V>
where
    K: Conversion,
    V: Conversion,
    K::Input: Eq + Hash + Debug,
    K::Output: Eq + Hash + Debug,
{
    type Input = HashMap<K::Input, V::Input>;
    type Output = HashMap<K::Output, V::Output>;

    fn apply(&self, input: Self::Input) -> Result<Self::Output, ConversionError> {
        collect_unique(
            input
                .into_iter()
                .map(|(k, v)| Ok::<_, ConversionError>((self.keys.apply(k)?, self.values.apply(v)?))),
        )
    }

    fn unapply(&self, output: Self::Output) -> Result<Self::Input, ConversionError> {
        collect_unique(
            output
                .into_iter()
                .map(|(k, v)| Ok::<_, ConversionError>((self.keys.unapply(k)?, self.values.unapply(v)?))),
        )
    }
}

impl<K, V> AsyncConversion for MapEntries<K, V>
where
    K: AsyncConversion + 'static,
    V: AsyncConversion + 'static,
    K::Input: Eq + Hash + Debug + 'static,
    K::Output: Eq + Hash + Debug + 'static,
    V::Input: 'static,
    V::Output: 'static,
{
    type Input = HashMap<K::Input, V::Input>;
    type Output = HashMap<K::Output, V::Output>;

    fn apply_async(&self, input: Self::Input) -> ConversionFuture<'_, Self::Output> {
        let units: Vec<_> = input
            .into_iter()
            .map(|(k, v)| {
                let keys = Arc::clone(&self.keys);
                let values = Arc::clone(&self.values);
                async move { tokio::try_join!(keys.apply_async(k), values.apply_async(v)) }
            })
            .collect();
        let options = self.options;
        Box::pin(async move {
            let pairs = join_indexed(units, options).await?;
            collect_unique(pairs.into_iter().map(Ok))
        })
    }

    fn unapply_async(&self, output: Self::Output) -> ConversionFuture<'_, Self::Input> {
        let units: Vec<_> = output
            .into_iter()
            .map(|(k, v)| {
                let keys = Arc::clone(&self.keys);
                let values = Arc::clone(&self.values);
                async move { tokio::try_join!(keys.unapply_async(k), values.unapply_async(v)) }
            })
            .collect();
        let options = self.options;
        Box::pin(async move {
            let pairs = join_indexed(units, options).await?;
            collect_unique(pairs.into_iter().map(Ok))
        })
    }
}

/// Shorthand for [`MapEntries::new`].
pub fn map_entries<K, V>(keys: K, values: V) -> MapEntries<K, V> {
    MapEntries::new(keys, values)
}
