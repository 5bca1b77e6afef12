use std::marker::PhantomData;

use duplex_api::{Conversion, ConversionError};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// JSON text ↔ a serde type.
///
/// Text printed by `unapply` is compact unless built with
/// [`Json::pretty`]; the round-trip law holds for text produced by the
/// same printer.
pub struct Json<T> {
    pretty: bool,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> Json<T> {
    pub fn new() -> Self {
        Self { pretty: false, _marker: PhantomData }
    }

    pub fn pretty() -> Self {
        Self { pretty: true, _marker: PhantomData }
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Json<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Json<T> {}

impl<T> std::fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Json").field("pretty", &self.pretty).finish()
    }
}

impl<T: Serialize + DeserializeOwned> Conversion for Json<T> {
    type Input = String;
    type Output = T;

    fn apply(&self, input: String) -> Result<T, ConversionError> {
        serde_json::from_str(&input).map_err(|e| ConversionError::transform(format!("json: {e}")))
    }

    fn unapply(&self, output: T) -> Result<String, ConversionError> {
        let printed = if self.pretty {
            serde_json::to_string_pretty(&output)
        } else {
            serde_json::to_string(&output)
        };
        printed.map_err(|e| ConversionError::inverse(format!("json: {e}")))
    }
}
