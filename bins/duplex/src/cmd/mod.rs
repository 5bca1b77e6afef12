pub mod check;
pub mod run;

use std::path::PathBuf;

use duplex_api::{Conversion, ConversionError, Identity, Lifted, chain};
use duplex_codecs::{Base64, Gzip, Lz4, Utf8};
use duplex_engine::{MapValues, map_values};

use crate::config::{PipelineConfig, StageConfig};
use crate::error::CliError;

/// One type-erased bytes → bytes stage.
pub type ByteConversion = Box<dyn Conversion<Input = Vec<u8>, Output = Vec<u8>> + Send + Sync>;

impl StageConfig {
    pub fn build(&self) -> ByteConversion {
        match self {
            StageConfig::Gzip { level } => Box::new(Gzip::new(*level)),
            StageConfig::Lz4 => Box::new(Lz4),
            // base64 text bytes → raw bytes
            StageConfig::Base64 => Box::new(chain![Utf8, Base64]),
        }
    }
}

/// Stages composed in decode order; no stages is the identity.
pub fn build_pipeline(stages: &[StageConfig]) -> ByteConversion {
    let mut built = stages.iter().map(StageConfig::build);
    match built.next() {
        None => Box::new(Identity::<Vec<u8>>::new()),
        Some(first) => built.fold(first, |acc, next| -> ByteConversion { Box::new(acc.then(next)) }),
    }
}

/// Carries the file path beside its bytes so failures name the file.
pub struct PerFile(ByteConversion);

impl Conversion for PerFile {
    type Input = (PathBuf, Vec<u8>);
    type Output = (PathBuf, Vec<u8>);

    fn apply(&self, (path, bytes): (PathBuf, Vec<u8>)) -> Result<Self::Output, ConversionError> {
        let out = self.0.apply(bytes).map_err(|e| e.with_context(path.display()))?;
        Ok((path, out))
    }

    fn unapply(&self, (path, bytes): (PathBuf, Vec<u8>)) -> Result<Self::Input, ConversionError> {
        let out = self.0.unapply(bytes).map_err(|e| e.with_context(path.display()))?;
        Ok((path, out))
    }
}

/// Per-file conversion lifted over the whole file list.
pub fn build_batch(config: &PipelineConfig) -> MapValues<Lifted<PerFile>> {
    map_values(PerFile(build_pipeline(&config.stages)).lift())
        .with_max_concurrency(config.max_concurrency)
}

pub async fn read_all(files: &[PathBuf]) -> Result<Vec<(PathBuf, Vec<u8>)>, CliError> {
    let mut contents = Vec::with_capacity(files.len());
    for path in files {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| CliError::Io { path: path.clone(), source })?;
        tracing::debug!(file = %path.display(), bytes = bytes.len(), "read");
        contents.push((path.clone(), bytes));
    }
    Ok(contents)
}
