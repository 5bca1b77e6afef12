use duplex_api::AsyncConversion;

use super::{build_batch, read_all};
use crate::config::{CheckArgs, PipelineConfig};
use crate::error::CliError;

/// Encodes every file, decodes the result and compares it with the input.
pub async fn run(args: CheckArgs) -> Result<(), CliError> {
    let config = PipelineConfig::load(&args.config)?;
    let batch = build_batch(&config);

    let originals = read_all(&args.files).await?;
    let encoded = batch.unapply_async(originals.clone()).await?;
    let decoded = batch.apply_async(encoded).await?;

    let mut failed = 0;
    for ((path, original), (_, decoded)) in originals.iter().zip(&decoded) {
        if original == decoded {
            tracing::info!(file = %path.display(), bytes = original.len(), "round trip ok");
        } else {
            tracing::error!(
                file = %path.display(),
                original = original.len(),
                decoded = decoded.len(),
                "round trip mismatch"
            );
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(CliError::RoundTrip(failed));
    }
    Ok(())
}
