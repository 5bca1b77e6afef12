use std::io::Read;

use duplex_api::{Conversion, ConversionError};

// ---- Gzip ----

/// Compressed bytes ↔ plain bytes (gzip).
///
/// `apply` decompresses, `unapply` compresses at `level`. The gzip header
/// is written with a zero mtime, so compressing the same bytes twice gives
/// the same output.
#[derive(Debug, Clone, Copy)]
pub struct Gzip {
    level: flate2::Compression,
}

impl Gzip {
    /// Compression level 1-9; out-of-range values are clamped.
    pub fn new(level: u32) -> Self {
        Self { level: flate2::Compression::new(level.clamp(1, 9)) }
    }

    pub fn level(&self) -> u32 {
        self.level.level()
    }
}

impl Default for Gzip {
    fn default() -> Self {
        Self::new(6)
    }
}

impl Conversion for Gzip {
    type Input = Vec<u8>;
    type Output = Vec<u8>;

    fn apply(&self, input: Vec<u8>) -> Result<Vec<u8>, ConversionError> {
        let mut decoder = flate2::read::GzDecoder::new(&input[..]);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| ConversionError::transform(format!("gzip decompress: {e}")))?;
        Ok(decompressed)
    }

    fn unapply(&self, output: Vec<u8>) -> Result<Vec<u8>, ConversionError> {
        let mut encoder = flate2::read::GzEncoder::new(&output[..], self.level);
        let mut compressed = Vec::new();
        encoder
            .read_to_end(&mut compressed)
            .map_err(|e| ConversionError::inverse(format!("gzip compress: {e}")))?;
        Ok(compressed)
    }
}

// ---- Lz4 ----

/// Size-prepended LZ4 block ↔ plain bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4;

impl Conversion for Lz4 {
    type Input = Vec<u8>;
    type Output = Vec<u8>;

    fn apply(&self, input: Vec<u8>) -> Result<Vec<u8>, ConversionError> {
        lz4_flex::decompress_size_prepended(&input)
            .map_err(|e| ConversionError::transform(format!("lz4 decompress: {e}")))
    }

    fn unapply(&self, output: Vec<u8>) -> Result<Vec<u8>, ConversionError> {
        Ok(lz4_flex::compress_prepend_size(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<u8> {
        b"the quick brown fox jumps over the lazy dog\n".repeat(50)
    }

    #[test]
    fn test_gzip_compress_then_decompress() {
        let gz = Gzip::default();
        let compressed = gz.unapply(sample()).unwrap();
        assert!(compressed.len() < sample().len());
        assert_eq!(gz.apply(compressed).unwrap(), sample());
    }

    #[test]
    fn test_gzip_is_deterministic() {
        let gz = Gzip::new(9);
        assert_eq!(gz.unapply(sample()).unwrap(), gz.unapply(sample()).unwrap());
    }

    #[test]
    fn test_gzip_rejects_garbage() {
        let err = Gzip::default().apply(b"not gzip".to_vec()).unwrap_err();
        assert!(matches!(err, ConversionError::Transform(_)));
    }

    #[test]
    fn test_gzip_level_is_clamped() {
        assert_eq!(Gzip::new(0).level(), 1);
        assert_eq!(Gzip::new(42).level(), 9);
    }

    #[test]
    fn test_lz4_round_trip() {
        let compressed = Lz4.unapply(sample()).unwrap();
        assert_eq!(Lz4.apply(compressed).unwrap(), sample());
    }

    #[test]
    fn test_lz4_rejects_truncated_block() {
        let mut compressed = Lz4.unapply(sample()).unwrap();
        compressed.truncate(6);
        assert!(Lz4.apply(compressed).is_err());
    }
}
