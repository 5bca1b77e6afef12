use base64::Engine;
use duplex_api::{Conversion, ConversionError};

// ════════════════════════════════════════════════════════════════
//  Utf8: bytes ↔ String
// ════════════════════════════════════════════════════════════════

/// Raw bytes ↔ UTF-8 text.
///
/// Invalid UTF-8 is rejected instead of being replaced with U+FFFD, so
/// `unapply(apply(bytes))` always returns the original bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8;

impl Conversion for Utf8 {
    type Input = Vec<u8>;
    type Output = String;

    fn apply(&self, input: Vec<u8>) -> Result<String, ConversionError> {
        String::from_utf8(input).map_err(|e| ConversionError::transform(format!("utf-8: {e}")))
    }

    fn unapply(&self, output: String) -> Result<Vec<u8>, ConversionError> {
        Ok(output.into_bytes())
    }
}

// ════════════════════════════════════════════════════════════════
//  Base64: text ↔ bytes
// ════════════════════════════════════════════════════════════════

/// Base64 text (standard alphabet, padded) ↔ decoded bytes.
///
/// Строгий разбор: пробелы и завершающий `\n` отклоняются.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64;

impl Conversion for Base64 {
    type Input = String;
    type Output = Vec<u8>;

    fn apply(&self, input: String) -> Result<Vec<u8>, ConversionError> {
        base64::engine::general_purpose::STANDARD
            .decode(input.as_bytes())
            .map_err(|e| ConversionError::transform(format!("base64: {e}")))
    }

    fn unapply(&self, output: Vec<u8>) -> Result<String, ConversionError> {
        Ok(base64::engine::general_purpose::STANDARD.encode(output))
    }
}

#[cfg(test)]
mod tests {
    use duplex_api::chain;

    use super::*;

    #[test]
    fn test_utf8_strict() {
        assert_eq!(Utf8.apply("héllo".as_bytes().to_vec()).unwrap(), "héllo");
        assert_eq!(Utf8.unapply("héllo".into()).unwrap(), "héllo".as_bytes());

        let err = Utf8.apply(vec![0x66, 0xff, 0x6f]).unwrap_err();
        assert!(matches!(err, ConversionError::Transform(_)));
    }

    #[test]
    fn test_base64_decode_and_encode() {
        assert_eq!(Base64.apply("aGVsbG8=".into()).unwrap(), b"hello");
        assert_eq!(Base64.unapply(b"hello".to_vec()).unwrap(), "aGVsbG8=");
        assert!(Base64.apply("not*base64".into()).is_err());
    }

    #[test]
    fn test_base64_rejects_trailing_newline() {
        let err = Base64.apply("aGk=\n".into()).unwrap_err();
        assert!(matches!(err, ConversionError::Transform(_)));

        let text = "aGk=".to_string();
        let bytes = Base64.apply(text.clone()).unwrap();
        assert_eq!(Base64.unapply(bytes).unwrap(), text);
    }

    #[test]
    fn test_bytes_pipeline_through_text() {
        let c = chain![Utf8, Base64];
        assert_eq!(c.apply(b"AAEC".to_vec()).unwrap(), vec![0, 1, 2]);
        assert_eq!(c.unapply(vec![0, 1, 2]).unwrap(), b"AAEC");

        let err = c.apply(vec![0xc3]).unwrap_err();
        assert!(err.to_string().starts_with("transform: utf-8"));
    }
}
