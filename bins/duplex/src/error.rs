use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("io ({}): {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("{0}")]
    Conversion(#[from] duplex_api::ConversionError),

    #[error("round trip failed for {0} file(s)")]
    RoundTrip(usize),
}
