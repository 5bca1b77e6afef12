use std::path::{Path, PathBuf};

use duplex_api::AsyncConversion;

use super::{build_batch, read_all};
use crate::config::{PipelineConfig, RunArgs};
use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Stages top to bottom.
    Decode,
    /// Stages bottom to top.
    Encode,
}

pub async fn run(args: RunArgs, direction: Direction) -> Result<(), CliError> {
    let config = PipelineConfig::load(&args.config)?;
    tracing::info!(
        config = %args.config,
        stages = config.stages.len(),
        files = args.files.len(),
        ?direction,
        "pipeline loaded"
    );

    let batch = build_batch(&config);
    let inputs = read_all(&args.files).await?;
    let outputs = match direction {
        Direction::Decode => batch.apply_async(inputs).await?,
        Direction::Encode => batch.unapply_async(inputs).await?,
    };

    if let Some(dir) = &args.out_dir {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| CliError::Io { path: dir.clone(), source })?;
    }

    for (path, bytes) in outputs {
        let target = output_path(&path, args.out_dir.as_deref(), &args.suffix);
        tokio::fs::write(&target, &bytes)
            .await
            .map_err(|source| CliError::Io { path: target.clone(), source })?;
        tracing::info!(
            input = %path.display(),
            output = %target.display(),
            bytes = bytes.len(),
            "written"
        );
    }
    Ok(())
}

/// `<out_dir or input dir>/<file name>.<suffix>`
pub fn output_path(input: &Path, out_dir: Option<&Path>, suffix: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let file = format!("{name}.{suffix}");
    match out_dir {
        Some(dir) => dir.join(file),
        None => input.with_file_name(file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_next_to_input() {
        let p = output_path(Path::new("data/report.gz"), None, "out");
        assert_eq!(p, PathBuf::from("data/report.gz.out"));
    }

    #[test]
    fn test_output_path_in_out_dir() {
        let p = output_path(Path::new("data/report.gz"), Some(Path::new("/tmp/x")), "raw");
        assert_eq!(p, PathBuf::from("/tmp/x/report.gz.raw"));
    }

    #[tokio::test]
    async fn test_run_encode_then_decode_files() {
        let dir = std::env::temp_dir().join(format!("duplex-run-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = dir.join("duplex.toml");
        std::fs::write(&config, "[[stages]]\nkind = \"base64\"\n\n[[stages]]\nkind = \"gzip\"\n").unwrap();
        let input = dir.join("notes.txt");
        std::fs::write(&input, b"same text, twice. same text, twice.").unwrap();

        let encode = RunArgs {
            config: config.to_string_lossy().into_owned(),
            out_dir: None,
            suffix: "b64".into(),
            files: vec![input.clone()],
        };
        run(encode.clone(), Direction::Encode).await.unwrap();
        let encoded = std::fs::read(dir.join("notes.txt.b64")).unwrap();
        assert!(encoded.iter().all(u8::is_ascii));

        let decode = RunArgs {
            out_dir: Some(dir.join("decoded")),
            suffix: "txt".into(),
            files: vec![dir.join("notes.txt.b64")],
            ..encode
        };
        run(decode, Direction::Decode).await.unwrap();
        let decoded = std::fs::read(dir.join("decoded").join("notes.txt.b64.txt")).unwrap();
        assert_eq!(decoded, b"same text, twice. same text, twice.");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_run_missing_input() {
        let dir = std::env::temp_dir().join(format!("duplex-missing-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = dir.join("duplex.toml");
        std::fs::write(&config, "").unwrap();

        let args = RunArgs {
            config: config.to_string_lossy().into_owned(),
            out_dir: None,
            suffix: "out".into(),
            files: vec![dir.join("absent.bin")],
        };
        let err = run(args, Direction::Decode).await.unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
