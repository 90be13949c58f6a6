use std::{
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use procon_engine::GameConfig;

/// Destination for JSON artifacts (maps, match records).
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File(BufWriter<File>, PathBuf),
}

impl Output {
    /// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `None`.
    pub fn save_json<T>(value: &T, path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match path {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                Output::File(BufWriter::new(file), path)
            }
            None => Output::Stdout(io::stdout().lock()),
        };
        output
            .write_json(value)
            .with_context(|| format!("Failed to write JSON to {}", output.name()))
    }

    fn name(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_owned(),
            Output::File(_, path) => path.display().to_string(),
        }
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let writer: &mut dyn Write = match self {
            Output::Stdout(writer) => writer,
            Output::File(writer, _) => writer,
        };
        serde_json::to_writer_pretty(&mut *writer, value)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Reads a game configuration, or returns the defaults when no path is given.
///
/// The configuration is validated either way.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let config: GameConfig = match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open game config: {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse game config: {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    config.validate().context("Invalid game config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_config_loads_back() {
        let path = std::env::temp_dir().join(format!("procon-config-{}.json", std::process::id()));
        let config = GameConfig {
            obs_range: 3,
            num_ponds: 1,
            ..GameConfig::default()
        };
        Output::save_json(&config, Some(path.clone())).unwrap();
        let loaded = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let path = std::env::temp_dir().join(format!("procon-bad-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"width-min": 9, "width-max": 3}"#).unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("Invalid game config"));

        assert_eq!(load_config(None).unwrap(), GameConfig::default());
    }
}
