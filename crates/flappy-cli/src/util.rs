use std::{
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use flappy_engine::GameConfig;

use crate::schema::ai_model::AiModel;

/// Destination of a JSON document: a file, or stdout when no path is given.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => Output::create(path)?,
            None => Output::Stdout(io::stdout().lock()),
        };
        output.write_json(value)
    }

    pub fn create(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    /// Writes `value` as pretty JSON followed by a newline, then flushes.
    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let writer: &mut dyn io::Write = match self {
            Output::Stdout(writer) => writer,
            Output::File { writer, .. } => writer,
        };
        serde_json::to_writer_pretty(&mut *writer, value)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(writer))
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Read a trained model from a JSON file
pub fn read_ai_model_file<P>(path: P) -> anyhow::Result<AiModel>
where
    P: AsRef<Path>,
{
    read_json_file("AI model", path)
}

/// Loads and validates the game configuration.
///
/// Without a path the built-in defaults are used. Missing fields in the file
/// also fall back to their defaults.
pub fn load_game_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let config: GameConfig = match path {
        Some(path) => read_json_file("game config", path)?,
        None => GameConfig::default(),
    };
    config.validate().with_context(|| match path {
        Some(path) => format!("Invalid game config: {}", path.display()),
        None => "Invalid default game config".to_owned(),
    })?;
    Ok(config)
}
