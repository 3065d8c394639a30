use crate::error::{LetterError, Result};
use crate::letters::DateKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub directories: DirectoryConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Relative roots resolve against this; defaults to the current directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<PathBuf>,
    pub input: PathBuf,
    pub archive: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        let root = Path::new("CombinedLetters");
        Self {
            base_directory: None,
            input: root.join("Input"),
            archive: root.join("Archive"),
            output: root.join("Output"),
        }
    }
}

/// Absolute input, archive and output roots for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootDirectories {
    pub input: PathBuf,
    pub archive: PathBuf,
    pub output: PathBuf,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LetterError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| LetterError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| LetterError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["letter-combiner.toml", ".letter-combiner.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref base) = cli_args.base_directory {
            self.directories.base_directory = Some(base.clone());
        }

        if let Some(ref input) = cli_args.input {
            self.directories.input = input.clone();
        }

        if let Some(ref archive) = cli_args.archive {
            self.directories.archive = archive.clone();
        }

        if let Some(ref output) = cli_args.output {
            self.directories.output = output.clone();
        }

        if let Some(ref date) = cli_args.date {
            self.run.date = Some(date.clone());
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| LetterError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| LetterError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let roots = [
            ("input", &self.directories.input),
            ("archive", &self.directories.archive),
            ("output", &self.directories.output),
        ];

        for (name, root) in roots {
            if root.as_os_str().is_empty() {
                return Err(LetterError::Config {
                    message: format!("The {} directory must not be empty", name),
                });
            }
        }

        if let Some(ref base) = self.directories.base_directory {
            if base.as_os_str().is_empty() {
                return Err(LetterError::Config {
                    message: "Base directory must not be empty when set".to_string(),
                });
            }
        }

        if let Some(ref date) = self.run.date {
            DateKey::parse(date)?;
        }

        Ok(())
    }

    /// Target date from configuration, if one was given.
    pub fn target_date(&self) -> Result<DateKey> {
        match self.run.date {
            Some(ref date) => DateKey::parse(date),
            None => Err(LetterError::Config {
                message: "No target date given. Pass DATE or set run.date in the configuration"
                    .to_string(),
            }),
        }
    }

    /// Resolve the three roots to absolute paths, using `current_dir` for
    /// anything relative.
    pub fn resolve_roots(&self, current_dir: &Path) -> Result<RootDirectories> {
        if current_dir.as_os_str().is_empty() {
            return Err(LetterError::Config {
                message: "Current directory could not be determined".to_string(),
            });
        }

        let base = match self.directories.base_directory {
            Some(ref base) => current_dir.join(base),
            None => current_dir.to_path_buf(),
        };

        Ok(RootDirectories {
            input: base.join(&self.directories.input),
            archive: base.join(&self.directories.archive),
            output: base.join(&self.directories.output),
        })
    }

    pub fn create_sample_config() -> String {
        let mut sample_config = Self::default();
        sample_config.run.date = Some("20220125".to_string());
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub base_directory: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub archive: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub date: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_directory(mut self, base_directory: Option<PathBuf>) -> Self {
        self.base_directory = base_directory;
        self
    }

    pub fn with_input(mut self, input: Option<PathBuf>) -> Self {
        self.input = input;
        self
    }

    pub fn with_archive(mut self, archive: Option<PathBuf>) -> Self {
        self.archive = archive;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_date(mut self, date: Option<String>) -> Self {
        self.date = date;
        self
    }
}
