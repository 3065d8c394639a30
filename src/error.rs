use thiserror::Error;

#[derive(Error, Debug)]
pub enum LetterError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path not found: {path}")]
    NotFound { path: String },

    #[error("Destination already exists: {path}")]
    AlreadyExists { path: String },

    #[error("Invalid date key: {date}")]
    InvalidDate { date: String },

    #[error("Letter file name has no student id: {name}")]
    InvalidFileName { name: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for LetterError {
    fn user_message(&self) -> String {
        match self {
            LetterError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            LetterError::NotFound { path } => {
                format!("Directory or file not found: {}", path)
            }
            LetterError::AlreadyExists { path } => {
                format!("Refusing to replace existing file: {}", path)
            }
            LetterError::InvalidDate { date } => {
                format!("Invalid date '{}': expected 8 digits in YYYYMMDD form", date)
            }
            LetterError::InvalidFileName { name } => {
                format!("Cannot read a student id from file name: {}", name)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            LetterError::Config { .. } => Some(
                "Check the configuration file and the --input/--archive/--output/--base-dir flags. Use --generate-config to create a sample file.".to_string()
            ),
            LetterError::NotFound { .. } => Some(
                "Make sure the Admission and Scholarship folders exist under the input root and that letters were delivered for the requested date.".to_string()
            ),
            LetterError::InvalidDate { .. } => Some(
                "Pass the date as YYYYMMDD, for example 20220125.".to_string()
            ),
            LetterError::InvalidFileName { .. } => Some(
                "The output directory should only contain combined-<id> letters. Remove unrelated files and run again.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for LetterError {
    fn from(error: toml::de::Error) -> Self {
        LetterError::Config {
            message: error.to_string(),
        }
    }
}

impl LetterError {
    pub(crate) fn not_found(path: &std::path::Path) -> Self {
        LetterError::NotFound {
            path: path.display().to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            LetterError::NotFound { .. } => true,
            LetterError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, LetterError>;
