use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("Expected {expected} planets, found {found}")]
    PlanetCount { expected: usize, found: usize },
    #[error("Body name used more than once: {0:?}")]
    DuplicateName(String),
}
