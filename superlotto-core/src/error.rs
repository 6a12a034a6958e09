use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("argument invalide : {0}")]
    InvalidArgument(String),

    #[error("stratégie inconnue : '{0}' (attendu : random, hot, cold, balanced)")]
    UnrecognizedStrategy(String),

    #[error("le tirage {0} existe déjà")]
    DuplicateDraw(String),

    #[error("configuration invalide : {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
