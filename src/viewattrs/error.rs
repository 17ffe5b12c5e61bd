use tagwright::TagError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttrError {
    #[error("Cannot coerce attribute `{name}` to {expected}: got {found}")]
    Coercion {
        name: String,
        expected: &'static str,
        found: String,
    },

    #[error("Expected a JSON object for an attribute map, got {0}")]
    NotAnObject(String),

    #[error("Invalid merge options: {0}")]
    Config(String),

    #[error("Tag error: {0}")]
    Tag(#[from] TagError),

    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, AttrError>;
