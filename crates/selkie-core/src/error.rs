pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Empty input: no diagram content to parse")]
    EmptyInput,

    #[error("Could not decode diagram payload: {message}")]
    Decode { message: String },

    #[error(transparent)]
    StructuralParse(#[from] roxmltree::Error),

    #[error("Document is structurally valid but produced no nodes")]
    NoNodes,
}

impl Error {
    pub(crate) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
