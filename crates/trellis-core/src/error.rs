pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The markup could not be structurally parsed. `message` is the XML parser diagnostic,
    /// including its position.
    #[error("Parse error: {message}")]
    MalformedDocument { message: String },
}

impl From<roxmltree::Error> for Error {
    fn from(value: roxmltree::Error) -> Self {
        Self::MalformedDocument {
            message: value.to_string(),
        }
    }
}
