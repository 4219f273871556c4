pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate area label: {label}")]
    DuplicateArea { label: String },

    #[error("unknown area label: {label}")]
    UnknownArea { label: String },

    #[error("invalid similarity matrix: {message}")]
    InvalidMatrix { message: String },

    #[error("presence sheets disagree on the area list: {message}")]
    AreaMismatch { message: String },

    #[error("input has no areas")]
    EmptyInput,

    #[error("dendrogram build error: {message}")]
    InvalidDendrogram { message: String },
}
