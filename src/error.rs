use thiserror::Error;

/// All errors that the crate can generate. Layout itself never fails; errors
/// only arise while setting up collaborators such as fonts.
#[derive(Error, Debug)]
pub enum TypesetError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),
}
