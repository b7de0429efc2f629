#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unexpected end of data at offset {offset} (wanted {wanted} bytes, {have} available)")]
    UnexpectedEof { offset: usize, wanted: usize, have: usize },

    #[error("not a world save: {0}")]
    Format(String),

    #[error("unsupported world version {found} (minimum supported is {minimum})")]
    UnsupportedVersion { found: i32, minimum: i32 },

    #[error("header decode failed: {0}")]
    HeaderDecode(String),

    #[error("tile decode failed: {0}")]
    TileDecode(String),

    #[error("render failed: {0}")]
    Render(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("string too long: {len} bytes (max {max})")]
    StringTooLong { len: usize, max: usize },

    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
