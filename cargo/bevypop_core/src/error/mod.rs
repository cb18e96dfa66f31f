use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required template, parent or controller reference is missing, or the popup could not be created.
    Configuration,
    Io,
    Parse,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Io => write!(f, "io"),
            ErrorKind::Parse => write!(f, "parse"),
        }
    }
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub code: String,
    pub details: Option<String>,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} -> {}",
            self.kind,
            self.code,
            self.details.as_deref().unwrap_or("/")
        )
    }
}

impl std::error::Error for Error {}

pub type EResult<T> = Result<T, Error>;

#[macro_export]
macro_rules! bail {
    ($kind:expr, $code:expr) => {{
        return Err($crate::error::Error::new($kind, $code));
    }};

    ($kind:expr, $code:expr, $details:expr) => {{
        return Err($crate::error::Error::new_with_details($kind, $code, $details));
    }};
}

impl Error {
    pub fn new(kind: ErrorKind, code: impl ToString) -> Error {
        Error {
            kind,
            code: code.to_string(),
            details: Option::None,
        }
    }

    pub fn new_with_details(kind: ErrorKind, code: impl ToString, details: impl ToString) -> Error {
        Error {
            kind,
            code: code.to_string(),
            details: Option::Some(details.to_string()),
        }
    }

    pub fn is_configuration(&self) -> bool {
        self.kind == ErrorKind::Configuration
    }
}
