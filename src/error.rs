use core::fmt;

/// List of specific errors that may occur while driving the cable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A pin controller operation failed.
    ///
    /// Carries the embedded-hal error kind when the failing pin is an embedded-hal pin.
    Pin(Option<embedded_hal::digital::ErrorKind>),

    /// A pin was asked to take a direction that its role cannot take, e.g. driving TDO.
    Direction,

    /// A bank/pin pair that is not part of the configured pin map was addressed.
    UnmappedPin,

    /// Reading from or writing to the serial relay channel failed.
    Serial,

    /// An unspecified error occurred.
    Other,
}

/// The error type used by this library.
///
/// Errors can be introspected by calling [`Error::kind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    detail: &'static str,
}

impl Error {
    /// Create an error, e.g. from a `PinController` or `SerialChannel` implementation.
    pub const fn new(kind: ErrorKind, detail: &'static str) -> Self {
        Self { kind, detail }
    }

    /// Returns the [`ErrorKind`] describing this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Pin(Some(kind)) => write!(f, "pin error ({:?}): {}", kind, self.detail),
            ErrorKind::Pin(None) => write!(f, "pin error: {}", self.detail),
            ErrorKind::Serial => write!(f, "serial channel error: {}", self.detail),
            _ => f.write_str(self.detail),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl<E: embedded_hal::digital::Error> From<E> for Error {
    fn from(e: E) -> Self {
        Error::new(ErrorKind::Pin(Some(e.kind())), "embedded-hal pin failure")
    }
}

/// A result type with the error hardwired to [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
