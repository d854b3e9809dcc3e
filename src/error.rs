//! `Error` and `Result` types for this crate.
use std::fmt::{self, Display, Formatter};

pub(crate) type CowStr = ::std::borrow::Cow<'static, str>;

/// Different kinds of errors reported by context creation and use.
///
/// None of them terminate the process: it's up to the caller to decide whether
/// to retry, degrade or abort.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum ErrorKind {
    /// The windowing system libraries (on X11, libX11 and libGL) could not be loaded.
    LibraryUnavailable,
    /// The connection to the windowing system could not be opened.
    DisplayUnavailable,
    /// The windowing system's GL extension is too old (on X11, GLX below 1.3).
    UnsupportedGlxVersion,
    /// No framebuffer configuration matches the requested pixel format.
    NoMatchingFBConfig,
    /// The default window for an unshared context could not be created.
    WindowCreationFailed,
    /// The rendering context could not be created, even after falling back
    /// to the legacy version, or a protocol error was reported while creating it.
    ContextCreationFailed,
    /// The context could not be bound to its drawable.
    MakeCurrentFailed,
    /// The operation needs a context, but `create()` was never called.
    NotCreated,
    /// `create()` was called on a `NativeContext` that already owns a context.
    AlreadyCreated,
    /// Some arguments were invalid; You could retry with different ones.
    InvalidArgument,
}

/// An `ErrorKind` packed with an optional `reason` string.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Error {
    /// The error kind.
    pub kind: ErrorKind,
    /// A hopefully useful reason string, or `None` if unknown or not meaningful.
    pub reason: Option<CowStr>,
}

/// Alias to `Result<T, Error>`.
pub type Result<T> = ::std::result::Result<T, Error>;

impl ErrorKind {
    pub(crate) fn describe_quick(&self) -> &'static str {
        match *self {
            ErrorKind::LibraryUnavailable => "Windowing system libraries are unavailable",
            ErrorKind::DisplayUnavailable => "Failed to open display",
            ErrorKind::UnsupportedGlxVersion => "Unsupported GLX version",
            ErrorKind::NoMatchingFBConfig => "No matching framebuffer configuration",
            ErrorKind::WindowCreationFailed => "Failed to create window",
            ErrorKind::ContextCreationFailed => "Failed to create an OpenGL context",
            ErrorKind::MakeCurrentFailed => "Failed to make the OpenGL context current",
            ErrorKind::NotCreated => "The context was not created",
            ErrorKind::AlreadyCreated => "The context was already created",
            ErrorKind::InvalidArgument => "Invalid argument(s)",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.describe_quick())
    }
}

impl ::std::error::Error for ErrorKind {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.describe_quick())?;
        match self.reason {
            None => write!(f, " (no reason given)"),
            Some(ref s) => write!(f, ": {}", s),
        }
    }
}

impl ::std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, reason: None }
    }
}

#[allow(unused_imports)]
pub(crate) use self::utils::*;

mod utils {
    #![allow(dead_code)]
    use super::*;

    impl Error {
        pub(crate) fn new<S: Into<CowStr>>(kind: ErrorKind, s: S) -> Self {
            Self { kind, reason: Some(s.into()), }
        }
        pub(crate) fn unexplained(kind: ErrorKind) -> Self {
            Self { kind, reason: None, }
        }
    }

    pub(crate) fn failed<T, S: Into<CowStr>>(kind: ErrorKind, s: S) -> self::Result<T> {
        Err(Error::new(kind, s))
    }
    pub(crate) fn failed_unexplained<T>(kind: ErrorKind) -> self::Result<T> {
        Err(Error::unexplained(kind))
    }
}
