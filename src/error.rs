use thiserror::Error;

/// type alias for all operations on a [`crate::VarStore`] that could fail with a [`VarError`]
pub type Result<T> = std::result::Result<T, VarError>;

/// The Error variants used by the variable store.
///
/// The `MissingEquals`, `UnterminatedArray`, `EmptyName`, `NameTooLong` and `TableFull`
/// variants are assignment rejections: the table is left untouched and the session that
/// issued the command keeps running. `Io` and `Poisoned` are session-fatal.
#[derive(Error, Debug)]
pub enum VarError {
    /// an assignment had no `=` separating the variable name from the value
    #[error("assignment is missing '='")]
    MissingEquals,

    /// an array literal had no matching `{` / `}` pair
    #[error("array literal is missing a matching brace")]
    UnterminatedArray,

    /// the variable name was empty after trimming
    #[error("variable name is empty")]
    EmptyName,

    /// the variable name exceeded the maximum length
    #[error("variable name exceeds {0} bytes")]
    NameTooLong(usize),

    /// the table is at capacity and the assignment named a variable not already present
    #[error("variable table is full ({0} entries)")]
    TableFull(usize),

    /// the table mutex was poisoned by a panicking thread
    #[error("variable table lock poisoned")]
    Poisoned,

    /// a thread pool could not be constructed
    #[error("could not build thread pool: {0}")]
    ThreadPool(String),

    /// variant for invalid command line arguments
    #[error("could not parse {0}")]
    Parsing(String),

    /// variant for errors caused by socket or terminal IO
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VarError {
    /// `true` for the rejection variants that should be reported to the client on its
    /// own session rather than tearing the session down
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            VarError::MissingEquals
                | VarError::UnterminatedArray
                | VarError::EmptyName
                | VarError::NameTooLong(_)
                | VarError::TableFull(_)
        )
    }
}
