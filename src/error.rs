use thiserror::Error;

use crate::metadata::{
    identity::AssemblyIdentity,
    tables::{CodedIndexType, TableId},
};

/// Helper macro for creating malformed data errors with source location information.
///
/// This macro simplifies the creation of [`crate::Error::Malformed`] errors by automatically
/// capturing the current file and line number where the error was created.
///
/// # Arguments
///
/// * `msg` - A string or expression that can be converted to a string
/// * `fmt, args...` - A format string and its arguments (like `format!` macro)
macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can
/// potentially return.
///
/// Construction errors ([`Error::Validation`], [`Error::CodedIndexMismatch`]) are raised
/// at the call that violates the precondition. Resolution errors
/// ([`Error::AssemblyNotFound`], [`Error::ResolutionFailed`]) carry the full symbolic
/// reference that could not be resolved.
#[derive(Error, Debug)]
pub enum Error {
    /// Encoded data is malformed.
    ///
    /// Raised when decoding a table region or blob that does not follow the
    /// ECMA-335 layout. Includes the source location where the error was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while decoding.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// A structurally fixed property was assigned.
    ///
    /// For example, setting the value-type flag of a type specification.
    #[error("Invalid operation - {0}")]
    InvalidOperation(String),

    /// A constructor precondition was violated (empty name, zero array rank, ...).
    #[error("Invalid construction - {0}")]
    Validation(String),

    /// A second row was added to a table that holds exactly one row.
    #[error("Table {0:?} holds exactly one row")]
    SingletonTable(TableId),

    /// A sorted table was serialized before it was sorted.
    #[error("Table {0:?} must be sorted before it is written")]
    TableNotSorted(TableId),

    /// A coded index was built for, or written into, a column of the wrong kind.
    #[error("Table {table:?} is not a valid target of coded index {coded_index:?}")]
    CodedIndexMismatch {
        /// The coded index kind of the column
        coded_index: CodedIndexType,
        /// The table that was referenced
        table: TableId,
    },

    /// An assembly could not be located through any configured search path.
    #[error("Failed to resolve assembly: '{0}'")]
    AssemblyNotFound(AssemblyIdentity),

    /// A type or member reference could not be resolved to its definition.
    #[error("Failed to resolve '{reference}' in scope '{scope}'")]
    ResolutionFailed {
        /// Full name of the unresolved reference
        reference: String,
        /// The scope the reference was expected to live in
        scope: String,
    },

    /// An internal invariant does not hold for the requested operation.
    #[error("Not supported - {0}")]
    NotSupported(String),

    /// Wrapper around std::io::Error for file operations.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Failed to acquire a lock on a shared resource.
    #[error("Failed to lock target")]
    LockError,
}
