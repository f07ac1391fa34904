//! Error types for RSM file operations.

use thiserror::Error;

/// Errors that can occur while decoding, validating, or encoding RSM files.
///
/// All errors are detected synchronously at the point of offense and carry
/// enough context (section name, line number, offending token) to locate the
/// fault in the source file. No partial table or mesh is ever returned on
/// failure.
#[derive(Error, Debug)]
pub enum RsmError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A section header line is missing its name or count, or the count is
    /// not a non-negative integer.
    #[error("malformed header at line {line}: {message}")]
    MalformedHeader {
        /// Line number (1-indexed).
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A record line inside a section contains a non-integer token, or is
    /// blank.
    #[error("malformed record in section '{section}' at line {line}: {message}")]
    MalformedRecord {
        /// Section being collected.
        section: String,
        /// Line number (1-indexed).
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A record's arity differs from the first record of its section
    /// (only with [`DecodeOptions::require_uniform_arity`]).
    ///
    /// [`DecodeOptions::require_uniform_arity`]: crate::DecodeOptions
    #[error(
        "record arity mismatch in section '{section}' at line {line}: \
         expected {expected} columns, got {actual}"
    )]
    ArityMismatch {
        /// Section being collected.
        section: String,
        /// Line number (1-indexed).
        line: usize,
        /// Arity of the section's first record.
        expected: usize,
        /// Arity of the offending record.
        actual: usize,
    },

    /// The input ended while a section still expected more records.
    #[error(
        "section '{section}' truncated: header declared {expected} records \
         but the file ends {missing} short"
    )]
    TruncatedSection {
        /// Section being collected when input ended.
        section: String,
        /// Record count declared by the header.
        expected: usize,
        /// How many records were still outstanding.
        missing: usize,
    },

    /// A section name appeared twice
    /// (only with [`DuplicatePolicy::Error`](crate::DuplicatePolicy)).
    #[error("duplicate section '{section}' at line {line}")]
    DuplicateSection {
        /// The repeated name.
        section: String,
        /// Line number of the second header (1-indexed).
        line: usize,
    },

    /// A section the mesh builder requires is absent from the table.
    #[error("missing section: '{0}'")]
    MissingSection(String),

    /// A record is too narrow for the columns the mesh schema needs.
    #[error(
        "schema mismatch in section '{section}': record {record} has \
         {actual} columns, need at least {needed}"
    )]
    SchemaMismatch {
        /// Section the record belongs to.
        section: String,
        /// Record index within the section (0-indexed).
        record: usize,
        /// Minimum arity the schema requires.
        needed: usize,
        /// Arity of the offending record.
        actual: usize,
    },

    /// A face references a vertex index outside the vertices section.
    #[error("face {face} references vertex {index}, but only {vertices} vertices exist")]
    IndexOutOfRange {
        /// Face index within the faces section (0-indexed).
        face: usize,
        /// The offending vertex index as written in the file.
        index: i64,
        /// Number of vertices available.
        vertices: usize,
    },

    /// A defensive size limit was exceeded (declared counts and file sizes
    /// are author-controlled and bound memory use).
    #[error("{what} is {actual}, which exceeds the limit of {limit}")]
    LimitExceeded {
        /// Which limit was hit.
        what: String,
        /// The observed value.
        actual: usize,
        /// The configured maximum.
        limit: usize,
    },
}

impl RsmError {
    /// Create a malformed-header error.
    pub fn malformed_header(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            line,
            message: message.into(),
        }
    }

    /// Create a malformed-record error.
    pub fn malformed_record(
        section: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            section: section.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a limit-exceeded error.
    pub fn limit_exceeded(what: impl Into<String>, actual: usize, limit: usize) -> Self {
        Self::LimitExceeded {
            what: what.into(),
            actual,
            limit,
        }
    }
}
