//! Error taxonomy for the filesystem core.
//!
//! The public facade never propagates [`FsError`] directly — every public
//! operation collapses it into a boolean/empty-container return plus a
//! stashed message in the last-error slot (see [`crate::Filesystem::error`]).
//! Internally, though, every fallible helper returns `Result<T, FsError>` so
//! call sites can match on the taxonomy instead of parsing strings.

use thiserror::Error;

/// Errors produced by the filesystem core.
#[derive(Debug, Error)]
pub enum FsError {
    /// The path resolver could not walk the requested path to a node.
    #[error("Can't find path")]
    NotFound,

    /// The path resolver could not walk a `to`/target path.
    #[error("Can't find target path")]
    TargetNotFound,

    /// A `(parent, name)` pair already exists and the operation does not
    /// overwrite (unique constraint violation surfaced by the engine).
    #[error("node already exists")]
    AlreadyExists,

    /// The node found is the wrong kind for the operation (`cd` into a
    /// file, `cp` of a directory, or a move/write target that is a file).
    #[error("{0}")]
    WrongKind(&'static str),

    /// A row-level invariant of the data model is violated:
    /// a FILE node with no blob row, or a decoded payload whose length
    /// doesn't match the recorded `size_raw`.
    #[error("broken invariant: {0}")]
    BrokenInvariant(String),

    /// Any error surfaced verbatim by the underlying relational engine.
    #[error("SQL Error: {0}")]
    Engine(#[from] rusqlite::Error),

    /// A passphrase was supplied but this build of the crate was not
    /// compiled with the `encryption` feature, so there is no cipher to
    /// apply it to. Rendered with the same "SQL Error: "
    /// prefix as [`FsError::Engine`] since it is, from the caller's point
    /// of view, a failure of the underlying engine to honor the request.
    #[error("SQL Error: passphrase given but crate was not built with the `encryption` feature")]
    EncryptionUnavailable,

    /// A codec was invoked or registered incorrectly. Mirrors the
    /// original's `assert(false && ...)` — reaching this is a caller bug,
    /// not a runtime condition, so it is also raised via `panic!` at the
    /// registry boundary (see [`crate::codec::Registry`]); this variant
    /// exists so a host embedding the core as a library still has
    /// something typed to match on if it chooses to catch the panic.
    #[error("programming error: {0}")]
    Programming(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
