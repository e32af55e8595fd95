//! A virtual hierarchical filesystem persisted inside a single SQLite
//! database file.
//!
//! [`Filesystem`] exposes shell-like operations (`mkdir`, `cd`, `ls`, `rm`,
//! `mv`, `cp`, `read`, `write`, `pwd`) over a tree of named nodes. Leaf
//! nodes (files) carry an opaque byte payload passed through a
//! caller-registered [`codec::Registry`] entry (such as compression) on the
//! way in and out. The database file is the sole persistence medium; the
//! process holds one connection to it behind a single mutex.

pub mod blob;
pub mod codec;
pub mod config;
pub mod error;
mod facade;
pub mod node;
pub mod ops;
pub mod path;
pub mod schema;

pub use codec::Registry;
pub use config::{OpenOptions, Passphrase};
pub use error::{FsError, Result};
pub use facade::Filesystem;
pub use node::NodeRow;
