//! Atom interning for the Araneae reasoner's memory layer.
//! Araneae 推理器内存层的原子驻留。
//!
//! This crate provides the symbol tables shared by the rest of the engine:
//! - `Atom`: a small, copyable handle for one canonical label
//! - `AtomTable`: single-writer interning table
//! - `SharedAtomTable`: interning table that many threads may write to
//! - `TableConfig`: sizing options for both tables
//!
//! Tables are plain owned values. Every reasoning session creates its own
//! table and hands it (or a reference to it) to the components that need it.

mod atom;
mod config;
mod error;
mod shared;
mod table;

pub use atom::{Atom, TableId};
pub use config::{TableConfig, defaults};
pub use error::{AtomError, ConfigError};
pub use shared::SharedAtomTable;
pub use table::{AtomTable, Iter};
