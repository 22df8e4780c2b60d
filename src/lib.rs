//! Blockfall (workspace facade crate).
//!
//! This package exposes `blockfall::{core,input,reversi,term,types}` while
//! the implementation lives in dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_reversi as reversi;
pub use blockfall_term as term;
pub use blockfall_types as types;
