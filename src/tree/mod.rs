//! Command Tree
//!
//! Immutable snapshot of a program's command hierarchy and flag definitions,
//! plus the per-request walk that finds the command a completion targets.

pub mod command;
pub mod flag;
pub mod lookup;
pub mod manifest;

pub use command::{CommandSpec, CommandTree};
pub use flag::{FlagSpec, FlagState};
pub use lookup::Lookup;
pub use manifest::{load_manifest, CommandManifest, FlagManifest};
