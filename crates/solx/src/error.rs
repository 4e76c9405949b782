//! 💀 Errors — the short list of ways an update request can refuse to exist.
//!
//! 🎬 COLD OPEN — INT. XML FACTORY — NIGHT SHIFT
//!
//! The conveyor belt hums. Commands roll in. Add. Delete. Commit. Add again.
//! Then something rolls in wearing a fake mustache and a name tag that says
//! "type: upsert-but-cooler". The belt stops. The foreman sighs. This module
//! is the foreman's clipboard.
//!
//! 🧠 Knowledge graph:
//! - Library surface: [`UpdateError`] (typed, matchable, `thiserror`-derived)
//! - App surface (config, CLI): `anyhow` with `.context(...)`, same as always
//! - Serialization is all-or-nothing: an error means no body was produced. Not half a body.
//!   Half a body is a horror movie, not a request payload. 🦆

use thiserror::Error;

/// 💀 Everything that can go wrong while turning an update query into a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// 🎭 A command showed up whose kind we do not speak. Not retried, not skipped.
    /// The whole serialization call fails before a single byte of body exists.
    #[error(
        "💀 Unsupported command type '{kind}' at position {position}. \
         We know add, delete, optimize, commit and rollback. This was none of them."
    )]
    UnsupportedCommandKind { kind: String, position: usize },

    /// 📡 The request descriptor could not be turned into a real HTTP request
    /// (bad base URL, header value with a newline in it, that kind of crime).
    #[error("💀 Could not build the HTTP request: {0}")]
    InvalidRequest(String),
}

/// 📦 Shorthand, because typing the full thing every time is how carpal tunnel starts.
pub type Result<T, E = UpdateError> = std::result::Result<T, E>;
