//! 📮 Update queries — an ordered list of things we'd like the index to do.
//!
//! 🎬 *[a clipboard. five checkboxes. add, delete, optimize, commit, rollback.]*
//! *[someone adds a sixth checkbox in pen. it says "yolo". the serializer refuses it.]*
//!
//! 🧠 Knowledge graph:
//! - [`UpdateQuery`]: handler override + extra request params + ordered [`Command`]s
//! - [`Command`]: closed enum over the five kinds, plus `Unsupported` for a `type` nobody recognizes
//! - Order is sacred. Position in the list is the only identity a command has. The server
//!   executes them top to bottom, so we emit them top to bottom. No clever reordering. Ever.
//! - Every optional attribute is an `Option`. `Some(false)` is emitted. `None` is not.
//!   A bare `bool` defaulting to false would quietly eat explicit `false`s. Ask me how I know. 🦆

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::common::Document;

// ============================================================
// 🧱 Per-kind commands
// ============================================================

/// ➕ Add documents. `overwrite` and `commit_within` are emitted only when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddCommand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
    /// ⏱️ Milliseconds the server may wait before making these docs visible.
    #[serde(rename = "commitWithin", alias = "commit_within", skip_serializing_if = "Option::is_none")]
    pub commit_within: Option<u64>,
    pub documents: Vec<Document>,
}

impl AddCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    pub fn with_commit_within(mut self, millis: u64) -> Self {
        self.commit_within = Some(millis);
        self
    }

    pub fn add_document(&mut self, document: Document) -> &mut Self {
        self.documents.push(document);
        self
    }

    pub fn add_documents(&mut self, documents: impl IntoIterator<Item = Document>) -> &mut Self {
        self.documents.extend(documents);
        self
    }
}

/// 🗑️ Delete by id and/or by query. Ids are always emitted before queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteCommand {
    pub ids: Vec<String>,
    pub queries: Vec<String>,
}

impl DeleteCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.ids.push(id.into());
        self
    }

    pub fn add_ids<I, S>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn add_query(&mut self, query: impl Into<String>) -> &mut Self {
        self.queries.push(query.into());
        self
    }

    pub fn add_queries<I, S>(&mut self, queries: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queries.extend(queries.into_iter().map(Into::into));
        self
    }
}

/// 🧹 Merge segments down. Attributes come out in the order declared here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeCommand {
    #[serde(rename = "waitFlush", alias = "wait_flush", skip_serializing_if = "Option::is_none")]
    pub wait_flush: Option<bool>,
    #[serde(rename = "waitSearcher", alias = "wait_searcher", skip_serializing_if = "Option::is_none")]
    pub wait_searcher: Option<bool>,
    #[serde(rename = "maxSegments", alias = "max_segments", skip_serializing_if = "Option::is_none")]
    pub max_segments: Option<u32>,
}

impl OptimizeCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wait_flush(mut self, wait_flush: bool) -> Self {
        self.wait_flush = Some(wait_flush);
        self
    }

    pub fn with_wait_searcher(mut self, wait_searcher: bool) -> Self {
        self.wait_searcher = Some(wait_searcher);
        self
    }

    pub fn with_max_segments(mut self, max_segments: u32) -> Self {
        self.max_segments = Some(max_segments);
        self
    }
}

/// ✅ Make pending changes durable and visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitCommand {
    #[serde(rename = "waitFlush", alias = "wait_flush", skip_serializing_if = "Option::is_none")]
    pub wait_flush: Option<bool>,
    #[serde(rename = "waitSearcher", alias = "wait_searcher", skip_serializing_if = "Option::is_none")]
    pub wait_searcher: Option<bool>,
    #[serde(rename = "expungeDeletes", alias = "expunge_deletes", skip_serializing_if = "Option::is_none")]
    pub expunge_deletes: Option<bool>,
}

impl CommitCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wait_flush(mut self, wait_flush: bool) -> Self {
        self.wait_flush = Some(wait_flush);
        self
    }

    pub fn with_wait_searcher(mut self, wait_searcher: bool) -> Self {
        self.wait_searcher = Some(wait_searcher);
        self
    }

    pub fn with_expunge_deletes(mut self, expunge_deletes: bool) -> Self {
        self.expunge_deletes = Some(expunge_deletes);
        self
    }
}

// ============================================================
// 🎭 Command — the closed set
// ============================================================

/// 🎭 One index mutation. Dispatch over this is an exhaustive `match`.
///
/// `Unsupported` is never built by the typed builders; it only appears when a
/// command graph arrives from outside (JSON, usually) with a `type` nobody recognizes.
/// Serializing it to XML fails with [`crate::UpdateError::UnsupportedCommandKind`].
/// Serializing it back to JSON keeps the `type` it arrived with, and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(AddCommand),
    Delete(DeleteCommand),
    Optimize(OptimizeCommand),
    Commit(CommitCommand),
    Rollback,
    Unsupported { kind: String },
}

impl Command {
    /// 🏷️ The wire-ish name of this command's kind. Handy for logs and tables.
    pub fn kind(&self) -> &str {
        match self {
            Command::Add(_) => "add",
            Command::Delete(_) => "delete",
            Command::Optimize(_) => "optimize",
            Command::Commit(_) => "commit",
            Command::Rollback => "rollback",
            Command::Unsupported { kind } => kind,
        }
    }
}

impl From<AddCommand> for Command {
    fn from(command: AddCommand) -> Self {
        Command::Add(command)
    }
}

impl From<DeleteCommand> for Command {
    fn from(command: DeleteCommand) -> Self {
        Command::Delete(command)
    }
}

impl From<OptimizeCommand> for Command {
    fn from(command: OptimizeCommand) -> Self {
        Command::Optimize(command)
    }
}

impl From<CommitCommand> for Command {
    fn from(command: CommitCommand) -> Self {
        Command::Commit(command)
    }
}

// 🧭 The JSON shape: `{"type": "<kind>", ...attributes}`. Known kinds go through the
// tagged enum below; anything else keeps its tag and becomes `Unsupported`.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum KnownCommand {
    Add(AddCommand),
    Delete(DeleteCommand),
    Optimize(OptimizeCommand),
    Commit(CommitCommand),
    Rollback,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum KnownCommandRef<'a> {
    Add(&'a AddCommand),
    Delete(&'a DeleteCommand),
    Optimize(&'a OptimizeCommand),
    Commit(&'a CommitCommand),
    Rollback,
}

#[derive(Serialize)]
struct UnknownCommandRef<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Command::Add(c) => KnownCommandRef::Add(c).serialize(serializer),
            Command::Delete(c) => KnownCommandRef::Delete(c).serialize(serializer),
            Command::Optimize(c) => KnownCommandRef::Optimize(c).serialize(serializer),
            Command::Commit(c) => KnownCommandRef::Commit(c).serialize(serializer),
            Command::Rollback => KnownCommandRef::Rollback.serialize(serializer),
            Command::Unsupported { kind } => UnknownCommandRef { kind }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // 📦 buffer once, peek at the tag, then decode the known shapes from the buffer.
        // serde_json's `preserve_order` keeps document field order intact through the detour.
        let value = serde_json::Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| D::Error::custom("💀 a command must be an object with a string \"type\""))?
            .to_string();

        let known = match kind.as_str() {
            "add" | "delete" | "optimize" | "commit" | "rollback" => {
                // 💀 a known tag that fails its own shape is malformed, not unknown. Keep serde's reason.
                serde_json::from_value::<KnownCommand>(value)
                    .map_err(|e| D::Error::custom(format!("💀 malformed '{kind}' command: {e}")))?
            }
            _ => return Ok(Command::Unsupported { kind }),
        };

        Ok(match known {
            KnownCommand::Add(c) => Command::Add(c),
            KnownCommand::Delete(c) => Command::Delete(c),
            KnownCommand::Optimize(c) => Command::Optimize(c),
            KnownCommand::Commit(c) => Command::Commit(c),
            KnownCommand::Rollback => Command::Rollback,
        })
    }
}

// ============================================================
// 📮 UpdateQuery
// ============================================================

/// 📮 The whole update: which handler to hit, extra query-string params, and the
/// commands in execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateQuery {
    /// 📡 Overrides the configured handler path when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    /// 🔧 Extra query-string params, layered over the configured defaults.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    pub commands: Vec<Command>,
}

impl UpdateQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn add_command(&mut self, command: impl Into<Command>) -> &mut Self {
        self.commands.push(command.into());
        self
    }

    /// 🗑️ Remove the command at `index`, if there is one there.
    pub fn remove(&mut self, index: usize) -> Option<Command> {
        (index < self.commands.len()).then(|| self.commands.remove(index))
    }

    /// ➕ A single-document add with no attributes.
    pub fn add_document(&mut self, document: Document) -> &mut Self {
        let mut add = AddCommand::new();
        add.add_document(document);
        self.add_command(add)
    }

    pub fn add_documents(
        &mut self,
        documents: impl IntoIterator<Item = Document>,
        overwrite: Option<bool>,
        commit_within: Option<u64>,
    ) -> &mut Self {
        let mut add = AddCommand {
            overwrite,
            commit_within,
            ..AddCommand::default()
        };
        add.add_documents(documents);
        self.add_command(add)
    }

    pub fn add_delete_by_id(&mut self, id: impl Into<String>) -> &mut Self {
        let mut delete = DeleteCommand::new();
        delete.add_id(id);
        self.add_command(delete)
    }

    pub fn add_delete_by_ids<I, S>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut delete = DeleteCommand::new();
        delete.add_ids(ids);
        self.add_command(delete)
    }

    pub fn add_delete_query(&mut self, query: impl Into<String>) -> &mut Self {
        let mut delete = DeleteCommand::new();
        delete.add_query(query);
        self.add_command(delete)
    }

    pub fn add_delete_queries<I, S>(&mut self, queries: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut delete = DeleteCommand::new();
        delete.add_queries(queries);
        self.add_command(delete)
    }

    pub fn add_commit(
        &mut self,
        wait_flush: Option<bool>,
        wait_searcher: Option<bool>,
        expunge_deletes: Option<bool>,
    ) -> &mut Self {
        self.add_command(CommitCommand {
            wait_flush,
            wait_searcher,
            expunge_deletes,
        })
    }

    pub fn add_optimize(
        &mut self,
        wait_flush: Option<bool>,
        wait_searcher: Option<bool>,
        max_segments: Option<u32>,
    ) -> &mut Self {
        self.add_command(OptimizeCommand {
            wait_flush,
            wait_searcher,
            max_segments,
        })
    }

    pub fn add_rollback(&mut self) -> &mut Self {
        self.add_command(Command::Rollback)
    }
}
