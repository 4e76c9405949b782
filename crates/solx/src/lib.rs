//! 📮 solx — update queries in, XML request bodies out.
//!
//! Build an [`UpdateQuery`], hand it to an [`UpdateRequestBuilder`], get back a POST
//! [`UpdateRequest`] whose body is the `<update>` document the search server expects.
//! No sockets were harmed in the making of this request. 🦆

pub mod app_config;
pub mod common;
pub mod composers;
pub mod error;
pub mod query;
pub mod request;
pub mod transforms;

use std::path::Path;

use anyhow::Context;

pub use common::{Document, FieldValue, Fields, Scalar};
pub use composers::{XmlUpdateComposer, serialize};
pub use error::UpdateError;
pub use query::{AddCommand, Command, CommitCommand, DeleteCommand, OptimizeCommand, UpdateQuery};
pub use request::{BaseRequestBuilder, ConfiguredBaseRequest, RequestConfig, UpdateRequest, UpdateRequestBuilder};
pub use transforms::XmlOptions;

/// 📂 Read a JSON update query from disk.
pub fn read_update_query(path: &Path) -> anyhow::Result<UpdateQuery> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("💀 Could not read update query file '{}'", path.display()))?;
    serde_json::from_str(&raw).with_context(|| {
        format!(
            "💀 '{}' is not a valid update query. Expected {{\"commands\": [{{\"type\": \"add\", ...}}]}}",
            path.display()
        )
    })
}
