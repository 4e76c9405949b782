//! # 📡 THE REQUEST ASSEMBLER
//!
//! 🎬 COLD OPEN — INT. LOADING DOCK — 6:02 AM
//!
//! The XML is ready. It has been escaped, attributed, and wrapped in `<update>`.
//! Now it needs a crate to ship in: a handler path, some query-string params,
//! a Content-Type header, and the one verb that matters. POST. Always POST.
//! This module nails the crate shut and hands it to whoever drives the truck.
//! We do not drive the truck. We have never driven the truck. 🦆
//!
//! 🧠 Knowledge graph:
//! - [`BaseRequestBuilder`]: the seam for "common request stuff" (handler, params, headers)
//! - [`ConfiguredBaseRequest`]: the default base builder, fed from [`RequestConfig`]
//! - [`UpdateRequestBuilder::build`]: base → force POST → body = composed XML
//! - [`UpdateRequest::to_reqwest`]: builds (does NOT send) a `reqwest::Request`
//!
//! ⚠️ Nothing in here touches the network. `to_reqwest` is construction only.
//! Sending is the caller's job, retries are the caller's job, regret is shared.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::composers::XmlUpdateComposer;
use crate::error::{Result, UpdateError};
use crate::query::UpdateQuery;
use crate::transforms::XmlOptions;

pub use reqwest::Method;

// ============================================================
// 🔧 RequestConfig
// ============================================================

/// 🔧 Where requests point and what they carry by default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestConfig {
    /// 📡 Server root, scheme and port included. The handler path is appended to this.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 📡 Handler path used when the query doesn't name its own.
    #[serde(default = "default_handler")]
    pub handler: String,
    /// 🔧 Query-string params every request starts with. Query params win on conflict.
    #[serde(default = "default_params")]
    pub default_params: BTreeMap<String, String>,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_base_url() -> String {
    "http://localhost:8983/solr".to_string()
}

fn default_handler() -> String {
    "update".to_string()
}

// 📦 wt=json: ask for JSON responses. Parsing them is someone else's adventure.
fn default_params() -> BTreeMap<String, String> {
    BTreeMap::from([("wt".to_string(), "json".to_string())])
}

fn default_content_type() -> String {
    "text/xml; charset=utf-8".to_string()
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            handler: default_handler(),
            default_params: default_params(),
            content_type: default_content_type(),
        }
    }
}

// ============================================================
// 📦 UpdateRequest — the descriptor
// ============================================================

/// 📦 A transport-agnostic HTTP request description.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub method: Method,
    pub handler: String,
    pub params: BTreeMap<String, String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl UpdateRequest {
    /// 🚀 A GET to `handler` with nothing attached. The assembler upgrades it.
    pub fn new(handler: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            handler: handler.into(),
            params: BTreeMap::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// 📡 `base_url` + `/` + handler, plus the params as a query string.
    pub fn uri(&self, base_url: &str) -> Result<reqwest::Url> {
        let joined = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.handler.trim_start_matches('/')
        );
        let mut url = reqwest::Url::parse(&joined)
            .map_err(|e| UpdateError::InvalidRequest(format!("bad url '{joined}': {e}")))?;
        // -- 🔧 only touch the query when there is one, or the URL grows a lonely trailing '?'
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }
        Ok(url)
    }

    /// 🏗️ Build a `reqwest::Request` from this descriptor. Builds. Does not send.
    pub fn to_reqwest(&self, client: &reqwest::Client, base_url: &str) -> Result<reqwest::Request> {
        let mut builder = client.request(self.method.clone(), self.uri(base_url)?);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &self.body {
            builder = builder.body(body.clone());
        }
        builder
            .build()
            .map_err(|e| UpdateError::InvalidRequest(e.to_string()))
    }
}

// ============================================================
// 🧱 BaseRequestBuilder — the common-fields seam
// ============================================================

/// 🧱 Produces the request skeleton (handler, params, headers) for a query.
/// The assembler takes it from there: method and body are not this trait's business.
pub trait BaseRequestBuilder {
    fn build_base(&self, query: &UpdateQuery) -> UpdateRequest;
}

/// 🧱 The default skeleton: config defaults, with the query's own handler and params on top.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredBaseRequest {
    config: RequestConfig,
}

impl ConfiguredBaseRequest {
    pub fn new(config: RequestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }
}

impl BaseRequestBuilder for ConfiguredBaseRequest {
    fn build_base(&self, query: &UpdateQuery) -> UpdateRequest {
        let handler = query.handler.as_deref().unwrap_or(&self.config.handler);
        let mut request = UpdateRequest::new(handler);
        request.params = self.config.default_params.clone();
        request.params.extend(query.params.iter().map(|(k, v)| (k.clone(), v.clone())));
        request
            .headers
            .push(("Content-Type".to_string(), self.config.content_type.clone()));
        request
    }
}

// ============================================================
// 🏭 UpdateRequestBuilder — the assembler
// ============================================================

/// 🏭 Turns an [`UpdateQuery`] into a POST [`UpdateRequest`] with an XML body.
#[derive(Debug, Clone, Default)]
pub struct UpdateRequestBuilder<B = ConfiguredBaseRequest> {
    base: B,
    composer: XmlUpdateComposer,
}

impl UpdateRequestBuilder<ConfiguredBaseRequest> {
    pub fn from_config(request: RequestConfig, xml: XmlOptions) -> Self {
        Self::new(ConfiguredBaseRequest::new(request), xml)
    }
}

impl<B: BaseRequestBuilder> UpdateRequestBuilder<B> {
    pub fn new(base: B, xml: XmlOptions) -> Self {
        Self {
            base,
            composer: XmlUpdateComposer::new(xml),
        }
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    /// 🚀 base skeleton → POST → XML body. Serialization errors propagate untouched,
    /// and no request comes back when they do.
    pub fn build(&self, query: &UpdateQuery) -> Result<UpdateRequest> {
        let body = self.composer.compose(query.commands())?;
        let mut request = self.base.build_base(query);
        request.method = Method::POST;
        debug!(
            "📦 assembled update request for '{}': {} command(s), {} byte body",
            request.handler,
            query.len(),
            body.len()
        );
        request.body = Some(body);
        Ok(request)
    }
}
