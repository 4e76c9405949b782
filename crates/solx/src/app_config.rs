//! 🔧 App Configuration — the sacred TOML-to-struct pipeline.
//!
//! 📡 "Config not found: We looked everywhere. Under the couch. Behind the fridge.
//! In the junk drawer. Nothing." — every developer at 3am 🦆
//!
//! 🏗️ Powered by Figment, because manually parsing env vars is a form of
//! self-harm that even the borrow checker wouldn't approve of.
//!
//! 🧠 Knowledge graph:
//! - `[request]` → [`RequestConfig`] (base URL, handler, default params, content type)
//! - `[xml]` → [`XmlOptions`] (field-name escaping switch)
//! - Env vars: `SOLX_` prefix, `__` splits nesting (`SOLX_REQUEST__HANDLER=update/json`)
//! - Every field has a default. An empty config is a valid config. Minimalism.

use std::path::Path;

use anyhow::Context;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use tracing::info;

use crate::request::{RequestConfig, UpdateRequestBuilder};
use crate::transforms::XmlOptions;

/// 📦 The AppConfig: one struct to rule them all, one struct to find them,
/// one struct to bring them all, and in the Figment bind them.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub xml: XmlOptions,
}

impl AppConfig {
    /// 🏭 The request assembler this config describes.
    pub fn request_builder(&self) -> UpdateRequestBuilder {
        UpdateRequestBuilder::from_config(self.request.clone(), self.xml)
    }
}

/// 🚀 Load the config — from a file, from env vars, or from the sheer power of hoping.
///
/// 📐 DESIGN NOTE:
///   - `None` → env vars (`SOLX_*`) and defaults only.
///   - `Some(path)` → env vars + TOML file, merged. TOML wins on conflicts.
///
/// 💀 Returns an error if the config is unparseable. The message says which file.
pub fn load_config(config_file_name: Option<&Path>) -> anyhow::Result<AppConfig> {
    info!(
        "🔧 Loading configuration: {:#?}",
        config_file_name.unwrap_or(Path::new(""))
    );

    let config = Figment::new().merge(Env::prefixed("SOLX_").split("__"));

    let config = match config_file_name {
        Some(file_name) => config.merge(Toml::file(file_name)),
        None => config,
    };

    let context_msg = match config_file_name {
        Some(path) => format!(
            "💀 Failed to parse configuration from file '{}' and environment variables (SOLX_*). \
             The file exists in our hearts, but apparently not in a shape serde recognizes.",
            path.display()
        ),
        None => "💀 Failed to parse configuration from environment variables (SOLX_*). \
                 No file was provided — this one's all on the environment. Classic."
            .to_string(),
    };

    config.extract().context(context_msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_test_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("solx_app_config_")
            .suffix(".toml")
            .tempfile()
            .expect("💀 Failed to create a temp config. The filesystem said 'new phone who dis'.");
        // 🧪 a real file, because Figment wants TOML from disk, like it's method acting.
        file.write_all(contents.as_bytes())
            .expect("💀 Failed to write test config.");
        file
    }

    #[test]
    fn the_one_where_the_toml_file_sets_every_knob() {
        let file = write_test_config(
            r#"
            [request]
            base_url = "http://search.internal:8983/solr/products"
            handler = "update/xml"
            content_type = "application/xml"

            [request.default_params]
            wt = "xml"
            omitHeader = "true"

            [xml]
            escape_field_names = true
            "#,
        );

        let app_config = load_config(Some(file.path()))
            .expect("💀 Full config should parse. The schema drift goblin does not get this win.");

        assert_eq!(app_config.request.base_url, "http://search.internal:8983/solr/products");
        assert_eq!(app_config.request.handler, "update/xml");
        assert_eq!(app_config.request.content_type, "application/xml");
        assert_eq!(
            app_config.request.default_params.get("omitHeader").map(String::as_str),
            Some("true")
        );
        assert!(app_config.xml.escape_field_names);
    }

    #[test]
    fn the_one_where_defaults_show_up_uninvited_but_helpful() {
        let file = write_test_config("");

        let app_config: AppConfig = Figment::new()
            .merge(Toml::file(file.path()))
            .extract()
            .expect("💀 An empty config should still be a config.");

        assert_eq!(app_config, AppConfig::default());
        assert_eq!(app_config.request.handler, "update");
        assert_eq!(app_config.request.default_params.get("wt").map(String::as_str), Some("json"));
        assert!(!app_config.xml.escape_field_names, "legacy field names stay raw by default");
    }

    #[test]
    fn the_one_where_a_half_config_keeps_the_other_half_default() {
        let file = write_test_config(
            r#"
            [request]
            handler = "update/json/docs"
            "#,
        );

        let app_config: AppConfig = Figment::new()
            .merge(Toml::file(file.path()))
            .extract()
            .expect("💀 Partial config should parse.");

        assert_eq!(app_config.request.handler, "update/json/docs");
        assert_eq!(app_config.request.base_url, "http://localhost:8983/solr");
        assert_eq!(app_config.request.content_type, "text/xml; charset=utf-8");
    }

    #[test]
    fn the_one_where_toml_parses_straight_from_a_string() {
        // 🍞 no figment, no file, no env. just a string and a dream.
        let app_config: AppConfig = toml::from_str(
            r#"
            [request.default_params]
            wt = "json"
            commitWithin = "1000"
            "#,
        )
        .expect("💀 Inline TOML should parse.");

        assert_eq!(app_config.request.default_params.len(), 2);
        assert_eq!(app_config.request.handler, "update");
    }

    #[test]
    fn the_one_where_a_wrong_type_gets_a_contextual_error() {
        let file = write_test_config(
            r#"
            [xml]
            escape_field_names = "maybe"
            "#,
        );

        let err = load_config(Some(file.path())).expect_err("💀 'maybe' is not a bool");
        assert!(
            err.to_string().contains("Failed to parse configuration from file"),
            "context should name the file, got: {err}"
        );
    }

    #[test]
    fn the_one_where_the_config_builds_a_working_assembler() {
        let mut query = crate::query::UpdateQuery::new();
        query.add_rollback();

        let request = AppConfig::default()
            .request_builder()
            .build(&query)
            .expect("💀 rollback should always serialize");
        assert_eq!(request.body.as_deref(), Some("<update><rollback/></update>"));
    }
}
