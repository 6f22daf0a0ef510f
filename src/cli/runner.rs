//! CLI runner - executes commands

use crate::api::{ApiObject, ApiResolver, CheckoutApi, ResourceApi};
use crate::cli::commands::{Cli, Commands, OutputFormat, ResourceArgs};
use crate::config::{load_config, ClientConfig};
use crate::error::{Error, Result};
use crate::http::{ApiClient, HttpClient};
use crate::pagination::{LIMIT_PARAM, PAGE_PARAM};
use crate::types::{Files, JsonValue, Params};
use crate::uri::{ArrayUriMap, UriMap};
use anyhow::Context;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.client_config()?;
        let client: Arc<dyn ApiClient> = Arc::new(HttpClient::with_config(config.http_config())?);
        let resolver = ApiResolver::new(config.uri_map());

        info!(base_url = %config.base_url, "Using API");

        match &self.cli.command {
            Commands::Get { target, id, query } => {
                let api = resolve(&resolver, &client, target)?;
                let query: Params = query.iter().cloned().collect();
                let resource = api.get(id, &query, &uri_params(target)).await?;
                self.output(&resource);
            }
            Commands::List {
                target,
                page,
                limit,
                query,
            } => {
                let api = resolve(&resolver, &client, target)?;
                let mut query: Params = query.iter().cloned().collect();
                query.insert(PAGE_PARAM.to_string(), (*page).into());
                query.insert(LIMIT_PARAM.to_string(), (*limit).into());

                let envelope = api.get_paginated(&query, &uri_params(target)).await?;
                self.output(&json!({
                    "page": page,
                    "limit": limit,
                    "total": envelope.total,
                    "items": envelope.items,
                }));
            }
            Commands::All {
                target,
                query,
                concurrency,
            } => {
                let api = resolve(&resolver, &client, target)?;
                let query: Params = query.iter().cloned().collect();
                let uri = uri_params(target);

                let records = match concurrency {
                    Some(n) => api.get_all_concurrent(&query, &uri, *n).await?,
                    None => api.get_all(&query, &uri).await?,
                };
                info!(records = records.len(), "Fetched all records");
                self.output(&JsonValue::Array(records));
            }
            Commands::Create {
                target,
                data,
                files,
            } => {
                let api = resolve(&resolver, &client, target)?;
                let object = api_object(target, data, files)?;
                let created = api
                    .create(&object.body(), object.uri_parameters(), object.files())
                    .await?;
                self.output(&created);
            }
            Commands::Update {
                target,
                id,
                data,
                files,
            } => {
                let api = resolve(&resolver, &client, target)?;
                let mut object = api_object(target, data, files)?;
                object.set_id(id.as_str());

                let accepted = api.save(&mut object).await?;
                self.output(&json!({ "updated": accepted }));
            }
            Commands::Delete { target, id } => {
                let api = resolve(&resolver, &client, target)?;
                let deleted = api.delete(id, &uri_params(target)).await?;
                self.output(&json!({ "deleted": deleted }));
            }
            Commands::Checkout {
                target,
                cart_id,
                data,
            } => {
                let uri = resolver.uri_map().uri_for(&target.resource)?;
                let checkout = CheckoutApi::new(Arc::clone(&client), uri)?;
                let body = read_body(data)?;

                let accepted = checkout
                    .update(cart_id, &body, &uri_params(target))
                    .await?;
                self.output(&json!({ "accepted": accepted }));
            }
        }

        Ok(())
    }

    /// Config file (if any) with `--base-url` applied on top
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match (&self.cli.config, &self.cli.base_url) {
            (Some(path), _) => load_config(path)?,
            (None, Some(url)) => ClientConfig::new(url),
            (None, None) => {
                return Err(Error::config(
                    "Either --config or --base-url must be provided",
                ))
            }
        };

        if let Some(url) = &self.cli.base_url {
            config.base_url.clone_from(url);
        }
        config.validate()?;
        Ok(config)
    }

    fn output(&self, value: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

fn resolve(
    resolver: &ApiResolver<ArrayUriMap>,
    client: &Arc<dyn ApiClient>,
    target: &ResourceArgs,
) -> Result<ResourceApi> {
    resolver.resolve(Arc::clone(client), &target.resource)
}

fn uri_params(target: &ResourceArgs) -> Params {
    target.uri.iter().cloned().collect()
}

fn api_object(target: &ResourceArgs, data: &str, files: &[(String, PathBuf)]) -> Result<ApiObject> {
    let body = read_body(data)?;
    let JsonValue::Object(fields) = body else {
        return Err(Error::invalid_argument("data", "must be a JSON object"));
    };

    let mut object = ApiObject::new(fields, uri_params(target), Files::new());
    for (field, path) in files {
        object.add_file(field.clone(), path.clone());
    }
    Ok(object)
}

/// Inline JSON, or the contents of the file named after `@`
fn read_body(data: &str) -> Result<JsonValue> {
    let text = match data.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read body file '{path}'"))?,
        None => data.to_string(),
    };
    let body = serde_json::from_str(&text).context("Body is not valid JSON")?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hal-api").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_client_config_requires_source() {
        let runner = Runner::new(cli(&["delete", "products", "1"]));
        assert!(matches!(runner.client_config(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_client_config_from_base_url() {
        let runner = Runner::new(cli(&["--base-url", "http://localhost:9000", "get", "products", "1"]));
        let config = runner.client_config().unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert!(config.allow_default_uris);
    }

    #[test]
    fn test_base_url_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: http://config.example.com\ntimeout_secs: 3").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let runner = Runner::new(cli(&[
            "--config",
            &path,
            "--base-url",
            "http://override.example.com",
            "get",
            "products",
            "1",
        ]));
        let config = runner.client_config().unwrap();

        assert_eq!(config.base_url, "http://override.example.com");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_read_body_inline_and_file() {
        assert_eq!(read_body(r#"{"code":"mug"}"#).unwrap(), json!({ "code": "mug" }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name":"Mug"}}"#).unwrap();
        let arg = format!("@{}", file.path().display());
        assert_eq!(read_body(&arg).unwrap(), json!({ "name": "Mug" }));
    }

    #[test]
    fn test_read_body_errors() {
        assert!(matches!(read_body("{"), Err(Error::Anyhow(_))));
        assert!(matches!(read_body("@/nonexistent/body.json"), Err(Error::Anyhow(_))));
    }

    #[test]
    fn test_api_object_from_args() {
        let target = ResourceArgs {
            resource: "variants".to_string(),
            uri: vec![("productId".to_string(), json!(3))],
        };
        let files = vec![("image".to_string(), PathBuf::from("/tmp/a.jpg"))];

        let object = api_object(&target, r#"{"code":"v1"}"#, &files).unwrap();

        assert_eq!(object.body(), json!({ "code": "v1" }));
        assert_eq!(object.uri_parameters().get("productId"), Some(&json!(3)));
        assert_eq!(object.files().len(), 1);
        assert!(api_object(&target, "[1]", &[]).is_err());
    }
}
