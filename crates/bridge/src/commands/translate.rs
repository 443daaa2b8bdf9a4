//! Translate command

use anyhow::{Context, Result};
use bridge_registry::{BridgeClient, PlaceholderEngine};
use camino::Utf8Path;
use std::fs;

use super::{bridge_client, load_settings};
use crate::cli::TranslateArgs;
use crate::output;

pub async fn run(args: TranslateArgs, config_path: Option<&Utf8Path>, quiet: bool) -> Result<()> {
    let settings = load_settings(config_path, args.service.overrides(Some(&args.values)))?;
    let api_url = settings.require_api_url()?;
    let client = bridge_client(&settings, &api_url)?;

    translate_values(client, &settings.values_file, args.dry_run, quiet).await
}

/// Translate the values file in place, or print the result for a dry run
pub(crate) async fn translate_values(
    client: BridgeClient,
    path: &Utf8Path,
    dry_run: bool,
    quiet: bool,
) -> Result<()> {
    let translation = translate_file(client, path, !dry_run).await?;

    if dry_run {
        print!("{}", translation.document);
    } else if !quiet {
        if translation.changed {
            output::success(&format!("Resolved bridge placeholders in {}", path));
        } else {
            output::info(&format!("No bridge placeholders to resolve in {}", path));
        }
    }
    Ok(())
}

#[derive(Debug)]
struct Translation {
    document: String,
    changed: bool,
}

/// The file is only rewritten when `write` is set and the content changed
async fn translate_file(client: BridgeClient, path: &Utf8Path, write: bool) -> Result<Translation> {
    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read values file {}", path))?;

    let document = PlaceholderEngine::new(client)
        .translate(&original)
        .await
        .with_context(|| format!("Failed to translate {}", path))?;

    let changed = document != original;
    if write && changed {
        fs::write(path, &document)
            .with_context(|| format!("Failed to write values file {}", path))?;
    }

    Ok(Translation { document, changed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::types::{NetworkConfig, RetryPolicy};
    use camino::Utf8PathBuf;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn values_file(dir: &TempDir, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join("values.yaml")).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn client(server: &MockServer) -> BridgeClient {
        BridgeClient::new(&server.uri(), &NetworkConfig::default(), RetryPolicy::none()).unwrap()
    }

    async fn mock_myservice(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/resource/myservice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_file_rewritten_in_place() {
        let server = MockServer::start().await;
        mock_myservice(&server, json!({"host": "10.0.0.5"})).await;

        let dir = TempDir::new().unwrap();
        let path = values_file(&dir, "host: {{ bridge.myservice.host }}\n");

        let t = translate_file(client(&server), &path, true).await.unwrap();
        assert!(t.changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "host: 10.0.0.5\n");
    }

    #[tokio::test]
    async fn test_dry_run_leaves_file_alone() {
        let server = MockServer::start().await;
        mock_myservice(&server, json!({"host": "10.0.0.5"})).await;

        let dir = TempDir::new().unwrap();
        let original = "host: {{ bridge.myservice.host }}\n";
        let path = values_file(&dir, original);

        let t = translate_file(client(&server), &path, false).await.unwrap();
        assert_eq!(t.document, "host: 10.0.0.5\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_missing_field_leaves_file_untouched() {
        let server = MockServer::start().await;
        mock_myservice(&server, json!({"ip": "10.0.0.5"})).await;

        let dir = TempDir::new().unwrap();
        let original = "host: {{ bridge.myservice.host }}\n";
        let path = values_file(&dir, original);

        let err = translate_file(client(&server), &path, true).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Field 'host' not found"));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_missing_values_file() {
        let server = MockServer::start().await;
        let err = translate_file(client(&server), Utf8Path::new("/nonexistent/values.yaml"), true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read values file"));
    }
}
