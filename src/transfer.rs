//! Import of API descriptions and export of the whole stub set

use crate::api::AdminClient;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub const NOT_IMPLEMENTED: &str = "This import type is not yet implemented";
pub const EXPORT_FILE_NAME: &str = "wiremock-stubs.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportType {
    #[default]
    OpenApi,
    Postman,
    Har,
}

impl ImportType {
    pub const ALL: [ImportType; 3] = [ImportType::OpenApi, ImportType::Postman, ImportType::Har];

    pub fn label(self) -> &'static str {
        match self {
            ImportType::OpenApi => "OpenAPI / Swagger",
            ImportType::Postman => "Postman Collection",
            ImportType::Har => "HAR File",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn is_supported(self) -> bool {
        self == ImportType::OpenApi
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Imported { created: usize },
    Unsupported,
}

impl ImportOutcome {
    pub fn message(&self) -> String {
        match self {
            ImportOutcome::Imported { created } => format!(
                "Successfully imported OpenAPI specification ({created} stubs created)"
            ),
            ImportOutcome::Unsupported => NOT_IMPLEMENTED.to_string(),
        }
    }
}

async fn read_spec(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("could not read {}", path.display()))
}

/// Unsupported types return before touching the file or the network
pub async fn import_file(
    client: &AdminClient,
    kind: ImportType,
    path: &Path,
) -> anyhow::Result<ImportOutcome> {
    if !kind.is_supported() {
        return Ok(ImportOutcome::Unsupported);
    }

    let spec = read_spec(path).await?;
    let created = client
        .import_openapi(&spec)
        .await
        .context("server rejected the specification")?;

    tracing::info!(created = created.len(), path = %path.display(), "imported OpenAPI spec");
    Ok(ImportOutcome::Imported {
        created: created.len(),
    })
}

/// Status line for the import page
pub fn import_message(result: &anyhow::Result<ImportOutcome>) -> String {
    match result {
        Ok(outcome) => outcome.message(),
        Err(e) => format!("Import failed: {e:#}"),
    }
}

/// Write the server's export document to `<dir>/wiremock-stubs.json`
pub async fn export_to_dir(client: &AdminClient, dir: &Path) -> anyhow::Result<PathBuf> {
    let document = client
        .export_stubs()
        .await
        .context("could not fetch stubs")?;

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("could not create {}", dir.display()))?;

    let target = dir.join(EXPORT_FILE_NAME);
    tokio::fs::write(&target, document)
        .await
        .with_context(|| format!("could not write {}", target.display()))?;

    tracing::info!(path = %target.display(), "exported stubs");
    Ok(target)
}

pub fn export_message(result: &anyhow::Result<PathBuf>) -> String {
    match result {
        Ok(path) => format!("Exported stubs to {}", path.display()),
        Err(e) => format!("Export failed: {e:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens here; any network call would fail the import
    fn offline_client() -> AdminClient {
        AdminClient::new("http://127.0.0.1:9/api")
    }

    #[tokio::test]
    async fn test_postman_and_har_are_not_implemented() {
        let client = offline_client();
        for kind in [ImportType::Postman, ImportType::Har] {
            let result = import_file(&client, kind, Path::new("/does/not/exist")).await;
            assert_eq!(import_message(&result), NOT_IMPLEMENTED);
        }
    }

    #[tokio::test]
    async fn test_unreadable_file_reports_import_failed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("openapi.yaml");

        let result = import_file(&offline_client(), ImportType::OpenApi, &missing).await;
        let message = import_message(&result);
        assert!(message.starts_with("Import failed: could not read"));
    }

    #[test]
    fn test_import_type_cycle() {
        assert_eq!(ImportType::OpenApi.next(), ImportType::Postman);
        assert_eq!(ImportType::Har.next(), ImportType::OpenApi);
    }

    #[test]
    fn test_success_message_mentions_count() {
        let message = ImportOutcome::Imported { created: 3 }.message();
        assert!(message.starts_with("Successfully imported OpenAPI specification"));
        assert!(message.contains('3'));
    }
}
