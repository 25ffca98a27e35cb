use draftline_core::ExportArtifact;
use serde_json::Value;

use crate::options::{GenerationConfig, TransformOptions};

/// Outcome of checking a design file URL before anything is fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCheck {
    pub valid: bool,
    pub id: String,
    pub error: Option<String>,
}

/// Remote design-document API.
///
/// Failures are expected to carry the HTTP status in their message
/// (`403`, `404`, `401`, `429`); the connect stage classifies on that text.
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync + 'static {
    async fn validate_reference(&self, url: &str) -> anyhow::Result<ReferenceCheck>;
    async fn fetch_document(&self, id: &str, token: &str) -> anyhow::Result<Value>;
    async fn fetch_metadata(&self, id: &str, token: &str) -> anyhow::Result<Value>;
    async fn fetch_components(&self, id: &str, token: &str) -> anyhow::Result<Value>;
    async fn fetch_styles(&self, id: &str, token: &str) -> anyhow::Result<Value>;
}

#[async_trait::async_trait]
pub trait MarkupTransformer: Send + Sync + 'static {
    async fn transform(&self, markup: &str, options: &TransformOptions) -> anyhow::Result<String>;
}

#[async_trait::async_trait]
pub trait CodeGenerator: Send + Sync + 'static {
    fn extract_vector_markup(&self, document: &Value) -> anyhow::Result<String>;

    async fn generate(
        &self,
        document: &Value,
        config: &GenerationConfig,
        on_progress: &(dyn Fn(&str) + Send + Sync),
    ) -> anyhow::Result<String>;
}

/// Destination for exported files.
pub trait ExportSink {
    fn deliver(&self, artifact: &ExportArtifact) -> anyhow::Result<()>;

    /// Deliver a set of artifacts that belong together. Sinks that can stage
    /// their writes should leave nothing behind when any artifact fails.
    fn deliver_all(&self, artifacts: &[ExportArtifact]) -> anyhow::Result<()> {
        for artifact in artifacts {
            self.deliver(artifact)?;
        }
        Ok(())
    }
}
