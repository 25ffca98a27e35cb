#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use draftline_app_core::{
    CodeGenerator, DocumentSource, GenerationConfig, MarkupTransformer, ReferenceCheck,
    TransformOptions, WorkflowKernel, WorkflowStore,
};
use draftline_core::Action;
use serde_json::{json, Value};

pub const FILE_URL: &str = "https://www.figma.com/file/AbC123/Landing";

pub const ICON_SVG: &str = r#"<svg width="24" height="24"><path d="M0 0h24v24H0z"/></svg>"#;

#[derive(Clone, Default)]
pub struct FakeSource {
    pub fetch_error: Option<String>,
    pub reject_reference: bool,
    pub calls: Arc<AtomicUsize>,
    /// Store to reset while the styles request is still outstanding.
    pub reset_during_fetch: Option<WorkflowStore>,
}

impl FakeSource {
    pub fn failing(message: &str) -> Self {
        Self {
            fetch_error: Some(message.to_string()),
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl DocumentSource for FakeSource {
    async fn validate_reference(&self, url: &str) -> anyhow::Result<ReferenceCheck> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_reference {
            return Ok(ReferenceCheck {
                valid: false,
                id: String::new(),
                error: Some(format!("Not a design file URL: {url}")),
            });
        }
        Ok(ReferenceCheck {
            valid: true,
            id: "AbC123".into(),
            error: None,
        })
    }

    async fn fetch_document(&self, id: &str, _token: &str) -> anyhow::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fetch_error {
            anyhow::bail!("{message}");
        }
        Ok(json!({ "name": "Landing", "id": id, "document": { "children": [] } }))
    }

    async fn fetch_metadata(&self, _id: &str, _token: &str) -> anyhow::Result<Value> {
        Ok(json!({ "name": "Landing", "lastModified": "2026-10-01T00:00:00Z" }))
    }

    async fn fetch_components(&self, _id: &str, _token: &str) -> anyhow::Result<Value> {
        Ok(json!({ "meta": { "components": [{ "key": "a" }, { "key": "b" }] } }))
    }

    async fn fetch_styles(&self, _id: &str, _token: &str) -> anyhow::Result<Value> {
        if let Some(store) = &self.reset_during_fetch {
            store.apply(Action::ResetAll);
        }
        Ok(json!({ "meta": { "styles": [{ "key": "s" }] } }))
    }
}

#[derive(Clone, Default)]
pub struct FakeTransformer {
    pub error: Option<String>,
    pub calls: Arc<AtomicUsize>,
    pub seen: Arc<Mutex<Vec<(String, TransformOptions)>>>,
}

#[async_trait::async_trait]
impl MarkupTransformer for FakeTransformer {
    async fn transform(&self, markup: &str, options: &TransformOptions) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((markup.to_string(), options.clone()));
        if let Some(message) = &self.error {
            anyhow::bail!("{message}");
        }
        Ok(component_source(&options.component_name, markup))
    }
}

pub fn component_source(name: &str, markup: &str) -> String {
    format!("const {name} = (props) => {{\n  return (\n    {markup}\n  );\n}};\nexport default {name};\n")
}

#[derive(Clone)]
pub struct FakeGenerator {
    pub extracted: String,
    pub generated: String,
    pub error: Option<String>,
    /// When set, records the progress message visible in the store right after
    /// each callback.
    pub observe: Option<WorkflowStore>,
    pub observed: Arc<Mutex<Vec<String>>>,
    pub configs: Arc<Mutex<Vec<GenerationConfig>>>,
}

impl Default for FakeGenerator {
    fn default() -> Self {
        Self {
            extracted: ICON_SVG.to_string(),
            generated: component_source("GeneratedComponent", ICON_SVG),
            error: None,
            observe: None,
            observed: Arc::default(),
            configs: Arc::default(),
        }
    }
}

#[async_trait::async_trait]
impl CodeGenerator for FakeGenerator {
    fn extract_vector_markup(&self, _document: &Value) -> anyhow::Result<String> {
        Ok(self.extracted.clone())
    }

    async fn generate(
        &self,
        _document: &Value,
        config: &GenerationConfig,
        on_progress: &(dyn Fn(&str) + Send + Sync),
    ) -> anyhow::Result<String> {
        self.configs.lock().unwrap().push(config.clone());
        on_progress("Laying out frames");
        if let Some(store) = &self.observe {
            self.observed
                .lock()
                .unwrap()
                .push(store.state().ui.progress.message);
        }
        if let Some(message) = &self.error {
            anyhow::bail!("{message}");
        }
        Ok(self.generated.clone())
    }
}

pub type TestKernel = WorkflowKernel<FakeSource, FakeTransformer, FakeGenerator>;

pub fn kernel(source: FakeSource, transformer: FakeTransformer, generator: FakeGenerator) -> TestKernel {
    let k = WorkflowKernel::new(source, transformer, generator);
    k.set_source_url(FILE_URL);
    k.set_access_token("figd_token");
    k
}
