use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use draftline_app_core::{DirectoryExportSink, ExportSink};
use draftline_core::{
    assemble_outputs, combine_styles, contains_vector_element, export_artifacts,
    require_custom_input, DocumentBundle, DocumentMeta, SpliceOutcome,
};
use tracing::{info, warn};

/// Inputs for an offline finalize run.
#[derive(Debug, Clone)]
pub struct FinalizeInputs {
    pub generated: Utf8PathBuf,
    pub user_markup: Option<Utf8PathBuf>,
    pub base_style: Option<Utf8PathBuf>,
    pub extra_style: Option<Utf8PathBuf>,
    pub bundle: Option<Utf8PathBuf>,
    pub out_dir: Utf8PathBuf,
}

fn read_text(path: &Utf8Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
}

fn read_optional(path: Option<&Utf8PathBuf>) -> Result<String> {
    path.map(|p| read_text(p)).transpose().map(Option::unwrap_or_default)
}

fn load_meta(path: Option<&Utf8PathBuf>) -> Result<Option<DocumentMeta>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bundle: DocumentBundle = serde_json::from_str(&read_text(path)?)
        .with_context(|| format!("Failed to parse document bundle {path}"))?;
    Ok(Some(DocumentMeta::from_bundle(&bundle, Utc::now())))
}

/// Combine generated and custom fragments from disk and export the results.
///
/// Returns the written file paths, or an empty list when there was nothing to
/// export.
pub fn cmd_finalize(inputs: &FinalizeInputs) -> Result<Vec<Utf8PathBuf>> {
    println!(":: Finalizing {}", inputs.generated);

    let generated = read_text(&inputs.generated)?;
    let user_markup = read_optional(inputs.user_markup.as_ref())?;
    let base_style = read_optional(inputs.base_style.as_ref())?;
    let extra_style = read_optional(inputs.extra_style.as_ref())?;
    let meta = load_meta(inputs.bundle.as_ref())?;

    require_custom_input(&user_markup, &extra_style)
        .context("pass --user-markup or --extra-style")?;

    let outputs = assemble_outputs(&generated, &user_markup, &base_style, &extra_style, meta.as_ref());
    match &outputs.splice {
        SpliceOutcome::Spliced => info!("custom markup spliced into generated component"),
        SpliceOutcome::NoUserMarkup => {}
        SpliceOutcome::PatternMiss(e) => {
            warn!(error = %e, "custom markup not spliced; generated markup kept as is")
        }
    }

    let Some(artifacts) = export_artifacts(&outputs.markup, &outputs.style) else {
        println!(":: Nothing to export");
        return Ok(Vec::new());
    };

    let sink = DirectoryExportSink::new(inputs.out_dir.clone());
    sink.deliver_all(&artifacts)?;
    let written: Vec<Utf8PathBuf> = artifacts
        .iter()
        .map(|artifact| sink.dir().join(artifact.file_name))
        .collect();
    for path in &written {
        println!("   Wrote {path}");
    }
    Ok(written)
}

pub fn cmd_styles(base: Option<Utf8PathBuf>, extra: Option<Utf8PathBuf>) -> Result<String> {
    let base = read_optional(base.as_ref())?;
    let extra = read_optional(extra.as_ref())?;
    Ok(combine_styles(&base, &extra, None))
}

/// Whether the file holds markup the convert stage would accept.
pub fn cmd_check_markup(path: &Utf8Path) -> Result<bool> {
    let markup = read_text(path)?;
    let ok = !markup.trim().is_empty() && contains_vector_element(&markup);
    if ok {
        println!(":: {path}: vector markup found");
    } else {
        println!(":: {path}: no vector elements found");
    }
    Ok(ok)
}
