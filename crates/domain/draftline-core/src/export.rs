use draftline_config::{COMPONENT_FILE_NAME, EXPORT_CONTENT_TYPE, STYLE_FILE_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub contents: String,
}

/// Build the component and stylesheet downloads, or nothing if either is empty.
pub fn export_artifacts(final_markup: &str, final_style: &str) -> Option<[ExportArtifact; 2]> {
    if final_markup.is_empty() || final_style.is_empty() {
        return None;
    }
    Some([
        ExportArtifact {
            file_name: COMPONENT_FILE_NAME,
            content_type: EXPORT_CONTENT_TYPE,
            contents: final_markup.to_string(),
        },
        ExportArtifact {
            file_name: STYLE_FILE_NAME,
            content_type: EXPORT_CONTENT_TYPE,
            contents: final_style.to_string(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_blob_empty_yields_nothing() {
        assert!(export_artifacts("", ".a{}").is_none());
        assert!(export_artifacts("<div/>", "").is_none());
    }

    #[test]
    fn artifacts_carry_fixed_names_and_text_type() {
        let [component, style] = export_artifacts("<div/>", ".a{}").unwrap();
        assert_eq!(component.file_name, "GeneratedComponent.tsx");
        assert_eq!(style.file_name, "styles.css");
        assert_eq!(component.content_type, "text/plain");
        assert_eq!(style.contents, ".a{}");
    }
}
