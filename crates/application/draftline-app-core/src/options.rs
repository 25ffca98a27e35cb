//! Fixed configuration objects handed to the external collaborators.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFramework {
    Components,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOptions {
    pub target_framework: TargetFramework,
    pub typed: bool,
    pub style_mode: StyleMode,
    pub component_name: String,
    pub pass_props: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            target_framework: TargetFramework::Components,
            typed: true,
            style_mode: StyleMode::External,
            component_name: draftline_config::GENERATED_COMPONENT_NAME.to_string(),
            pass_props: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationFlags {
    pub remove_unused_styles: bool,
    pub merge_similar_styles: bool,
    pub minify: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityFlags {
    pub alt_text: bool,
    pub aria_labels: bool,
    pub semantic_markup: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestingFlags {
    pub generate_tests: bool,
    pub test_ids: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub target_framework: TargetFramework,
    pub typed: bool,
    pub style_mode: StyleMode,
    pub library: String,
    pub optimizations: OptimizationFlags,
    pub accessibility: AccessibilityFlags,
    pub testing: TestingFlags,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            target_framework: TargetFramework::Components,
            typed: true,
            style_mode: StyleMode::External,
            library: "custom".to_string(),
            optimizations: OptimizationFlags {
                remove_unused_styles: true,
                merge_similar_styles: true,
                minify: false,
            },
            accessibility: AccessibilityFlags {
                alt_text: true,
                aria_labels: true,
                semantic_markup: true,
            },
            testing: TestingFlags {
                generate_tests: false,
                test_ids: true,
            },
        }
    }
}
