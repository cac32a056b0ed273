//! Analysis reports and their JSON rendering.

use serde::{Deserialize, Serialize};

use crate::consumer::AnalysisStats;
use crate::contrast::ContrastVerdict;
use crate::error::{Error, Result};
use crate::model::{BoundingBox, NodeContent, SemanticType};
use crate::tree::SemanticTree;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// A text chunk that failed its contrast check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastFinding {
    pub text: String,
    pub page_number: Option<u32>,
    pub bounding_box: BoundingBox,
    pub verdict: ContrastVerdict,
}

/// Outcome of analysing one tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Correct semantic score of the root, in 0..1
    pub root_score: f64,
    pub root_type: Option<SemanticType>,
    pub stats: AnalysisStats,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contrast_failures: Vec<ContrastFinding>,
}

impl AnalysisReport {
    /// Collect the report from an analysed tree.
    pub fn from_tree(tree: &SemanticTree, stats: AnalysisStats) -> Self {
        let contrast_failures = tree
            .depth_first_iter()
            .filter_map(|id| match tree.node(id).content() {
                NodeContent::Text(chunk) => chunk
                    .contrast
                    .filter(|v| !v.compliant)
                    .map(|verdict| ContrastFinding {
                        text: chunk.text.clone(),
                        page_number: chunk.placement.page_number,
                        bounding_box: chunk.placement.bounding_box,
                        verdict,
                    }),
                _ => None,
            })
            .collect();

        let root = tree.node(tree.root());
        Self {
            root_score: root.correct_semantic_score(),
            root_type: root.semantic_type(),
            stats,
            contrast_failures,
        }
    }

    /// True when no checked chunk failed.
    pub fn is_contrast_compliant(&self) -> bool {
        self.contrast_failures.is_empty()
    }
}

/// Convert a report to JSON.
pub fn to_json(report: &AnalysisReport, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(report),
        JsonFormat::Compact => serde_json::to_string(report),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
