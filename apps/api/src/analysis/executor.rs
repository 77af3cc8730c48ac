//! Detector Executor — runs every applicable detector over its scan target
//! and collects raw candidates in absolute document offsets.
//!
//! Order of the output is the tie-break order used later by the resolver:
//! category order, then registration order, then match order.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::analysis::messages::{self, RenderContext};
use crate::analysis::models::{CandidateIssue, Category, CategoryFlags, Severity, WritingMode};
use crate::analysis::regions::{locate, RegionName, Regions};
use crate::analysis::rules::{Detector, Registry, ScanTarget};

/// Everything the executor needs for one call.
pub struct ExecutionInput<'a> {
    pub document: &'a str,
    /// Parsed regions when the caller asked for region-scoped scanning.
    pub regions: Option<&'a Regions>,
    pub mode: &'a WritingMode,
    pub flags: &'a CategoryFlags,
}

#[derive(Debug, Default)]
pub struct Execution {
    pub candidates: Vec<CandidateIssue>,
    pub matches_by_category: BTreeMap<Category, usize>,
    pub failed_categories: Vec<Category>,
    pub regions_unlocated: usize,
}

pub fn execute(registry: &Registry, input: &ExecutionInput<'_>) -> Execution {
    let mut execution = Execution::default();

    for category in Category::ALL {
        if !input.flags.is_enabled(category) || !category.active_in(input.mode) {
            continue;
        }

        // A misbehaving rule must not take the whole run down with it.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            run_category(registry, category, input)
        }));

        match outcome {
            Ok(CategoryRun {
                candidates,
                regions_unlocated,
            }) => {
                debug!("{category}: {} candidates", candidates.len());
                execution
                    .matches_by_category
                    .insert(category, candidates.len());
                execution.regions_unlocated += regions_unlocated;
                execution.candidates.extend(candidates);
            }
            Err(_) => {
                warn!("Detector category '{category}' failed; contributing no issues");
                execution.failed_categories.push(category);
            }
        }
    }

    execution
}

struct CategoryRun {
    candidates: Vec<CandidateIssue>,
    regions_unlocated: usize,
}

fn run_category(registry: &Registry, category: Category, input: &ExecutionInput<'_>) -> CategoryRun {
    let mut run = CategoryRun {
        candidates: Vec::new(),
        regions_unlocated: 0,
    };

    for detector in registry.for_category(category) {
        if !detector.applies_to(input.mode) {
            continue;
        }
        match scan_target(detector, input) {
            Target::Text { text, offset } => {
                run.candidates.extend(detect(detector, text, offset, input.mode));
            }
            Target::Skip => {}
            Target::Unlocated(region) => {
                warn!(
                    "Region {region:?} for detector '{}' not found in document; skipping",
                    detector.id
                );
                run.regions_unlocated += 1;
            }
        }
    }

    run
}

enum Target<'a> {
    Text { text: &'a str, offset: usize },
    Skip,
    Unlocated(RegionName),
}

/// Resolves the text a detector scans and its absolute start offset.
///
/// Region offsets come from first-occurrence search of the region text.
/// Without parsed regions, body-scoped detectors fall back to the whole
/// document and other region-scoped detectors do not run.
fn scan_target<'a>(detector: &Detector, input: &ExecutionInput<'a>) -> Target<'a> {
    match detector.target {
        ScanTarget::Full => Target::Text {
            text: input.document,
            offset: 0,
        },
        ScanTarget::Region(name) => match input.regions {
            Some(regions) => {
                let text = regions.get(name);
                if text.is_empty() {
                    return Target::Skip;
                }
                match locate(input.document, text) {
                    // Slice the document, not the region copy, so the
                    // returned text borrows from the input.
                    Some(start) => Target::Text {
                        text: &input.document[start..start + text.len()],
                        offset: start,
                    },
                    None => Target::Unlocated(name),
                }
            }
            None if name == RegionName::Body => Target::Text {
                text: input.document,
                offset: 0,
            },
            None => Target::Skip,
        },
    }
}

fn detect(
    detector: &Detector,
    text: &str,
    offset: usize,
    mode: &WritingMode,
) -> Vec<CandidateIssue> {
    let template = messages::lookup(detector.id, mode.kind());

    detector
        .scan(text, mode)
        .into_iter()
        .map(|hit| {
            let matched = &text[hit.start..hit.end];
            let ctx = RenderContext {
                matched,
                suggestion: &hit.suggestion,
                email: mode.email(),
            };
            let (severity, message, explanation) = match template {
                Some(t) => (
                    t.severity,
                    messages::render(t.message, &ctx),
                    t.explanation.map(|e| messages::render(e, &ctx)),
                ),
                None => (
                    Severity::Medium,
                    format!("Possible {} issue", detector.category),
                    None,
                ),
            };
            CandidateIssue {
                category: detector.category,
                severity,
                message,
                explanation,
                claimed_text: matched.to_string(),
                suggestion: hit.suggestion,
                start: (offset + hit.start) as i64,
                end: (offset + hit.end) as i64,
                source: detector.id.to_string(),
            }
        })
        .collect()
}
