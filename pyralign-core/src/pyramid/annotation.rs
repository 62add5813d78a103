//! Pyramid annotations
//!
//! A [`PyramidAnnotation`] records which SCUs of a reference [`Pyramid`] one
//! summary expresses, and where. Peer annotations are built from annotation
//! XML; reference annotations are derived with [`Pyramid::get_annotation`].

use super::labels::clean_annotated_scu_label;
use super::reference::Pyramid;
use super::types::{ContributorAnnotation, PartVec, ScuAnnotation, SummarizerType};
use super::xml;
use crate::diagnostics::{Built, DiagnosticKind, Diagnostics};
use crate::error::Result;
use crate::text::{normalize_whitespace, SpanMatcher};
use roxmltree::Node;
use std::collections::BTreeSet;

/// Reserved SCU id meaning "no SCU matched"
pub const NO_SCU_ID: u32 = 0;

/// The SCUs one summary was found to express
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PyramidAnnotation {
    instance_id: String,
    summarizer_id: String,
    summarizer_type: SummarizerType,
    summary: String,
    scus: Vec<ScuAnnotation>,
}

impl PyramidAnnotation {
    /// Assemble an annotation from parts
    pub fn new(
        instance_id: impl Into<String>,
        summarizer_id: impl Into<String>,
        summarizer_type: SummarizerType,
        summary: impl Into<String>,
        scus: Vec<ScuAnnotation>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            summarizer_id: summarizer_id.into(),
            summarizer_type,
            summary: summary.into(),
            scus,
        }
    }

    /// Build an annotation from annotation XML against `pyramid`
    ///
    /// Returns `Ok(None)` when the document has no summary text. SCU
    /// references that are reserved or unknown to `pyramid` are skipped, and
    /// parts that cannot be located in the summary are dropped; both are
    /// reported in the returned diagnostics.
    pub fn from_xml(
        instance_id: impl Into<String>,
        summarizer_id: impl Into<String>,
        summarizer_type: SummarizerType,
        xml: &str,
        pyramid: &Pyramid,
    ) -> Result<Option<Built<Self>>> {
        let doc = xml::parse(xml)?;
        let root = doc.root_element();

        let summary = normalize_whitespace(&xml::document_text(root));
        if summary.is_empty() {
            return Ok(None);
        }

        let known_ids = pyramid.scu_ids();
        let mut diagnostics = Diagnostics::new();
        let scus = {
            let matcher = SpanMatcher::new(&summary);
            let mut scus = Vec::new();
            for node in xml::children(root, "peerscu") {
                if xml::child(node, "contributor").is_none() {
                    continue;
                }
                if let Some(scu) = align_peer_scu(node, &known_ids, &matcher, &mut diagnostics)? {
                    scus.push(scu);
                }
            }
            scus
        };

        let annotation = Self::new(instance_id, summarizer_id, summarizer_type, summary, scus);
        Ok(Some(Built {
            value: annotation,
            diagnostics,
        }))
    }

    /// Topic identifier
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Id of the annotated summary's author
    pub fn summarizer_id(&self) -> &str {
        &self.summarizer_id
    }

    /// Kind of the annotated summary's author
    pub fn summarizer_type(&self) -> SummarizerType {
        self.summarizer_type
    }

    /// Full text of the annotated summary
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Matched SCUs in document order
    pub fn scus(&self) -> &[ScuAnnotation] {
        &self.scus
    }

    /// Ids of every matched SCU
    pub fn get_scu_id_set(&self) -> BTreeSet<u32> {
        self.scus.iter().map(|scu| scu.scu_id).collect()
    }
}

fn align_peer_scu(
    node: Node<'_, '_>,
    known_ids: &BTreeSet<u32>,
    matcher: &SpanMatcher<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<Option<ScuAnnotation>> {
    let scu_id: u32 = xml::parsed(node, "peerscu", "uid")?;
    if scu_id == NO_SCU_ID {
        return Ok(None);
    }
    if !known_ids.contains(&scu_id) {
        diagnostics.push(
            DiagnosticKind::SkippedScu,
            Some(scu_id),
            "id not present in the reference pyramid",
        );
        return Ok(None);
    }
    let label = clean_annotated_scu_label(node.attribute("label").unwrap_or(""));

    let mut contributors = Vec::new();
    for contributor_node in xml::children(node, "contributor") {
        let contributor_label = contributor_node.attribute("label").unwrap_or("").to_string();
        let mut parts = PartVec::new();

        for part_node in xml::children(contributor_node, "part") {
            let text = normalize_whitespace(part_node.attribute("label").unwrap_or(""));
            let start: usize = xml::parsed(part_node, "part", "start")?;
            match matcher.locate_nearest(&text, start) {
                Some(span) => parts.push(span),
                None => diagnostics.push(
                    DiagnosticKind::DroppedPart,
                    Some(scu_id),
                    format!("part '{text}' not found near offset {start}"),
                ),
            }
        }

        if parts.is_empty() {
            diagnostics.push(
                DiagnosticKind::DroppedContributor,
                Some(scu_id),
                format!("'{contributor_label}' has no locatable parts"),
            );
            continue;
        }
        contributors.push(ContributorAnnotation {
            label: contributor_label,
            parts,
        });
    }

    if contributors.is_empty() {
        diagnostics.push(
            DiagnosticKind::DroppedScu,
            Some(scu_id),
            "no contributors could be aligned",
        );
        return Ok(None);
    }

    Ok(Some(ScuAnnotation {
        scu_id,
        label,
        contributors,
    }))
}
