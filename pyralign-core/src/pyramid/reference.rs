//! Reference pyramids
//!
//! A [`Pyramid`] holds a topic's reference summaries and the SCUs annotated
//! across them. It is built once from pyramid XML and never mutated; derived
//! views are produced by [`Pyramid::remove_summary`] and
//! [`Pyramid::get_annotation`].

use super::annotation::PyramidAnnotation;
use super::labels::{clean_scu_label, summarizer_id_from_separator};
use super::types::{Contributor, ContributorAnnotation, PartVec, Scu, ScuAnnotation, SummarizerType};
use super::xml;
use crate::diagnostics::{Built, DiagnosticKind, Diagnostics};
use crate::error::{PyramidError, Result};
use crate::text::{IndexedText, SpanMatcher};
use regex::Regex;
use roxmltree::Node;
use std::collections::BTreeSet;

/// A topic's reference summaries and their SCUs
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PyramidRecord"))]
pub struct Pyramid {
    instance_id: String,
    summaries: Vec<String>,
    summarizer_ids: Vec<String>,
    scus: Vec<Scu>,
}

impl Pyramid {
    /// Assemble a pyramid from parts, checking its invariants
    ///
    /// `summaries` and `summarizer_ids` must be parallel, every contributor
    /// must point at an existing summary, and no SCU may have two
    /// contributors from the same summary.
    pub fn new(
        instance_id: impl Into<String>,
        summaries: Vec<String>,
        summarizer_ids: Vec<String>,
        scus: Vec<Scu>,
    ) -> Result<Self> {
        if summaries.len() != summarizer_ids.len() {
            return Err(PyramidError::InvalidPyramid(format!(
                "{} summaries but {} summarizer ids",
                summaries.len(),
                summarizer_ids.len()
            )));
        }
        for scu in &scus {
            let mut seen = BTreeSet::new();
            for contributor in &scu.contributors {
                if contributor.summary_index >= summaries.len() {
                    return Err(PyramidError::SummaryIndexOutOfRange {
                        index: contributor.summary_index,
                        len: summaries.len(),
                    });
                }
                if !seen.insert(contributor.summary_index) {
                    return Err(PyramidError::InvalidPyramid(format!(
                        "SCU {} has two contributors from summary {}",
                        scu.id, contributor.summary_index
                    )));
                }
            }
        }
        Ok(Self {
            instance_id: instance_id.into(),
            summaries,
            summarizer_ids,
            scus,
        })
    }

    /// Build a pyramid from pyramid XML
    ///
    /// The document text is carved into reference summaries at every match of
    /// the document's `startDocumentRegEx`, or of `default_document_regex`
    /// when the document has none. Parts are re-aligned against the summary
    /// they fall into. Contributors and SCUs that cannot be aligned are
    /// dropped and reported in the returned diagnostics.
    pub fn from_xml(
        instance_id: impl Into<String>,
        xml: &str,
        default_document_regex: Option<&str>,
    ) -> Result<Built<Self>> {
        let doc = xml::parse(xml)?;
        let root = doc.root_element();
        let text = xml::document_text(root);

        let pattern = xml::child(root, "startDocumentRegEx")
            .and_then(|node| node.text())
            .map(str::trim)
            .filter(|pattern| !pattern.is_empty())
            .or(default_document_regex)
            .ok_or(PyramidError::MissingSeparator)?;

        let layout = SummaryLayout::carve(&text, pattern)?;
        let mut diagnostics = Diagnostics::new();
        let scus = {
            let mut aligner = ScuAligner::new(&layout, &text, &mut diagnostics);
            let mut scus = Vec::new();
            for scu_node in xml::children(root, "scu") {
                if let Some(scu) = aligner.align_scu(scu_node)? {
                    scus.push(scu);
                }
            }
            scus
        };

        let pyramid = Self {
            instance_id: instance_id.into(),
            summaries: layout.summaries,
            summarizer_ids: layout.summarizer_ids,
            scus,
        };
        Ok(Built {
            value: pyramid,
            diagnostics,
        })
    }

    /// Topic identifier
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Reference summary texts
    pub fn summaries(&self) -> &[String] {
        &self.summaries
    }

    /// Summarizer ids, parallel to [`Pyramid::summaries`]
    pub fn summarizer_ids(&self) -> &[String] {
        &self.summarizer_ids
    }

    /// SCUs in document order
    pub fn scus(&self) -> &[Scu] {
        &self.scus
    }

    /// Number of reference summaries
    pub fn summary_count(&self) -> usize {
        self.summaries.len()
    }

    /// SCU with the given id
    pub fn scu(&self, id: u32) -> Option<&Scu> {
        self.scus.iter().find(|scu| scu.id == id)
    }

    /// Every SCU id in the pyramid
    pub fn scu_ids(&self) -> BTreeSet<u32> {
        self.scus.iter().map(|scu| scu.id).collect()
    }

    /// Sum of all SCU weights
    pub fn total_weight(&self) -> usize {
        self.scus.iter().map(Scu::weight).sum()
    }

    /// Ids of the SCUs with a contributor from summary `index`
    ///
    /// Empty when `index` is out of range.
    pub fn get_scu_id_set(&self, index: usize) -> BTreeSet<u32> {
        self.scus
            .iter()
            .filter(|scu| scu.has_contributor(index))
            .map(|scu| scu.id)
            .collect()
    }

    /// A new pyramid without summary `index`
    ///
    /// Contributors from that summary are dropped, contributors from later
    /// summaries shift down by one, and SCUs left without contributors are
    /// dropped.
    pub fn remove_summary(&self, index: usize) -> Result<Self> {
        self.check_index(index)?;

        let mut summaries = self.summaries.clone();
        summaries.remove(index);
        let mut summarizer_ids = self.summarizer_ids.clone();
        summarizer_ids.remove(index);

        let scus = self
            .scus
            .iter()
            .filter_map(|scu| {
                let contributors: Vec<Contributor> = scu
                    .contributors
                    .iter()
                    .filter(|c| c.summary_index != index)
                    .map(|c| Contributor {
                        summary_index: if c.summary_index > index {
                            c.summary_index - 1
                        } else {
                            c.summary_index
                        },
                        label: c.label.clone(),
                        parts: c.parts.clone(),
                    })
                    .collect();
                (!contributors.is_empty()).then(|| Scu {
                    id: scu.id,
                    label: scu.label.clone(),
                    contributors,
                })
            })
            .collect();

        Ok(Self {
            instance_id: self.instance_id.clone(),
            summaries,
            summarizer_ids,
            scus,
        })
    }

    /// Reference summary `index` viewed as an annotation against this pyramid
    pub fn get_annotation(&self, index: usize) -> Result<PyramidAnnotation> {
        self.check_index(index)?;

        let scus = self
            .scus
            .iter()
            .filter_map(|scu| {
                let contributors: Vec<ContributorAnnotation> = scu
                    .contributors
                    .iter()
                    .filter(|c| c.summary_index == index)
                    .map(ContributorAnnotation::from)
                    .collect();
                (!contributors.is_empty()).then(|| ScuAnnotation {
                    scu_id: scu.id,
                    label: scu.label.clone(),
                    contributors,
                })
            })
            .collect();

        Ok(PyramidAnnotation::new(
            self.instance_id.clone(),
            self.summarizer_ids[index].clone(),
            SummarizerType::Reference,
            self.summaries[index].clone(),
            scus,
        ))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.summaries.len() {
            Ok(())
        } else {
            Err(PyramidError::SummaryIndexOutOfRange {
                index,
                len: self.summaries.len(),
            })
        }
    }
}

/// Unchecked serialized form, validated through [`Pyramid::new`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PyramidRecord {
    instance_id: String,
    summaries: Vec<String>,
    summarizer_ids: Vec<String>,
    scus: Vec<Scu>,
}

#[cfg(feature = "serde")]
impl TryFrom<PyramidRecord> for Pyramid {
    type Error = PyramidError;

    fn try_from(record: PyramidRecord) -> Result<Self> {
        Pyramid::new(
            record.instance_id,
            record.summaries,
            record.summarizer_ids,
            record.scus,
        )
    }
}

/// Reference summaries carved out of the document text
#[derive(Debug)]
struct SummaryLayout {
    summaries: Vec<String>,
    summarizer_ids: Vec<String>,
    /// Character offset where each separator match ends in the document text
    offsets: Vec<usize>,
    /// Whitespace characters trimmed from the front of each summary
    leading: Vec<usize>,
}

impl SummaryLayout {
    fn carve(text: &str, pattern: &str) -> Result<Self> {
        let separator = Regex::new(pattern).map_err(|source| PyramidError::InvalidSeparator {
            pattern: pattern.to_string(),
            source,
        })?;
        let matches: Vec<_> = separator.find_iter(text).collect();
        if matches.is_empty() {
            return Err(PyramidError::SeparatorNotFound {
                pattern: pattern.to_string(),
            });
        }

        let indexed = IndexedText::new(text);
        let mut summaries = Vec::with_capacity(matches.len());
        let mut summarizer_ids = Vec::with_capacity(matches.len());
        let mut offsets = Vec::with_capacity(matches.len());
        let mut leading = Vec::with_capacity(matches.len());

        for (index, m) in matches.iter().enumerate() {
            let body_end = matches.get(index + 1).map_or(text.len(), |next| next.start());
            let body = &text[m.end()..body_end];
            let summary = body.trim();
            if summary.is_empty() {
                return Err(PyramidError::EmptySummary { index });
            }

            let offset = indexed
                .char_index(m.end())
                .ok_or(PyramidError::EmptySummary { index })?;
            let trimmed = body.len() - body.trim_start().len();

            summaries.push(summary.to_string());
            summarizer_ids.push(summarizer_id_from_separator(m.as_str()));
            offsets.push(offset);
            leading.push(body[..trimmed].chars().count());
        }

        Ok(Self {
            summaries,
            summarizer_ids,
            offsets,
            leading,
        })
    }

    /// Summary containing document offset `offset` (upper-bound search)
    fn summary_index(&self, offset: usize) -> Result<usize> {
        self.offsets
            .partition_point(|&start| start <= offset)
            .checked_sub(1)
            .ok_or(PyramidError::OffsetBeforeFirstSummary { offset })
    }

    /// Document offset `offset` relative to the trimmed text of summary `index`
    ///
    /// Offsets inside the trimmed leading whitespace clamp to 0.
    fn relative_offset(&self, index: usize, offset: usize) -> usize {
        (offset - self.offsets[index]).saturating_sub(self.leading[index])
    }
}

/// Aligns `scu` nodes against the carved summaries
struct ScuAligner<'a> {
    layout: &'a SummaryLayout,
    document: IndexedText<'a>,
    matchers: Vec<SpanMatcher<'a>>,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> ScuAligner<'a> {
    fn new(layout: &'a SummaryLayout, text: &'a str, diagnostics: &'a mut Diagnostics) -> Self {
        let matchers = layout
            .summaries
            .iter()
            .map(|summary| SpanMatcher::new(summary))
            .collect();
        Self {
            layout,
            document: IndexedText::new(text),
            matchers,
            diagnostics,
        }
    }

    fn align_scu(&mut self, node: Node<'_, '_>) -> Result<Option<Scu>> {
        let id: u32 = xml::parsed(node, "scu", "uid")?;
        let label = clean_scu_label(node.attribute("label").unwrap_or(""));

        let mut contributors: Vec<Contributor> = Vec::new();
        for contributor_node in xml::children(node, "contributor") {
            if let Some(contributor) = self.align_contributor(id, contributor_node)? {
                contributors.push(contributor);
            }
        }

        if contributors.is_empty() {
            self.diagnostics.push(
                DiagnosticKind::DroppedScu,
                Some(id),
                "no contributors could be aligned",
            );
            return Ok(None);
        }

        let mut seen = BTreeSet::new();
        if let Some(duplicate) = contributors
            .iter()
            .map(|c| c.summary_index)
            .find(|&index| !seen.insert(index))
        {
            self.diagnostics.push(
                DiagnosticKind::DroppedScu,
                Some(id),
                format!("two contributors from summary {duplicate}"),
            );
            return Ok(None);
        }

        Ok(Some(Scu {
            id,
            label,
            contributors,
        }))
    }

    fn align_contributor(&mut self, scu_id: u32, node: Node<'_, '_>) -> Result<Option<Contributor>> {
        let label = node.attribute("label").unwrap_or("").to_string();
        let mut summary_index: Option<usize> = None;
        let mut parts = PartVec::new();

        for part_node in xml::children(node, "part") {
            let start: usize = xml::parsed(part_node, "part", "start")?;
            let text = self.part_text(part_node, start)?;

            let index = self.layout.summary_index(start)?;
            match summary_index {
                Some(previous) if previous != index => {
                    self.diagnostics.push(
                        DiagnosticKind::DroppedContributor,
                        Some(scu_id),
                        format!("'{label}' spans summaries {previous} and {index}"),
                    );
                    return Ok(None);
                }
                _ => summary_index = Some(index),
            }

            let relative = self.layout.relative_offset(index, start);
            match self.matchers[index].locate(&text, relative) {
                Some(span) => parts.push(span),
                None => {
                    self.diagnostics.push(
                        DiagnosticKind::DroppedContributor,
                        Some(scu_id),
                        format!("part '{text}' not found in summary {index} near offset {relative}"),
                    );
                    return Ok(None);
                }
            }
        }

        match summary_index {
            Some(summary_index) => Ok(Some(Contributor {
                summary_index,
                label,
                parts,
            })),
            None => {
                self.diagnostics.push(
                    DiagnosticKind::DroppedContributor,
                    Some(scu_id),
                    format!("'{label}' has no parts"),
                );
                Ok(None)
            }
        }
    }

    /// The part's recorded text, or the document slice `[start, end)` when the
    /// part carries no label
    fn part_text(&self, node: Node<'_, '_>, start: usize) -> Result<String> {
        if let Some(label) = node.attribute("label") {
            return Ok(label.to_string());
        }
        let end: usize = xml::parsed(node, "part", "end")?;
        self.document
            .slice(start, end)
            .map(str::to_string)
            .ok_or_else(|| PyramidError::InvalidAttribute {
                element: "part",
                attribute: "end",
                value: end.to_string(),
            })
    }
}
