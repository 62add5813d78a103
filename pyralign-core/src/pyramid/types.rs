//! Record types shared by pyramids and pyramid annotations

use crate::error::PyramidError;
use crate::text::Span;
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Ordered parts of one contributor
pub type PartVec = SmallVec<[Span; 2]>;

/// One reference summary's excerpt expressing an SCU
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contributor {
    /// Index of the reference summary the parts belong to
    pub summary_index: usize,
    /// Annotator's label for the excerpt
    pub label: String,
    /// Spans inside `summaries[summary_index]`
    pub parts: PartVec,
}

/// Summary Content Unit
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scu {
    /// Identifier from the source annotation
    pub id: u32,
    /// Cleaned label
    pub label: String,
    /// Contributors, at most one per summary
    pub contributors: Vec<Contributor>,
}

impl Scu {
    /// Number of distinct reference summaries expressing this SCU
    pub fn weight(&self) -> usize {
        self.contributors
            .iter()
            .map(|c| c.summary_index)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Whether some contributor comes from summary `index`
    pub fn has_contributor(&self, index: usize) -> bool {
        self.contributors.iter().any(|c| c.summary_index == index)
    }
}

/// A contributor inside an annotation; the summary is implied
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContributorAnnotation {
    /// Annotator's label for the excerpt
    pub label: String,
    /// Spans inside the annotated summary
    pub parts: PartVec,
}

impl From<&Contributor> for ContributorAnnotation {
    fn from(contributor: &Contributor) -> Self {
        Self {
            label: contributor.label.clone(),
            parts: contributor.parts.clone(),
        }
    }
}

/// One matched SCU inside an annotation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScuAnnotation {
    /// Id of an SCU in the reference pyramid
    pub scu_id: u32,
    /// Cleaned label
    pub label: String,
    /// Matched excerpts
    pub contributors: Vec<ContributorAnnotation>,
}

/// Who wrote an annotated summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SummarizerType {
    /// Human reference summary
    Reference,
    /// System (peer) summary
    Peer,
    /// Baseline system summary
    Baseline,
}

impl SummarizerType {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            SummarizerType::Reference => "reference",
            SummarizerType::Peer => "peer",
            SummarizerType::Baseline => "baseline",
        }
    }
}

impl fmt::Display for SummarizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummarizerType {
    type Err = PyramidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reference" => Ok(SummarizerType::Reference),
            "peer" => Ok(SummarizerType::Peer),
            "baseline" => Ok(SummarizerType::Baseline),
            _ => Err(PyramidError::UnknownSummarizerType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn contributor(summary_index: usize) -> Contributor {
        Contributor {
            summary_index,
            label: format!("c{summary_index}"),
            parts: smallvec![Span::new("x", 0, 1)],
        }
    }

    #[test]
    fn test_weight_counts_distinct_summaries() {
        let scu = Scu {
            id: 1,
            label: "l".to_string(),
            contributors: vec![contributor(0), contributor(2), contributor(0)],
        };
        assert_eq!(scu.contributors.len(), 3);
        assert_eq!(scu.weight(), 2);
        assert!(scu.has_contributor(2));
        assert!(!scu.has_contributor(1));
    }

    #[test]
    fn test_contributor_annotation_from_contributor() {
        let annotation = ContributorAnnotation::from(&contributor(3));
        assert_eq!(annotation.label, "c3");
        assert_eq!(annotation.parts.len(), 1);
    }

    #[test]
    fn test_summarizer_type_parse_and_display() {
        assert_eq!("peer".parse::<SummarizerType>().unwrap(), SummarizerType::Peer);
        assert_eq!(" Reference ".parse::<SummarizerType>().unwrap(), SummarizerType::Reference);
        assert_eq!(SummarizerType::Baseline.to_string(), "baseline");
        assert!(matches!(
            "system".parse::<SummarizerType>(),
            Err(PyramidError::UnknownSummarizerType(name)) if name == "system"
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_summarizer_type_serializes_lowercase() {
        let json = serde_json::to_string(&SummarizerType::Peer).unwrap();
        assert_eq!(json, "\"peer\"");
    }
}
