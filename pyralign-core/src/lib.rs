//! Pyramid/SCU span alignment for summarization-evaluation corpora
//!
//! Pyramid annotations mark which excerpts of reference and peer summaries
//! express the same Summary Content Unit (SCU). The recorded excerpts and
//! offsets often disagree with the live summary text in whitespace, because
//! the text was re-transcribed after annotation. This crate rebuilds
//! character-exact spans from such annotations.
//!
//! # Architecture
//!
//! - [`text`]: offset reconciliation and span matching
//! - [`pyramid`]: reference pyramids, peer annotations and derived views
//! - [`diagnostics`]: recoverable drops reported alongside built values
//! - [`error`]: fatal errors for unusable documents
//!
//! # Example
//!
//! ```rust
//! use pyralign_core::{Pyramid, PyramidAnnotation, SummarizerType};
//!
//! let pyramid_xml = r#"<pyramid>
//!   <startDocumentRegEx><![CDATA[-+ D\d+\.[A-Z] -+]]></startDocumentRegEx>
//!   <text>
//!     <line>--- D1.A ---</line>
//!     <line>Storms flooded the valley.</line>
//!     <line>--- D1.B ---</line>
//!     <line>The valley was flooded by storms.</line>
//!   </text>
//!   <scu uid="1" label="The valley flooded (2.0)">
//!     <contributor label="Storms flooded the valley">
//!       <part label="flooded the valley" start="20" end="38"/>
//!     </contributor>
//!     <contributor label="valley was flooded">
//!       <part label="valley was flooded" start="57" end="75"/>
//!     </contributor>
//!   </scu>
//! </pyramid>"#;
//!
//! let built = Pyramid::from_xml("D1", pyramid_xml, None).unwrap();
//! let pyramid = built.value;
//! assert_eq!(pyramid.summarizer_ids(), ["A", "B"]);
//! assert_eq!(pyramid.scus()[0].label, "The valley flooded");
//! assert_eq!(pyramid.scus()[0].weight(), 2);
//!
//! let peer_xml = r#"<annotation>
//!   <text><line>Heavy storms flooded the valley.</line></text>
//!   <peerscu uid="1" label="(2) The valley flooded">
//!     <contributor label="flooded the valley">
//!       <part label="flooded the valley" start="13" end="31"/>
//!     </contributor>
//!   </peerscu>
//! </annotation>"#;
//!
//! let annotation = PyramidAnnotation::from_xml("D1", "7", SummarizerType::Peer, peer_xml, &pyramid)
//!     .unwrap()
//!     .expect("summary text is present")
//!     .value;
//! assert_eq!(annotation.scus()[0].contributors[0].parts[0].start, 13);
//! ```

pub mod diagnostics;
pub mod error;
pub mod pyramid;
pub mod text;

pub use diagnostics::{Built, Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{PyramidError, Result};
pub use pyramid::{
    Contributor, ContributorAnnotation, PartVec, Pyramid, PyramidAnnotation, Scu, ScuAnnotation,
    SummarizerType,
};
pub use text::{match_span, OffsetMap, Span, SpanMatcher};
