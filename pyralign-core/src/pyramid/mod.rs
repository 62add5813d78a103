//! Pyramid and pyramid-annotation models
//!
//! Reference side: [`Pyramid`] owns [`Scu`]s, which own [`Contributor`]s and
//! their [`Span`](crate::text::Span) parts. Peer side: [`PyramidAnnotation`]
//! owns [`ScuAnnotation`]s. The two sides are linked only by SCU id.

pub mod annotation;
pub mod labels;
pub mod reference;
pub mod types;
mod xml;

pub use annotation::{PyramidAnnotation, NO_SCU_ID};
pub use labels::{clean_annotated_scu_label, clean_scu_label, summarizer_id_from_separator};
pub use reference::Pyramid;
pub use types::{
    Contributor, ContributorAnnotation, PartVec, Scu, ScuAnnotation, SummarizerType,
};
