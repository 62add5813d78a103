//! Integration tests for building peer annotations against a pyramid

use pyralign_core::{DiagnosticKind, Pyramid, PyramidAnnotation, PyramidError, Span, SummarizerType};
use std::collections::BTreeSet;

const PYRAMID_XML: &str = include_str!("fixtures/D0701.pyr");
const PEER_XML: &str = include_str!("fixtures/D0701.M.250.A.7.pan");
const BLANK_XML: &str = include_str!("fixtures/D0701.M.250.A.9.pan");

fn pyramid() -> Pyramid {
    Pyramid::from_xml("D0701", PYRAMID_XML, None).unwrap().value
}

fn peer() -> PyramidAnnotation {
    PyramidAnnotation::from_xml("D0701", "7", SummarizerType::Peer, PEER_XML, &pyramid())
        .unwrap()
        .unwrap()
        .value
}

#[test]
fn test_summary_is_whitespace_normalized() {
    let annotation = peer();
    assert_eq!(annotation.instance_id(), "D0701");
    assert_eq!(annotation.summarizer_id(), "7");
    assert_eq!(annotation.summarizer_type(), SummarizerType::Peer);
    assert_eq!(
        annotation.summary(),
        "Floods struck the valley in May. Rescue teams arrived fast. Rain was heavy and floods followed."
    );
}

#[test]
fn test_matched_scus_and_labels() {
    let annotation = peer();
    let ids: Vec<u32> = annotation.scus().iter().map(|scu| scu.scu_id).collect();
    assert_eq!(ids, vec![1, 2, 10]);
    assert_eq!(annotation.get_scu_id_set(), BTreeSet::from([1, 2, 10]));

    let labels: Vec<&str> = annotation.scus().iter().map(|scu| scu.label.as_str()).collect();
    assert_eq!(labels, vec!["The valley flooded", "Rescue teams arrived", "Floods occurred"]);
}

#[test]
fn test_parts_are_realigned_to_normalized_summary() {
    let annotation = peer();
    let scus = annotation.scus();

    assert_eq!(scus[0].contributors[0].parts[0], Span::new("Floods struck the valley", 0, 24));
    // Recorded with a double space that normalization collapsed
    assert_eq!(scus[1].contributors[0].parts[0], Span::new("Rescue teams arrived", 33, 53));
    // Stale offset; nearest occurrence wins
    assert_eq!(scus[2].contributors[0].parts.len(), 1);
    assert_eq!(scus[2].contributors[0].parts[0], Span::new("floods", 79, 85));
}

#[test]
fn test_reserved_and_empty_scus_are_skipped_silently() {
    let built = PyramidAnnotation::from_xml("D0701", "7", SummarizerType::Peer, PEER_XML, &pyramid())
        .unwrap()
        .unwrap();

    assert!(!built.value.get_scu_id_set().contains(&0));
    assert!(!built.value.get_scu_id_set().contains(&3));
    assert!(built
        .diagnostics
        .iter()
        .all(|d| d.scu_id != Some(0) && d.scu_id != Some(3)));
}

#[test]
fn test_diagnostics_report_each_drop() {
    let built = PyramidAnnotation::from_xml("D0701", "7", SummarizerType::Peer, PEER_XML, &pyramid())
        .unwrap()
        .unwrap();

    let reported: Vec<(DiagnosticKind, Option<u32>)> = built
        .diagnostics
        .iter()
        .map(|d| (d.kind, d.scu_id))
        .collect();
    assert_eq!(
        reported,
        vec![
            (DiagnosticKind::SkippedScu, Some(99)),
            (DiagnosticKind::DroppedPart, Some(10)),
            (DiagnosticKind::DroppedPart, Some(8)),
            (DiagnosticKind::DroppedContributor, Some(8)),
            (DiagnosticKind::DroppedScu, Some(8)),
        ]
    );
}

#[test]
fn test_blank_summary_yields_no_annotation() {
    let result =
        PyramidAnnotation::from_xml("D0701", "9", SummarizerType::Peer, BLANK_XML, &pyramid()).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_only_reserved_id_gives_empty_annotation() {
    let xml = r#"<annotation>
<text><line>Nothing in this summary matched.</line></text>
<peerscu uid="0" label="(0) Unmatched">
<contributor label="Nothing"><part label="Nothing" start="0" end="7"/></contributor>
</peerscu>
</annotation>"#;
    let built = PyramidAnnotation::from_xml("D0701", "3", SummarizerType::Baseline, xml, &pyramid())
        .unwrap()
        .unwrap();
    assert!(built.value.scus().is_empty());
    assert!(built.value.get_scu_id_set().is_empty());
    assert!(built.diagnostics.is_empty());
    assert_eq!(built.value.summarizer_type(), SummarizerType::Baseline);
}

#[test]
fn test_invalid_part_offset_is_fatal() {
    let xml = r#"<annotation>
<text><line>Floods hit.</line></text>
<peerscu uid="1" label="(1) x">
<contributor label="Floods"><part label="Floods" start="zero" end="6"/></contributor>
</peerscu>
</annotation>"#;
    let err = PyramidAnnotation::from_xml("D0701", "3", SummarizerType::Peer, xml, &pyramid())
        .unwrap_err();
    assert!(matches!(
        err,
        PyramidError::InvalidAttribute { element: "part", attribute: "start", .. }
    ));
}
