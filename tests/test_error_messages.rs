//! Test to verify error message quality

use surfdnm::parser::{parse_dnm, parse_surf};
use surfdnm::Error;

#[test]
fn test_error_message_for_bad_coordinate() {
    let text = "SURF\nV 0 0 0\nV 1 zero 0\nE\n";
    let err = parse_surf(text, "bad.srf").unwrap_err();
    println!("Error message: {}", err);

    assert_eq!(err.line(), Some(3));
    let message = err.to_string();
    assert!(message.contains("[E2001]"));
    assert!(message.contains("'zero'"));
    assert!(message.contains("V 1 zero 0"));
}

#[test]
fn test_error_message_for_vertex_out_of_range() {
    let text = "SURF\nV 0 0 0\nV 1 0 0\nF\nV 0 1 7\nE\nE\n";
    let err = parse_surf(text, "bad.srf").unwrap_err();
    println!("Error message: {}", err);

    assert!(matches!(err, Error::Reference(_)));
    let message = err.to_string();
    assert!(message.contains("line 6"));
    assert!(message.contains("vertex 7"));
}

#[test]
fn test_error_message_for_transparency_face() {
    let text = "SURF\nV 0 0 0\nF\nV 0\nE\nE\nZA 4 100\n";
    let err = parse_surf(text, "bad.srf").unwrap_err();
    assert!(matches!(err, Error::Reference(_)));
    assert!(err.to_string().contains("face 4"));
}

#[test]
fn test_error_message_for_bright_without_color() {
    let text = "SURF\nV 0 0 0\nF\nB\nV 0\nE\nE\n";
    let err = parse_surf(text, "bad.srf").unwrap_err();
    assert_eq!(err.line(), Some(4));
    assert!(err.to_string().contains("B without a preceding C"));
}

#[test]
fn test_error_message_for_unterminated_surface() {
    let text = "SURF\nV 0 0 0\nF\nV 0\n";
    let err = parse_surf(text, "bad.srf").unwrap_err();
    assert!(err.to_string().contains("missing E"));
}

#[test]
fn test_error_message_for_short_pck() {
    let text = "DYNAMODEL\nDNMVER 1\nPCK a.srf 9\nSURF\nV 0 0 0\nE\n";
    let err = parse_dnm(text).unwrap_err();
    println!("Error message: {}", err);
    assert!(err.to_string().contains("declares 9 lines"));
}

#[test]
fn test_error_message_for_unknown_child() {
    let text = "DYNAMODEL\nDNMVER 1\n\
                SRF \"0000\"\nFIL a.srf\nNCH 1\nCLD \"0042\"\nEND\nEND\n";
    let err = parse_dnm(text).unwrap_err();
    println!("Error message: {}", err);
    assert!(matches!(err, Error::Reference(_)));
    assert!(err.to_string().contains("0042"));
}

#[test]
fn test_error_message_for_child_count_mismatch() {
    let text = "DYNAMODEL\nDNMVER 1\n\
                SRF \"0000\"\nFIL a.srf\nNCH 2\nCLD \"0001\"\nEND\nEND\n";
    let err = parse_dnm(text).unwrap_err();
    assert!(err.to_string().contains("NCH 2"));
}

#[test]
fn test_error_message_for_missing_header() {
    let err = parse_dnm("PCK a.srf 2\nSURF\nE\n").unwrap_err();
    assert_eq!(err.line(), Some(1));
    assert!(err.to_string().contains("DYNAMODEL"));
}
