use proptest::prelude::*;

use textnorm::normalize::{normalize_bytes, normalize_opt, normalize_text};

#[test]
fn canonical_form_examples() {
    assert_eq!(normalize_text("São Paulo"), "sao paulo");
    assert_eq!(normalize_text("SAO   PAULO"), "sao paulo");
    assert_eq!(normalize_text("MATRIZ SC"), "matriz sc");
    assert_eq!(normalize_text("  EMPRESA  "), "empresa");
    assert_eq!(normalize_text("Rio de Janeiro - RJ"), "rio de janeiro - rj");
    assert_eq!(normalize_text("Açaí & Café"), "acai & cafe");
}

#[test]
fn absent_and_empty_inputs() {
    assert_eq!(normalize_opt(None), "");
    assert_eq!(normalize_opt(Some("")), "");
    assert_eq!(normalize_text(""), "");
}

#[test]
fn byte_input_never_fails() {
    assert_eq!(normalize_bytes(b"MATRIZ SC"), "matriz sc");
    // Invalid UTF-8 is repaired with replacement characters, not rejected.
    let broken = normalize_bytes(b"Curi\xfftiba");
    assert!(broken.starts_with("curi"), "{broken:?}");
    assert!(broken.ends_with("tiba"), "{broken:?}");
}

proptest! {
    #[test]
    fn normalize_is_idempotent(input in "\\PC{0,64}") {
        let once = normalize_text(&input);
        prop_assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn normalized_output_has_no_edge_or_double_spaces(input in "\\PC{0,64}") {
        let normalized = normalize_text(&input);
        prop_assert!(!normalized.starts_with(' '));
        prop_assert!(!normalized.ends_with(' '));
        prop_assert!(!normalized.contains("  "));
        prop_assert!(!normalized.chars().any(char::is_uppercase));
    }
}
