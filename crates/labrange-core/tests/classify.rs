//! Classification against the embedded reference-range table.

use labrange_core::{ClassifierOptions, RangeClassifier};
use labrange_model::{Band, MissingTokens, RawValue};
use labrange_standards::RangeTable;

fn classifier() -> RangeClassifier {
    RangeClassifier::new(RangeTable::embedded().expect("embedded table"))
}

fn band(label: &str, value: f64) -> Band {
    classifier().classify(label, value).band
}

#[test]
fn rbc_boundaries() {
    assert_eq!(band("RBC (X10*12)", 3.8), Band::Low);
    assert_eq!(band("RBC (X10*12)", 4.3), Band::Normal);
    assert_eq!(band("RBC (X10*12)", 4.6), Band::High);
    assert_eq!(band("RBC (X10*12)", 3.7), Band::OutOfRange);
    assert_eq!(band("RBC (X10*12)", 4.9), Band::OutOfRange);
}

#[test]
fn numeric_strings_classify_like_numbers() {
    let classifier = classifier();
    assert_eq!(
        classifier.classify("RBC (X10*12)", "4.6"),
        classifier.classify("RBC (X10*12)", 4.6)
    );
}

#[test]
fn missing_sentinels_short_circuit() {
    let classifier = classifier();
    for label in ["RBC (X10*12)", "eGFR (Ml/min/1.73m2", "ZINC", ""] {
        assert_eq!(classifier.classify(label, "#N/A").band, Band::Missing);
        assert_eq!(classifier.classify(label, "n/a").band, Band::Missing);
        assert_eq!(classifier.classify(label, None::<f64>).band, Band::Missing);
    }
}

#[test]
fn empty_value_text_is_unknown() {
    let classifier = classifier();
    assert_eq!(classifier.classify("RBC (X10*12)", "").band, Band::Unknown);
    assert_eq!(classifier.classify("RBC (X10*12)", "   ").band, Band::Unknown);
}

#[test]
fn non_numeric_value_is_unknown() {
    let classification = classifier().classify("RBC (X10*12)", "not-a-number");
    assert_eq!(classification.band, Band::Unknown);
    assert_eq!(classification.biomarker, None);
}

#[test]
fn egfr_is_always_unknown() {
    let classifier = classifier();
    for value in [0.0, 45.0, 90.0, 200.0] {
        assert_eq!(
            classifier.classify("eGFR (Ml/min/1.73m2", value).band,
            Band::Unknown
        );
    }
    assert!(classifier.resolve_key("EGFR").is_none());
}

#[test]
fn unmatched_label_is_unknown() {
    assert_eq!(band("ZINC (umol/L)", 12.0), Band::Unknown);
    assert_eq!(band("   ", 12.0), Band::Unknown);
}

#[test]
fn verbose_labels_resolve_to_canonical_keys() {
    let classifier = classifier();
    let cholesterol = classifier.classify("CHOLESTEROL (TOTAL)mmol/L", 5.2);
    assert_eq!(cholesterol.biomarker.as_deref(), Some("CHOLESTEROL"));
    assert_eq!(cholesterol.band, Band::High);

    let alp = classifier.classify("ALKALINE PHOSPHATASE( IU/L)", 80.0);
    assert_eq!(alp.biomarker.as_deref(), Some("ALKALINE PHOSPHATASE"));
    assert_eq!(alp.band, Band::Normal);
}

#[test]
fn specific_keys_win_over_contained_keys() {
    let classifier = classifier();
    let key = |label: &str| classifier.resolve_key(label).map(|r| r.key().to_string());
    assert_eq!(key("MCHC (g/L)").as_deref(), Some("MCHC"));
    assert_eq!(key("MCH (pg)").as_deref(), Some("MCH"));
    assert_eq!(key("NON-HDL CHOLESTEROL").as_deref(), Some("NON-HDL"));
    assert_eq!(key("HDL CHOLESTEROL").as_deref(), Some("HDL"));
    assert_eq!(key("LDL CHOLESTEROL").as_deref(), Some("LDL"));
}

#[test]
fn bare_short_label_takes_first_key_containing_it() {
    // "NON-HDL" contains "HDL" and precedes it in the table.
    let classifier = classifier();
    assert_eq!(
        classifier.resolve_key("hdl").map(|r| r.key()),
        Some("NON-HDL")
    );
}

#[test]
fn trailing_space_changes_which_key_matches() {
    let classifier = classifier();
    let mch = classifier.classify("MCH ", 29.0);
    assert_eq!(mch.biomarker.as_deref(), Some("MCH"));
    assert_eq!(mch.band, Band::Normal);

    let hdl = classifier.classify("hdl ", 1.5);
    assert_eq!(hdl.biomarker.as_deref(), Some("HDL"));
    assert_eq!(hdl.band, Band::Normal);
}

#[test]
fn collapsed_thresholds_have_no_normal_band() {
    assert_eq!(band("TRIGLYCERIDES", 1.0), Band::Low);
    assert_eq!(band("TRIGLYCERIDES", 1.5), Band::High);
    assert_eq!(band("PSA (ug/L)", 2.5), Band::Low);
    assert_eq!(band("PSA (ug/L)", 4.1), Band::OutOfRange);
}

#[test]
fn classification_carries_band_color() {
    let classification = classifier().classify("RBC (X10*12)", 4.9);
    assert_eq!(classification.color.hex(), "#dc2626");
    assert_eq!(classifier().classify("RBC", "#N/A").color.hex(), "#6b7280");
}

#[test]
fn custom_missing_tokens() {
    let options = ClassifierOptions {
        missing_tokens: MissingTokens::new(["NOT DONE"]),
        ..ClassifierOptions::default()
    };
    let classifier = RangeClassifier::with_options(RangeTable::embedded().unwrap(), options);
    assert_eq!(classifier.classify("ALT", "not done").band, Band::Missing);
    assert_eq!(classifier.classify("ALT", "#N/A").band, Band::Unknown);
}

#[test]
fn classify_raw_skips_token_resolution() {
    let classifier = classifier();
    assert_eq!(
        classifier.classify_raw("ALT", &RawValue::Numeric(50.0)).band,
        Band::OutOfRange
    );
    assert_eq!(
        classifier
            .classify_raw("ALT", &RawValue::Unparseable("high".to_string()))
            .band,
        Band::Unknown
    );
}
