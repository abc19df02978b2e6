//! Scoring properties against the bundled artifacts in models_ixe/.
//!
//! Run with: cargo test --package ixepred-model --test scoring

use std::path::PathBuf;

use ixepred_model::patient::{AGE_BOUNDS, BMI_BOUNDS, DURATION_BOUNDS, PASI_BOUNDS, PRIOR_BIOLOGICS_BOUNDS};
use ixepred_model::{score_patient, FsArtifactSource, PatientInput, Sex, YesNo};

fn bundled_models() -> FsArtifactSource {
    FsArtifactSource::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models_ixe"))
}

#[test]
fn test_probabilities_in_unit_interval_across_bounds() {
    let source = bundled_models();
    let mut scored = 0;

    for pasi in [PASI_BOUNDS.min, PASI_BOUNDS.default, PASI_BOUNDS.max] {
        for age in [AGE_BOUNDS.min, AGE_BOUNDS.max] {
            for bmi in [BMI_BOUNDS.min, BMI_BOUNDS.max] {
                for sex in Sex::ALL {
                    for arthritis in YesNo::ALL {
                        for duration_years in [DURATION_BOUNDS.min, DURATION_BOUNDS.max] {
                            for prior_biologics in [PRIOR_BIOLOGICS_BOUNDS.min, PRIOR_BIOLOGICS_BOUNDS.max] {
                                let input = PatientInput {
                                    pasi, age, bmi, sex, arthritis, duration_years, prior_biologics,
                                    ..Default::default()
                                };
                                let p = score_patient(&source, &input, false).unwrap();
                                assert!((0.0..=1.0).contains(&p.prob75), "prob75 out of range for {input:?}");
                                assert!((0.0..=1.0).contains(&p.prob90), "prob90 out of range for {input:?}");
                                scored += 1;
                            }
                        }
                    }
                }
            }
        }
    }
    assert_eq!(scored, 3 * 2 * 2 * 2 * 2 * 2 * 2);
}

#[test]
fn test_repeated_scoring_is_deterministic() {
    let source = bundled_models();
    let input = PatientInput {
        pasi: 31.5,
        age: 63.0,
        bmi: 33.2,
        sex: Sex::Female,
        arthritis: YesNo::Yes,
        duration_years: 22.0,
        prior_biologics: 3.0,
        ..Default::default()
    };

    let first = score_patient(&source, &input, false).unwrap();
    for _ in 0..10 {
        assert_eq!(score_patient(&source, &input, false).unwrap(), first);
    }
}

#[test]
fn test_bundled_artifacts_align_strictly() {
    // Both bundled schemas are subsets of the patient record.
    let p = score_patient(&bundled_models(), &PatientInput::default(), true).unwrap();
    assert!(p.prob75 > 0.0 && p.prob90 > 0.0);
}

#[test]
fn test_more_prior_biologics_lowers_deep_response() {
    let source = bundled_models();
    let naive = score_patient(&source, &PatientInput::default(), false).unwrap();
    let experienced = score_patient(
        &source,
        &PatientInput { prior_biologics: 4.0, ..Default::default() },
        false,
    )
    .unwrap();
    assert!(experienced.prob90 < naive.prob90);
}
