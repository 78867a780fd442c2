// tests/artifacts_load.rs
//
// Startup artifact loading: shipped model, custom layouts, and the fatal
// paths (missing file, malformed JSON, inconsistent widths).

use std::fs;
use std::path::PathBuf;

use internship_fraud_detector::config::ArtifactsConfig;
use internship_fraud_detector::model::{
    write_artifacts, Classifier, DecisionTree, ModelArtifacts, RiskScorer, Scaler,
};
use internship_fraud_detector::{assess, extract, RawListing, Verdict};

/// Create a unique temporary directory in std::env::temp_dir().
fn unique_tmp_dir(tag: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    dir.push(format!("fraud_artifacts_{}_{}", tag, nanos));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn scam_listing() -> RawListing {
    RawListing::builder()
        .stipend(0.0)
        .duration("2 weeks")
        .location("Remote")
        .registration_fee("Yes")
        .email("intern@gmail.com")
        .website("")
        .description(
            "Urgent! Limited seats. Registration fee required. Certificate guaranteed, no interview.",
        )
        .build()
}

fn legit_listing() -> RawListing {
    RawListing::builder()
        .stipend(15000.0)
        .duration("3 months")
        .location("Bangalore")
        .registration_fee("No")
        .email("hr@company.com")
        .website("https://www.company.com")
        .description("Work on real projects. Interview process includes technical assessment.")
        .build()
}

#[test]
fn shipped_artifacts_load_and_separate_obvious_cases() {
    let m = ModelArtifacts::load(&ArtifactsConfig::in_dir("artifacts")).expect("shipped model");
    assert_eq!(m.feature_names().len(), 8);
    assert_eq!(m.kind(), "logistic_regression");

    let scam = assess(&scam_listing(), &m).unwrap();
    assert_eq!(scam.report.verdict, Verdict::Fraudulent);
    assert!(scam.report.probability_pct > 90.0);

    let legit = assess(&legit_listing(), &m).unwrap();
    assert_eq!(legit.report.verdict, Verdict::Legitimate);
    assert!(legit.report.probability_pct < 10.0);
}

#[test]
fn missing_file_is_fatal_with_path_in_message() {
    let dir = unique_tmp_dir("missing");
    let err = ModelArtifacts::load(&ArtifactsConfig::in_dir(&dir)).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("feature_names.json"), "{msg}");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_json_is_fatal() {
    let dir = unique_tmp_dir("malformed");
    fs::write(dir.join("feature_names.json"), r#"["is_remote"]"#).unwrap();
    fs::write(dir.join("feature_scaler.json"), r#"{"kind":"standard","mean":[0.0]"#).unwrap();
    fs::write(
        dir.join("fraud_detector.json"),
        r#"{"kind":"logistic_regression","coef":[1.0],"intercept":0.0}"#,
    )
    .unwrap();
    let err = ModelArtifacts::load(&ArtifactsConfig::in_dir(&dir)).unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse artifact"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn inconsistent_widths_are_fatal() {
    let dir = unique_tmp_dir("widths");
    fs::write(dir.join("feature_names.json"), r#"["is_remote","stipend_numeric"]"#).unwrap();
    fs::write(
        dir.join("feature_scaler.json"),
        r#"{"kind":"standard","mean":[0.0,0.0],"scale":[1.0,1.0]}"#,
    )
    .unwrap();
    fs::write(
        dir.join("fraud_detector.json"),
        r#"{"kind":"logistic_regression","coef":[1.0],"intercept":0.0}"#,
    )
    .unwrap();
    let err = ModelArtifacts::load(&ArtifactsConfig::in_dir(&dir)).unwrap_err();
    assert!(format!("{err:#}").contains("classifier width"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn subset_and_reordered_layout_round_trips_through_disk() {
    // model trained on 3 features in its own order, plus one the extractor does not know
    let names: Vec<String> = ["suspicious_keywords", "model_bias_column", "has_registration_fee"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let tree = DecisionTree {
        // root splits on has_registration_fee (index 2)
        children_left: vec![1, -1, -1],
        children_right: vec![2, -1, -1],
        feature: vec![2, -2, -2],
        threshold: vec![0.5, -2.0, -2.0],
        value: vec![[50.0, 50.0], [45.0, 5.0], [3.0, 47.0]],
    };
    let artifacts = ModelArtifacts::new(
        names.clone(),
        Scaler::MinMax {
            min: vec![0.0; 3],
            scale: vec![1.0; 3],
        },
        Classifier::RandomForest {
            n_features: 3,
            trees: vec![tree],
        },
    )
    .unwrap();

    let dir = unique_tmp_dir("forest");
    write_artifacts(&dir, &artifacts).unwrap();
    let loaded = ModelArtifacts::load(&ArtifactsConfig::in_dir(&dir)).unwrap();
    assert_eq!(loaded.feature_names(), names.as_slice());
    assert_eq!(loaded.kind(), "random_forest");

    let v = extract(&scam_listing(), loaded.feature_names());
    assert_eq!(v.values(), &[7.0, 0.0, 1.0]);

    let a = assess(&scam_listing(), &loaded).unwrap();
    assert_eq!(a.report.verdict, Verdict::Fraudulent);
    assert!((a.report.probability_pct - 94.0).abs() < 1e-9);

    let a = assess(&legit_listing(), &loaded).unwrap();
    assert_eq!(a.report.verdict, Verdict::Legitimate);
    assert!((a.report.probability_pct - 10.0).abs() < 1e-9);

    let _ = fs::remove_dir_all(&dir);
}
