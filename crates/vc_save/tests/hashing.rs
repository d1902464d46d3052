mod common;

use serde_json::json;
use tempfile::tempdir;
use vc_save::SaveError;
use vc_save::hash::HashAlgorithm;

use common::{Profile, system};

#[test]
fn deterministic() {
    let system = system();
    let mut profile = Profile::new("Ann", 7, 1234);

    let first = system.compute_hash(&mut profile, "MD5").unwrap();
    let second = system.compute_hash(&mut profile, "MD5").unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 32);
}

#[test]
fn ignores_members_that_are_not_persisted() {
    let system = system();
    let mut profile = Profile::new("Ann", 7, 1234);
    let hash = system.compute_hash(&mut profile, "MD5").unwrap();

    profile.session = "token".into();
    profile.set_scratch(99);

    assert_eq!(system.compute_hash(&mut profile, "MD5").unwrap(), hash);
}

#[test]
fn sensitive_to_every_persisted_member() {
    let system = system();
    let base = system
        .compute_hash(&mut Profile::new("Ann", 7, 1234), "MD5")
        .unwrap();

    for mut changed in [
        Profile::new("Bob", 7, 1234),
        Profile::new("Ann", 8, 1234),
        Profile::new("Ann", 7, 4321),
    ] {
        assert_ne!(system.compute_hash(&mut changed, "MD5").unwrap(), base);
    }
}

#[test]
fn save_with_hash_matches_compute_hash() {
    let dir = tempdir().unwrap();
    let system = system();
    let mut profile = Profile::new("Ann", 7, 1234);

    let saved = system
        .save_with_hash(dir.path().join("ann.json"), &mut profile, "sha256")
        .unwrap();
    let computed = system
        .compute_hash_with(&mut profile, HashAlgorithm::Sha256)
        .unwrap();

    assert_eq!(saved, computed);
    assert_eq!(saved.len(), 64);
}

#[test]
fn unknown_algorithm() {
    let dir = tempdir().unwrap();
    let system = system();
    let path = dir.path().join("never.json");

    let err = system
        .save_with_hash(&path, &mut Profile::default(), "whirlpool")
        .unwrap_err();
    assert!(matches!(err, SaveError::UnknownAlgorithm(name) if name == "whirlpool"));
    // Nothing is written when the algorithm is rejected.
    assert!(!path.exists());
}

#[test]
fn inclusion_rule_boundary() {
    let system = system();
    let mut profile = Profile::new("Ann", 7, 1234);
    profile.session = "token".into();
    profile.set_scratch(5);

    let text = system.to_text(&mut profile).unwrap();
    let node: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(node, json!({ "name": "Ann", "level": 7, "pin": 1234 }));

    let back = system.from_text::<Profile>(&text).unwrap().unwrap();
    assert_eq!(back.pin_code(), 1234);
    assert_eq!(back.session, "");
    assert_eq!(back.scratch(), 0);
}
