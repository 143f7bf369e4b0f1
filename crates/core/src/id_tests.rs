// SPDX-License-Identifier: MIT

use super::*;

crate::define_id! {
    /// Test-only id type.
    pub struct SampleId;
}

#[test]
fn new_ids_are_unique_and_time_ordered() {
    let a = SampleId::new();
    let b = SampleId::new();
    assert_ne!(a, b);
    assert!(a.as_str() < b.as_str(), "uuidv7 ids should sort lexically in creation order");
}

#[test]
fn from_string_round_trips() {
    let id = SampleId::from_string("abc-123".to_string());
    assert_eq!(id.as_str(), "abc-123");
    assert_eq!(id, "abc-123");
}

#[test]
fn canonicalize_plugin_id_replaces_dashes_and_lowercases() {
    assert_eq!(canonicalize_plugin_id("My-Plugin-ID"), "my_plugin_id");
    assert_eq!(canonicalize_plugin_id("already_canonical"), "already_canonical");
    assert_eq!(canonicalize_plugin_id("Mixed-case_Name"), "mixed_case_name");
}

#[test]
fn serde_round_trip() {
    let id = SampleId::new();
    let json = serde_json::to_string(&id).unwrap();
    let back: SampleId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, back);
}
