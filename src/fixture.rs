//! Output document - build-time and run-time fixtures
//!
//! ```yaml
//! build_test:
//!   - assets_definition: { ... }
//!     should_pass: false
//!     description: Test with fewer parameters for helper function.
//! run_test:
//!   - assets_definition: { ... }
//!     test_cases:
//!       - input: { ref1: 3 }
//!         should_pass: true
//!     description: Generate valid arguments
//! ```

use crate::error::Result;
use crate::render::AssetDefinition;
use crate::spec::Literal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Event fields keyed by reference name
pub type EventInput = BTreeMap<String, Literal>;

/// Fixture decided when the asset is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildFixture {
    pub assets_definition: AssetDefinition,
    pub should_pass: bool,
    pub description: String,
}

/// One event evaluated against a run-time fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: EventInput,
    pub should_pass: bool,
}

/// Fixture decided when events are evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFixture {
    pub assets_definition: AssetDefinition,
    pub test_cases: Vec<TestCase>,
    pub description: String,
}

/// Everything generated for one schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    #[serde(rename = "build_test", default)]
    pub build_time_cases: Vec<BuildFixture>,

    #[serde(rename = "run_test", default)]
    pub run_time_cases: Vec<RunFixture>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_build(&mut self, fixture: BuildFixture) {
        self.build_time_cases.push(fixture);
    }

    pub fn push_run(&mut self, fixture: RunFixture) {
        self.run_time_cases.push(fixture);
    }

    /// Total number of fixtures
    pub fn len(&self) -> usize {
        self.build_time_cases.len() + self.run_time_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.build_time_cases.clear();
        self.run_time_cases.clear();
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_norway::from_str(yaml)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Descriptions of all fixtures, build-time first
    pub fn descriptions(&self) -> Vec<&str> {
        self.build_time_cases
            .iter()
            .map(|f| f.description.as_str())
            .chain(self.run_time_cases.iter().map(|f| f.description.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OutputDocument {
        let mut doc = OutputDocument::new();
        doc.push_build(BuildFixture {
            assets_definition: AssetDefinition::helper_only("decoder/test/0", "eq()"),
            should_pass: false,
            description: "few".into(),
        });
        doc.push_run(RunFixture {
            assets_definition: AssetDefinition::with_event_parse(
                "decoder/test/0",
                "eq($eventJson.ref1, 1)",
            ),
            test_cases: vec![TestCase {
                input: [("ref1".to_string(), Literal::Int(2))].into_iter().collect(),
                should_pass: true,
            }],
            description: "valid".into(),
        });
        doc
    }

    #[test]
    fn test_top_level_keys() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"build_test".to_string()));
        assert!(keys.contains(&"run_test".to_string()));
        assert!(json["build_test"][0].get("test_cases").is_none());
        assert_eq!(json["run_test"][0]["test_cases"][0]["input"]["ref1"], 2);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let doc = sample();
        let back = OutputDocument::from_yaml(&doc.to_yaml().unwrap()).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_json_float_payload_reads_back_exactly() {
        let mut doc = sample();
        doc.run_time_cases[0].test_cases[0]
            .input
            .insert("ref2".into(), Literal::Float(7.3216277346662295));
        let back = OutputDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_len_and_clear() {
        let mut doc = sample();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.descriptions(), vec!["few", "valid"]);
        doc.clear();
        assert!(doc.is_empty());
    }
}
