//! Invocation rendering - DSL call strings and asset definitions
//!
//! A call renders as `name(arg0, arg1, ...)`. References render as
//! `$eventJson.<name>` and resolve against the event parsed by the first map
//! step of a two-step asset:
//!
//! ```yaml
//! name: decoder/test/0
//! normalize:
//!   - map:
//!       - eventJson: parse_json($event.original)
//!       - helper: eq($eventJson.ref1, 3)
//! ```

use crate::spec::Literal;
use crate::synth::{Reference, SynthesizedArgument};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Expression parsing the raw event payload
pub const PARSE_EVENT: &str = "parse_json($event.original)";
/// Prefix of a rendered reference argument
pub const REFERENCE_PREFIX: &str = "$eventJson.";

/// Render a single argument
pub fn render_argument(argument: &SynthesizedArgument) -> String {
    match argument {
        SynthesizedArgument::Literal(value) => value.to_string(),
        SynthesizedArgument::Reference(r) => format!("{}{}", REFERENCE_PREFIX, r.name),
    }
}

/// Render `name(arg0, arg1, ...)`
pub fn render_call(name: &str, arguments: &[SynthesizedArgument]) -> String {
    let rendered: Vec<String> = arguments.iter().map(render_argument).collect();
    format!("{}({})", name, rendered.join(", "))
}

/// A rendered call plus the references it mentions
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub call: String,
    pub references: Vec<Reference>,
}

impl Invocation {
    pub fn new(name: &str, arguments: &[SynthesizedArgument]) -> Self {
        Self {
            call: render_call(name, arguments),
            references: arguments
                .iter()
                .filter_map(|a| a.as_reference().cloned())
                .collect(),
        }
    }

    pub fn has_references(&self) -> bool {
        !self.references.is_empty()
    }

    /// Event fields binding every reference of the call
    pub fn bound_input(&self) -> BTreeMap<String, Literal> {
        self.references
            .iter()
            .map(|r| (r.name.clone(), r.value.clone()))
            .collect()
    }
}

/// Decoder asset wrapping one helper invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDefinition {
    pub name: String,
    pub normalize: Vec<NormalizeBlock>,
}

/// A `map` stage of the normalize list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizeBlock {
    pub map: Vec<MapStep>,
}

/// One single-key mapping step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapStep {
    ParseEvent {
        #[serde(rename = "eventJson")]
        event_json: String,
    },
    Helper {
        helper: String,
    },
}

impl AssetDefinition {
    /// Helper-only shape
    pub fn helper_only(asset_name: &str, call: &str) -> Self {
        Self::with_steps(
            asset_name,
            vec![MapStep::Helper {
                helper: call.to_string(),
            }],
        )
    }

    /// Parse-then-helper shape, required whenever references must resolve
    pub fn with_event_parse(asset_name: &str, call: &str) -> Self {
        Self::with_steps(
            asset_name,
            vec![
                MapStep::ParseEvent {
                    event_json: PARSE_EVENT.to_string(),
                },
                MapStep::Helper {
                    helper: call.to_string(),
                },
            ],
        )
    }

    fn with_steps(asset_name: &str, map: Vec<MapStep>) -> Self {
        Self {
            name: asset_name.to_string(),
            normalize: vec![NormalizeBlock { map }],
        }
    }

    /// The helper expression of this asset
    pub fn helper_call(&self) -> Option<&str> {
        self.normalize
            .iter()
            .flat_map(|block| block.map.iter())
            .find_map(|step| match step {
                MapStep::Helper { helper } => Some(helper.as_str()),
                MapStep::ParseEvent { .. } => None,
            })
    }

    /// Whether the first step parses the raw event
    pub fn parses_event(&self) -> bool {
        matches!(
            self.normalize.first().and_then(|block| block.map.first()),
            Some(MapStep::ParseEvent { event_json }) if event_json == PARSE_EVENT
        )
    }
}
