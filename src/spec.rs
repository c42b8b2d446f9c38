//! Helper signature types - the input data model
//!
//! A `HelperSpec` declares the signature of one rule-engine helper function:
//! its name, ordered arguments (type, accepted source, allowed values),
//! whether it is variadic, and authored special-case overrides.
//!
//! ## Example schema
//!
//! ```yaml
//! name: int_calculate
//! variadic: true
//! arguments:
//!   - id: 1
//!     type: string
//!     source: value
//!     allowed_values: [sum, sub, mul, div]
//!   - id: 2
//!     type: integer
//!     source: both
//!   - id: 3
//!     type: integer
//!     source: both
//! special_cases:
//!   - arguments:
//!       - 1: div
//!       - 3: 0
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A helper function signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelperSpec {
    /// Helper name as invoked in the DSL
    pub name: String,

    /// Ordered arguments; `id` matches the 1-based position
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,

    /// Accepts more arguments than declared
    #[serde(default)]
    pub variadic: bool,

    /// Authored argument overrides
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_cases: Vec<SpecialCaseGroup>,
}

/// One declared argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// 1-based position
    pub id: u32,

    /// Declared value type
    #[serde(rename = "type")]
    pub typ: ValueType,

    /// Accepted source
    pub source: Source,

    /// Restriction on accepted literal values (empty = unrestricted)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<Literal>,
}

/// Declared argument type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueType {
    Integer,
    Float,
    String,
    Boolean,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
        }
    }
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "integer" => Ok(ValueType::Integer),
            "float" => Ok(ValueType::Float),
            "string" => Ok(ValueType::String),
            "boolean" => Ok(ValueType::Boolean),
            other => Err(Error::UnsupportedType(other.to_string())),
        }
    }
}

impl TryFrom<String> for ValueType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ValueType> for String {
    fn from(t: ValueType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an argument's value may come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Source {
    /// Inline literal
    Value,
    /// `$eventJson.<field>` resolved at evaluation time
    Reference,
    /// Either of the above
    Both,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Value => "value",
            Source::Reference => "reference",
            Source::Both => "both",
        }
    }

    /// The opposite concrete source; `Both` has none
    pub fn flipped(self) -> Option<Source> {
        match self {
            Source::Value => Some(Source::Reference),
            Source::Reference => Some(Source::Value),
            Source::Both => None,
        }
    }
}

impl FromStr for Source {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "value" => Ok(Source::Value),
            "reference" => Ok(Source::Reference),
            "both" => Ok(Source::Both),
            other => Err(Error::UnsupportedSource(other.to_string())),
        }
    }
}

impl TryFrom<String> for Source {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Source> for String {
    fn from(s: Source) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A group of argument overrides
///
/// ```yaml
/// special_cases:
///   - arguments:
///       - 2: 1
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpecialCaseGroup {
    /// Argument id -> override literal
    #[serde(default)]
    pub arguments: Vec<BTreeMap<u32, Literal>>,
}

impl SpecialCaseGroup {
    /// All `(argument id, override)` pairs in authoring order
    pub fn pairs(&self) -> impl Iterator<Item = (u32, &Literal)> {
        self.arguments
            .iter()
            .flat_map(|pair| pair.iter().map(|(id, value)| (*id, value)))
    }
}

/// A literal value as it appears in schemas, invocations and inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Literal>),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(i) => write!(f, "{}", i),
            // plain decimal; a whole float keeps `.0` so it never reads as an integer
            Literal::Float(fl) if fl.is_finite() && fl.fract() == 0.0 => write!(f, "{}.0", fl),
            Literal::Float(fl) => write!(f, "{}", fl),
            Literal::String(s) => f.write_str(s),
            Literal::List(items) => {
                let strs: Vec<_> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", strs.join(", "))
            }
        }
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Literal::Int(i)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl HelperSpec {
    /// Parse and validate a schema from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let spec: HelperSpec =
            serde_norway::from_str(yaml).map_err(|e| Error::Schema(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Parse and validate a schema from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: HelperSpec =
            serde_json::from_str(json).map_err(|e| Error::Schema(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Serialize schema to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::Schema(e.to_string()))
    }

    /// Check structural invariants not expressible through serde
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Schema("helper name is required".into()));
        }

        if self.arguments.is_empty() && !self.variadic {
            return Err(Error::Schema(format!(
                "helper '{}' declares no arguments and is not variadic",
                self.name
            )));
        }

        for (position, argument) in self.arguments.iter().enumerate() {
            let expected = position as u32 + 1;
            if argument.id != expected {
                return Err(Error::Schema(format!(
                    "helper '{}': argument at position {} has id {}",
                    self.name, expected, argument.id
                )));
            }
        }

        for group in &self.special_cases {
            for (id, _) in group.pairs() {
                if id == 0 || id as usize > self.arguments.len() {
                    return Err(Error::Schema(format!(
                        "helper '{}': special case names unknown argument {}",
                        self.name, id
                    )));
                }
            }
        }

        Ok(())
    }

    /// Number of declared arguments
    pub fn minimum_arguments(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    pub fn types(&self) -> Vec<ValueType> {
        self.arguments.iter().map(|a| a.typ).collect()
    }

    pub fn sources(&self) -> Vec<Source> {
        self.arguments.iter().map(|a| a.source).collect()
    }

    /// Allowed values of the argument at 0-based `index` (empty if none)
    pub fn allowed_values(&self, index: usize) -> &[Literal] {
        self.arguments
            .get(index)
            .map(|a| a.allowed_values.as_slice())
            .unwrap_or(&[])
    }

    /// Override for the 1-based argument `id`; the last authored pair wins
    pub fn special_case(&self, id: u32) -> Option<&Literal> {
        self.special_cases
            .iter()
            .flat_map(|g| g.pairs())
            .filter(|(pair_id, _)| *pair_id == id)
            .map(|(_, value)| value)
            .last()
    }
}
