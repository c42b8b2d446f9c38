//! Generation strategies - turn a signature into fixtures
//!
//! Each strategy appends zero or more complete fixtures to the document:
//! - Build-time failures: too few / too many arguments, wrong source,
//!   disallowed value, wrong literal type, special-case literals
//! - Run-time failures: dangling references, special-case references,
//!   wrong reference type
//! - Successes: every combination of valid sources
//!
//! A strategy that finds its scenario inapplicable emits nothing.

mod build_time;
mod positive;
mod run_time;

use crate::combination::Slot;
use crate::fixture::{BuildFixture, EventInput, OutputDocument, RunFixture, TestCase};
use crate::render::{AssetDefinition, Invocation};
use crate::spec::{HelperSpec, Literal, Source};
use crate::synth::{Domain, SynthesizedArgument, Synthesizer};

/// Fixture descriptions, one per scenario
pub mod descriptions {
    pub const FEWER_ARGUMENTS: &str = "Test with fewer parameters for helper function.";
    pub const MORE_ARGUMENTS: &str = "Generate more arguments than the maximum allowed";
    pub const WRONG_SOURCE: &str = "Generate sources other than those allowed";
    pub const DISALLOWED_VALUE: &str = "Generate values different from those allowed";
    pub const WRONG_VALUE_TYPE: &str =
        "Generate types other than those allowed for the source 'value'";
    pub const SPECIAL_CASE: &str = "Generate special arguments";
    pub const DANGLING_REFERENCE: &str = "Generate arguments with references that do not exist";
    pub const WRONG_REFERENCE_TYPE: &str =
        "Generate types other than those allowed for the source 'reference'";
    pub const VALID: &str = "Generate valid arguments";
}

/// The strategies in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    ArityUnderflow,
    ArityOverflow,
    WrongSource,
    DisallowedValue,
    WrongValueType,
    SpecialCaseLiterals,
    DanglingReference,
    SpecialCaseReferences,
    WrongReferenceType,
    ValidArguments,
}

impl Strategy {
    pub const ALL: [Strategy; 10] = [
        Strategy::ArityUnderflow,
        Strategy::ArityOverflow,
        Strategy::WrongSource,
        Strategy::DisallowedValue,
        Strategy::WrongValueType,
        Strategy::SpecialCaseLiterals,
        Strategy::DanglingReference,
        Strategy::SpecialCaseReferences,
        Strategy::WrongReferenceType,
        Strategy::ValidArguments,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::ArityUnderflow => "arity_underflow",
            Strategy::ArityOverflow => "arity_overflow",
            Strategy::WrongSource => "wrong_source",
            Strategy::DisallowedValue => "disallowed_value",
            Strategy::WrongValueType => "wrong_value_type",
            Strategy::SpecialCaseLiterals => "special_case_literals",
            Strategy::DanglingReference => "dangling_reference",
            Strategy::SpecialCaseReferences => "special_case_references",
            Strategy::WrongReferenceType => "wrong_reference_type",
            Strategy::ValidArguments => "valid_arguments",
        }
    }

    /// Run against `ctx`, returning the number of fixtures appended
    pub fn run(self, ctx: &mut GenerationContext<'_>) -> usize {
        match self {
            Strategy::ArityUnderflow => build_time::arity_underflow(ctx),
            Strategy::ArityOverflow => build_time::arity_overflow(ctx),
            Strategy::WrongSource => build_time::wrong_source(ctx),
            Strategy::DisallowedValue => build_time::disallowed_value(ctx),
            Strategy::WrongValueType => build_time::wrong_value_type(ctx),
            Strategy::SpecialCaseLiterals => build_time::special_case_literals(ctx),
            Strategy::DanglingReference => run_time::dangling_reference(ctx),
            Strategy::SpecialCaseReferences => run_time::special_case_references(ctx),
            Strategy::WrongReferenceType => run_time::wrong_reference_type(ctx),
            Strategy::ValidArguments => positive::valid_arguments(ctx),
        }
    }
}

/// Everything a strategy reads and writes while processing one schema
pub struct GenerationContext<'a> {
    pub spec: &'a HelperSpec,
    pub synth: &'a mut Synthesizer,
    pub document: &'a mut OutputDocument,
    pub asset_name: &'a str,
    pub max_variadic_arguments: usize,
}

impl<'a> GenerationContext<'a> {
    fn argument_count(&self) -> usize {
        self.spec.arguments.len()
    }

    fn declared_domain(&self, index: usize) -> Domain {
        Domain::from(self.spec.arguments[index].typ)
    }

    fn source(&self, index: usize) -> Source {
        self.spec.arguments[index].source
    }

    fn allowed(&self, index: usize) -> &'a [Literal] {
        let spec: &'a HelperSpec = self.spec;
        spec.allowed_values(index)
    }

    /// Synthesize the argument at `index` from its declared signature
    fn declared_argument(&mut self, index: usize, prefer_value: bool) -> SynthesizedArgument {
        let domain = self.declared_domain(index);
        let source = self.source(index);
        let allowed = self.allowed(index);
        self.synth.argument(domain, source, allowed, prefer_value)
    }

    /// An allowed value of the first argument, bound when it only takes references
    fn allowed_argument(&mut self, index: usize, value: &Literal) -> SynthesizedArgument {
        if self.source(index) == Source::Reference {
            self.synth.bind(value.clone()).into()
        } else {
            value.clone().into()
        }
    }

    /// Synthesize a template slot
    ///
    /// `Value` slots draw from `value_domain`, `Reference` slots from
    /// `reference_domain`; a slot keeps the argument's allowed values only
    /// while its domain is the declared one.
    fn slot_argument(
        &mut self,
        index: usize,
        slot: &Slot,
        value_domain: Domain,
        reference_domain: Domain,
    ) -> SynthesizedArgument {
        let declared = self.declared_domain(index);
        let allowed = self.allowed(index);
        match slot {
            Slot::Value => {
                let allowed = if value_domain == declared { allowed } else { &[] };
                self.synth.literal(value_domain, allowed).into()
            }
            Slot::Reference => {
                let allowed = if reference_domain == declared { allowed } else { &[] };
                self.synth.reference(reference_domain, allowed).into()
            }
            Slot::Allowed(value) => self.allowed_argument(index, value),
        }
    }

    /// Append a build-time fixture
    fn emit_build(
        &mut self,
        arguments: &[SynthesizedArgument],
        should_pass: bool,
        description: &str,
    ) {
        let invocation = Invocation::new(&self.spec.name, arguments);
        let assets_definition = if invocation.has_references() {
            AssetDefinition::with_event_parse(self.asset_name, &invocation.call)
        } else {
            AssetDefinition::helper_only(self.asset_name, &invocation.call)
        };
        self.document.push_build(BuildFixture {
            assets_definition,
            should_pass,
            description: description.to_string(),
        });
    }

    /// Append a run-time fixture with a single test case
    fn emit_run(
        &mut self,
        arguments: &[SynthesizedArgument],
        input: EventInput,
        should_pass: bool,
        description: &str,
    ) {
        let invocation = Invocation::new(&self.spec.name, arguments);
        self.document.push_run(RunFixture {
            assets_definition: AssetDefinition::with_event_parse(
                self.asset_name,
                &invocation.call,
            ),
            test_cases: vec![TestCase { input, should_pass }],
            description: description.to_string(),
        });
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::DEFAULT_ASSET_NAME;

    /// Run one strategy on a fresh document with a fixed seed
    pub fn run_strategy(strategy: Strategy, yaml: &str) -> (usize, OutputDocument) {
        let spec = HelperSpec::from_yaml(yaml).unwrap();
        let mut synth = Synthesizer::seeded(17);
        let mut document = OutputDocument::new();
        let count = {
            let mut ctx = GenerationContext {
                spec: &spec,
                synth: &mut synth,
                document: &mut document,
                asset_name: DEFAULT_ASSET_NAME,
                max_variadic_arguments: 40,
            };
            strategy.run(&mut ctx)
        };
        (count, document)
    }

    /// Helper expressions of every build-time fixture
    pub fn build_calls(document: &OutputDocument) -> Vec<String> {
        document
            .build_time_cases
            .iter()
            .filter_map(|f| f.assets_definition.helper_call().map(String::from))
            .collect()
    }

    /// Helper expressions of every run-time fixture
    pub fn run_calls(document: &OutputDocument) -> Vec<String> {
        document
            .run_time_cases
            .iter()
            .filter_map(|f| f.assets_definition.helper_call().map(String::from))
            .collect()
    }

    /// Top-level arguments of a rendered call
    pub fn call_arguments(call: &str) -> Vec<String> {
        let open = call.find('(').unwrap();
        let inner = &call[open + 1..call.len() - 1];
        if inner.is_empty() {
            return Vec::new();
        }
        let mut arguments = Vec::new();
        let mut depth = 0;
        let mut current = String::new();
        for c in inner.chars() {
            match c {
                '[' => depth += 1,
                ']' => depth -= 1,
                ',' if depth == 0 => {
                    arguments.push(current.trim().to_string());
                    current.clear();
                    continue;
                }
                _ => {}
            }
            current.push(c);
        }
        arguments.push(current.trim().to_string());
        arguments
    }

    pub const EQ: &str = r#"
name: eq
arguments:
  - id: 1
    type: integer
    source: both
  - id: 2
    type: integer
    source: both
"#;

    pub const INT_CALCULATE: &str = r#"
name: int_calculate
variadic: true
arguments:
  - id: 1
    type: string
    source: value
    allowed_values: [sum, sub, mul, div]
  - id: 2
    type: integer
    source: both
  - id: 3
    type: integer
    source: both
special_cases:
  - arguments:
      - 1: div
      - 3: 0
"#;

    pub const STARTS_WITH: &str = r#"
name: starts_with
arguments:
  - id: 1
    type: string
    source: reference
  - id: 2
    type: string
    source: value
"#;
}
