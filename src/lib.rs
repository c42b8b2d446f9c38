// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # helper-testgen - fixtures for rule-engine helper functions
//!
//! Reads the signature of a helper function and emits the test fixtures
//! that exercise it: calls the engine must reject while building an asset,
//! calls that build but fail against an event, and calls that must work.
//!
//! ## Core Concept
//!
//! A helper signature lists, per argument, a value type, where the value
//! may come from (an inline literal, a reference into the event, or
//! either), an optional set of allowed values and optional special-case
//! overrides. Every generation strategy turns that signature into
//! complete fixtures:
//!
//! - **Arity**: fewer arguments than required, more than allowed
//! - **Sources**: literal where a reference is required and vice versa
//! - **Values**: outside the allowed set, of the wrong type, special cases
//! - **References**: never bound, bound to a value of the wrong type
//! - **Valid**: every combination of permitted sources
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use helper_testgen::{generate_fixtures, HelperSpec};
//!
//! let spec = HelperSpec::from_yaml(r#"
//!   name: eq
//!   arguments:
//!     - id: 1
//!       type: integer
//!       source: both
//!     - id: 2
//!       type: integer
//!       source: both
//! "#)?;
//!
//! let document = generate_fixtures(&spec, Some(42));
//! println!("{}", document.to_yaml()?);
//! ```
//!
//! ## Output Format
//!
//! ```yaml
//! build_test:
//!   - assets_definition:
//!       name: decoder/test/0
//!       normalize:
//!         - map:
//!             - helper: eq()
//!     should_pass: false
//!     description: Test with fewer parameters for helper function.
//! run_test:
//!   - assets_definition:
//!       name: decoder/test/0
//!       normalize:
//!         - map:
//!             - eventJson: parse_json($event.original)
//!             - helper: eq($eventJson.ref1, $eventJson.ref2)
//!     test_cases:
//!       - input: {}
//!         should_pass: false
//!     description: Generate arguments with references that do not exist
//! ```

pub mod combination;
pub mod config;
pub mod error;
pub mod fixture;
pub mod generator;
pub mod logging;
pub mod project;
pub mod render;
pub mod spec;
pub mod strategies;
pub mod synth;

// Re-exports
pub use combination::{combination_template, raw_template, template, Combination, Slot};
pub use config::{GeneratorConfig, CONFIG_FILE, DEFAULT_ASSET_NAME};
pub use error::{Error, Result};
pub use fixture::{BuildFixture, EventInput, OutputDocument, RunFixture, TestCase};
pub use generator::{generate_fixtures, Generator};
pub use logging::{init_tracing, CaptureSink, Level, LogSink, TracingSink};
pub use project::{
    list_schemas, load_schema, output_path, process_directory, process_file, write_document,
    FileReport, SchemaFormat,
};
pub use render::{render_call, AssetDefinition, Invocation};
pub use spec::{ArgumentSpec, HelperSpec, Literal, Source, SpecialCaseGroup, ValueType};
pub use strategies::{descriptions, GenerationContext, Strategy};
pub use synth::{Domain, Reference, ReferenceCounter, SynthesizedArgument, Synthesizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
