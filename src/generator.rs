//! Assembles the fixture document for one schema
//!
//! A [`Generator`] owns the synthesizer (and with it the reference counter)
//! and produces a fresh [`OutputDocument`] per schema, so nothing leaks from
//! one helper into the next.

use crate::config::GeneratorConfig;
use crate::fixture::OutputDocument;
use crate::logging::{LogSink, TracingSink};
use crate::spec::HelperSpec;
use crate::strategies::{GenerationContext, Strategy};
use crate::synth::Synthesizer;

/// Generate the fixture document for one helper with default settings
pub fn generate_fixtures(spec: &HelperSpec, seed: Option<u64>) -> OutputDocument {
    let config = GeneratorConfig {
        seed,
        ..Default::default()
    };
    Generator::new(&config).generate(spec)
}

/// Runs the strategies in order and collects their fixtures
pub struct Generator {
    synth: Synthesizer,
    asset_name: String,
    max_variadic_arguments: usize,
    log: Box<dyn LogSink>,
}

impl Generator {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self::with_sink(config, Box::new(TracingSink::new("generator")))
    }

    pub fn with_sink(config: &GeneratorConfig, log: Box<dyn LogSink>) -> Self {
        Self {
            synth: Synthesizer::new(config.seed),
            asset_name: config.asset_name.clone(),
            max_variadic_arguments: config.max_variadic_arguments,
            log,
        }
    }

    /// Replace the value source, e.g. with a seeded one
    pub fn with_synthesizer(mut self, synth: Synthesizer) -> Self {
        self.synth = synth;
        self
    }

    /// Sink this generator reports through
    pub fn log(&self) -> &dyn LogSink {
        self.log.as_ref()
    }

    /// Build the complete document for `spec`
    pub fn generate(&mut self, spec: &HelperSpec) -> OutputDocument {
        self.synth.reset_references();
        let mut document = OutputDocument::new();

        for strategy in Strategy::ALL {
            let emitted = {
                let mut ctx = GenerationContext {
                    spec,
                    synth: &mut self.synth,
                    document: &mut document,
                    asset_name: &self.asset_name,
                    max_variadic_arguments: self.max_variadic_arguments,
                };
                strategy.run(&mut ctx)
            };

            if emitted == 0 {
                self.log
                    .debug(&format!("{}: {} not applicable", spec.name, strategy.name()));
            } else {
                self.log.debug(&format!(
                    "{}: {} emitted {} fixture(s)",
                    spec.name,
                    strategy.name(),
                    emitted
                ));
            }
        }

        self.log.info(&format!(
            "{}: {} build-time, {} run-time fixtures, {} references",
            spec.name,
            document.build_time_cases.len(),
            document.run_time_cases.len(),
            self.synth.references_created()
        ));

        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{CaptureSink, Level};
    use crate::strategies::descriptions;

    const EQ: &str = r#"
name: eq
arguments:
  - id: 1
    type: integer
    source: both
  - id: 2
    type: integer
    source: both
"#;

    #[test]
    fn test_eq_document_shape() {
        let spec = HelperSpec::from_yaml(EQ).unwrap();
        let doc = generate_fixtures(&spec, Some(1));

        let count = |list: &[&str], d: &str| list.iter().filter(|x| **x == d).count();
        let build: Vec<&str> = doc
            .build_time_cases
            .iter()
            .map(|f| f.description.as_str())
            .collect();
        let run: Vec<&str> = doc
            .run_time_cases
            .iter()
            .map(|f| f.description.as_str())
            .collect();

        assert_eq!(count(&build, descriptions::FEWER_ARGUMENTS), 2);
        assert_eq!(count(&build, descriptions::MORE_ARGUMENTS), 1);
        assert_eq!(count(&build, descriptions::WRONG_SOURCE), 0);
        assert_eq!(count(&build, descriptions::DISALLOWED_VALUE), 0);
        assert_eq!(count(&build, descriptions::WRONG_VALUE_TYPE), 3);
        assert_eq!(count(&build, descriptions::SPECIAL_CASE), 0);
        assert_eq!(count(&build, descriptions::VALID), 1);

        assert_eq!(count(&run, descriptions::DANGLING_REFERENCE), 1);
        assert_eq!(count(&run, descriptions::WRONG_REFERENCE_TYPE), 3);
        assert_eq!(count(&run, descriptions::VALID), 3);
    }

    #[test]
    fn test_strategies_run_in_order() {
        let spec = HelperSpec::from_yaml(EQ).unwrap();
        let doc = generate_fixtures(&spec, Some(2));
        let build = doc.descriptions();
        assert_eq!(build[0], descriptions::FEWER_ARGUMENTS);
        assert_eq!(build[2], descriptions::MORE_ARGUMENTS);
        assert_eq!(doc.run_time_cases[0].description, descriptions::DANGLING_REFERENCE);
        assert_eq!(
            doc.run_time_cases.last().unwrap().description,
            descriptions::VALID
        );
    }

    fn reference_names(doc: &OutputDocument) -> Vec<String> {
        let calls = doc
            .build_time_cases
            .iter()
            .map(|f| &f.assets_definition)
            .chain(doc.run_time_cases.iter().map(|f| &f.assets_definition))
            .filter_map(|a| a.helper_call());
        let mut names = Vec::new();
        for call in calls {
            for part in call.split("$eventJson.").skip(1) {
                let end = part.find([',', ')']).unwrap_or(part.len());
                names.push(part[..end].to_string());
            }
        }
        names
    }

    #[test]
    fn test_reference_names_restart_per_document() {
        let spec = HelperSpec::from_yaml(EQ).unwrap();
        let mut generator = Generator::new(&GeneratorConfig::default());
        let first = reference_names(&generator.generate(&spec));
        let second = reference_names(&generator.generate(&spec));

        assert_eq!(first[0], "ref1");
        assert_eq!(first, second);

        let mut unique = first.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), first.len());
    }

    #[test]
    fn test_documents_do_not_accumulate() {
        let spec = HelperSpec::from_yaml(EQ).unwrap();
        let mut generator = Generator::new(&GeneratorConfig::default());
        let first = generator.generate(&spec).len();
        let second = generator.generate(&spec).len();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reports_through_sink() {
        let spec = HelperSpec::from_yaml(EQ).unwrap();
        let sink = CaptureSink::new();
        let mut generator =
            Generator::with_sink(&GeneratorConfig::default(), Box::new(sink.clone()));
        generator.generate(&spec);

        let info = sink.messages(Level::Info);
        assert_eq!(info.len(), 1);
        assert!(info[0].starts_with("eq: 7 build-time, 7 run-time"));
        assert!(sink
            .messages(Level::Debug)
            .iter()
            .any(|m| m == "eq: wrong_source not applicable"));
    }

    #[test]
    fn test_asset_name_from_config() {
        let spec = HelperSpec::from_yaml(EQ).unwrap();
        let config = GeneratorConfig {
            asset_name: "decoder/custom/1".into(),
            ..Default::default()
        };
        let doc = Generator::new(&config).generate(&spec);
        assert!(doc
            .build_time_cases
            .iter()
            .all(|f| f.assets_definition.name == "decoder/custom/1"));
    }
}
