//! Invocations that must succeed

use super::{descriptions, GenerationContext};
use crate::combination::template;
use crate::render::Invocation;
use crate::synth::{Domain, SynthesizedArgument};

/// One fixture per template combination with declared types
///
/// All-literal calls are verified at build time; any reference needs an
/// event binding it, so those become run-time fixtures.
pub(super) fn valid_arguments(ctx: &mut GenerationContext<'_>) -> usize {
    let mut emitted = 0;

    for combination in template(ctx.spec) {
        let arguments: Vec<SynthesizedArgument> = combination
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let declared = Domain::from(ctx.spec.arguments[i].typ);
                ctx.slot_argument(i, slot, declared, declared)
            })
            .collect();

        if arguments.iter().any(SynthesizedArgument::is_reference) {
            let input = Invocation::new(&ctx.spec.name, &arguments).bound_input();
            ctx.emit_run(&arguments, input, true, descriptions::VALID);
        } else {
            ctx.emit_build(&arguments, true, descriptions::VALID);
        }
        emitted += 1;
    }

    emitted
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::Strategy;
    use crate::render::REFERENCE_PREFIX;
    use crate::spec::Literal;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_arguments_split_by_reference_presence() {
        let (count, doc) = run_strategy(Strategy::ValidArguments, EQ);
        assert_eq!(count, 4);
        assert_eq!(doc.build_time_cases.len(), 1);
        assert_eq!(doc.run_time_cases.len(), 3);

        let build = &doc.build_time_cases[0];
        assert!(build.should_pass);
        assert!(!build.assets_definition.parses_event());

        for fixture in &doc.run_time_cases {
            assert!(fixture.assets_definition.parses_event());
            assert_eq!(fixture.test_cases.len(), 1);
            assert!(fixture.test_cases[0].should_pass);
            assert!(!fixture.test_cases[0].input.is_empty());
        }
    }

    #[test]
    fn test_valid_arguments_honor_allowed_values() {
        let (count, doc) = run_strategy(Strategy::ValidArguments, INT_CALCULATE);
        assert_eq!(count, 16);
        assert_eq!(doc.build_time_cases.len(), 4);
        assert_eq!(doc.run_time_cases.len(), 12);

        let mut operations: Vec<String> = build_calls(&doc)
            .iter()
            .map(|c| call_arguments(c)[0].clone())
            .collect();
        operations.sort();
        assert_eq!(operations, vec!["div", "mul", "sub", "sum"]);
    }

    #[test]
    fn test_allowed_value_of_reference_only_argument_is_bound() {
        let yaml = r#"
name: level
arguments:
  - id: 1
    type: string
    source: reference
    allowed_values: [low, high]
"#;
        let (count, doc) = run_strategy(Strategy::ValidArguments, yaml);
        assert_eq!(count, 2);
        assert!(doc.build_time_cases.is_empty());
        let mut bound: Vec<Literal> = doc
            .run_time_cases
            .iter()
            .map(|f| {
                let call = f.assets_definition.helper_call().unwrap();
                let name = call_arguments(call)[0]
                    .trim_start_matches(REFERENCE_PREFIX)
                    .to_string();
                f.test_cases[0].input[&name].clone()
            })
            .collect();
        bound.sort_by_key(|l| l.to_string());
        assert_eq!(bound, vec![Literal::from("high"), Literal::from("low")]);
    }
}
