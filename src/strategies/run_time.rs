//! Invocations that build but must fail once evaluated against an event

use super::{descriptions, GenerationContext};
use crate::combination::template;
use crate::fixture::EventInput;
use crate::render::Invocation;
use crate::spec::Source;
use crate::synth::{Domain, SynthesizedArgument};

/// A valid call whose references are never bound
pub(super) fn dangling_reference(ctx: &mut GenerationContext<'_>) -> usize {
    let arguments: Vec<SynthesizedArgument> = (0..ctx.argument_count())
        .map(|i| ctx.declared_argument(i, false))
        .collect();

    if !arguments.iter().any(SynthesizedArgument::is_reference) {
        return 0;
    }

    ctx.emit_run(
        &arguments,
        EventInput::new(),
        false,
        descriptions::DANGLING_REFERENCE,
    );
    1
}

/// Authored overrides bound through the event when the argument takes references
pub(super) fn special_case_references(ctx: &mut GenerationContext<'_>) -> usize {
    let spec = ctx.spec;
    let total = ctx.argument_count();
    let absent = (0..total)
        .filter(|&i| spec.special_case(i as u32 + 1).is_none())
        .count();
    if absent == total {
        return 0;
    }

    let arguments: Vec<SynthesizedArgument> = (0..total)
        .map(|i| match spec.special_case(i as u32 + 1) {
            Some(value) if ctx.source(i) == Source::Value => value.clone().into(),
            Some(value) => ctx.synth.bind(value.clone()).into(),
            None => ctx.declared_argument(i, i % 2 == 0),
        })
        .collect();

    let input = Invocation::new(&ctx.spec.name, &arguments).bound_input();
    ctx.emit_run(&arguments, input, false, descriptions::SPECIAL_CASE);
    1
}

/// Each combination with a reference slot, references bound to another type
pub(super) fn wrong_reference_type(ctx: &mut GenerationContext<'_>) -> usize {
    let mut emitted = 0;

    for combination in template(ctx.spec) {
        if !combination.iter().any(|slot| slot.is_reference()) {
            continue;
        }

        let arguments: Vec<SynthesizedArgument> = combination
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let declared = ctx.spec.arguments[i].typ;
                let wrong = ctx.synth.change_type(declared);
                ctx.slot_argument(i, slot, Domain::from(declared), wrong)
            })
            .collect();

        let input = Invocation::new(&ctx.spec.name, &arguments).bound_input();
        ctx.emit_run(&arguments, input, false, descriptions::WRONG_REFERENCE_TYPE);
        emitted += 1;
    }

    emitted
}
