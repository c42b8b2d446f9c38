//! Invocations the engine must reject while building the asset

use super::{descriptions, GenerationContext};
use crate::combination::template;
use crate::spec::{Literal, Source};
use crate::synth::{Domain, SynthesizedArgument};

/// One fixture per argument count below the declared minimum
pub(super) fn arity_underflow(ctx: &mut GenerationContext<'_>) -> usize {
    let minimum = ctx.spec.minimum_arguments();
    for count in 0..minimum {
        let placeholders: Vec<SynthesizedArgument> =
            vec![SynthesizedArgument::Literal(Literal::Int(0)); count];
        ctx.emit_build(&placeholders, false, descriptions::FEWER_ARGUMENTS);
    }
    minimum
}

/// One call past the argument limit, cycling through the declared arguments
pub(super) fn arity_overflow(ctx: &mut GenerationContext<'_>) -> usize {
    let minimum = ctx.spec.minimum_arguments();
    if minimum == 0 {
        return 0;
    }

    let count = if ctx.spec.is_variadic() {
        ctx.max_variadic_arguments + 1
    } else {
        minimum + 1
    };

    let arguments: Vec<SynthesizedArgument> = (0..count)
        .map(|i| ctx.declared_argument(i % minimum, i % 2 == 0))
        .collect();
    ctx.emit_build(&arguments, false, descriptions::MORE_ARGUMENTS);
    1
}

/// For each single-source argument, the same call with that source flipped
///
/// The flipped argument drops its own allowed-value restriction; every other
/// argument keeps its restriction and a valid source.
pub(super) fn wrong_source(ctx: &mut GenerationContext<'_>) -> usize {
    let mut emitted = 0;

    for mutated in 0..ctx.argument_count() {
        let Some(flipped) = ctx.source(mutated).flipped() else {
            continue;
        };

        let arguments: Vec<SynthesizedArgument> = (0..ctx.argument_count())
            .map(|i| {
                let domain = ctx.declared_domain(i);
                if i == mutated {
                    ctx.synth.argument(domain, flipped, &[], true)
                } else {
                    let source = ctx.source(i);
                    let allowed = ctx.allowed(i);
                    ctx.synth.argument(domain, source, allowed, true)
                }
            })
            .collect();

        ctx.emit_build(&arguments, false, descriptions::WRONG_SOURCE);
        emitted += 1;
    }

    emitted
}

/// Every restricted argument receives a value outside its allowed set
///
/// Restricted arguments are inlined whenever their source admits a literal,
/// so the violation is visible without an event. An allowed set covering
/// the whole domain cannot be violated and counts as unrestricted.
pub(super) fn disallowed_value(ctx: &mut GenerationContext<'_>) -> usize {
    let total = ctx.argument_count();
    let outside: Vec<Option<Literal>> = (0..total)
        .map(|i| {
            let allowed = ctx.allowed(i);
            if allowed.is_empty() {
                return None;
            }
            let domain = ctx.declared_domain(i);
            ctx.synth.literal_outside(domain, allowed)
        })
        .collect();
    if outside.iter().all(Option::is_none) {
        return 0;
    }

    let arguments: Vec<SynthesizedArgument> = outside
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let domain = ctx.declared_domain(i);
            let source = ctx.source(i);
            match (value, source) {
                (None, _) => {
                    let allowed = ctx.allowed(i);
                    ctx.synth.argument(domain, source, allowed, i % 2 == 0)
                }
                (Some(value), Source::Value | Source::Both) => value.into(),
                (Some(value), Source::Reference) => ctx.synth.bind(value).into(),
            }
        })
        .collect();

    ctx.emit_build(&arguments, false, descriptions::DISALLOWED_VALUE);
    1
}

/// Each combination with a literal slot, literals swapped to another type
pub(super) fn wrong_value_type(ctx: &mut GenerationContext<'_>) -> usize {
    let mut emitted = 0;

    for combination in template(ctx.spec) {
        if !combination.iter().any(|slot| slot.is_value()) {
            continue;
        }

        let arguments: Vec<SynthesizedArgument> = combination
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let declared = ctx.spec.arguments[i].typ;
                let wrong = ctx.synth.change_type(declared);
                ctx.slot_argument(i, slot, wrong, Domain::from(declared))
            })
            .collect();

        ctx.emit_build(&arguments, false, descriptions::WRONG_VALUE_TYPE);
        emitted += 1;
    }

    emitted
}

/// Authored overrides inlined as literals, everything else a random literal
pub(super) fn special_case_literals(ctx: &mut GenerationContext<'_>) -> usize {
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
            Some(value) => value.clone().into(),
            None => {
                let domain = ctx.declared_domain(i);
                let allowed = ctx.allowed(i);
                ctx.synth.literal(domain, allowed).into()
            }
        })
        .collect();

    ctx.emit_build(&arguments, false, descriptions::SPECIAL_CASE);
    1
}
