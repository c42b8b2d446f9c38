//! Combination enumeration - the cross-product of argument sources
//!
//! Every argument contributes a dimension: `{Value, Reference}` when it
//! accepts both, a singleton otherwise. When the first argument restricts its
//! values, its dimension is replaced by its allowed literals.

use crate::spec::{HelperSpec, Literal, Source};

/// One position of a combination tuple
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Supply a literal
    Value,
    /// Supply a bound reference
    Reference,
    /// Supply this allowed value of the first argument
    Allowed(Literal),
}

impl Slot {
    pub fn is_value(&self) -> bool {
        matches!(self, Slot::Value)
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Slot::Reference)
    }
}

/// One tuple of the template; element `i` belongs to argument `i + 1`
pub type Combination = Vec<Slot>;

fn source_dimension(source: Source) -> Vec<Slot> {
    match source {
        Source::Value => vec![Slot::Value],
        Source::Reference => vec![Slot::Reference],
        Source::Both => vec![Slot::Value, Slot::Reference],
    }
}

/// Every tuple of the product, each exactly once
///
/// No dimensions yield a single empty tuple.
fn cartesian(dimensions: &[Vec<Slot>]) -> Vec<Combination> {
    if dimensions.iter().any(|d| d.is_empty()) {
        return Vec::new();
    }

    let mut results = Vec::new();
    let mut indices = vec![0; dimensions.len()];

    loop {
        results.push(
            indices
                .iter()
                .enumerate()
                .map(|(i, &idx)| dimensions[i][idx].clone())
                .collect(),
        );

        let mut carry = true;
        for i in (0..indices.len()).rev() {
            if carry {
                indices[i] += 1;
                if indices[i] >= dimensions[i].len() {
                    indices[i] = 0;
                } else {
                    carry = false;
                }
            }
        }

        if carry {
            break;
        }
    }

    results
}

/// Cross-product of per-argument source dimensions
pub fn raw_template(spec: &HelperSpec) -> Vec<Combination> {
    let dimensions: Vec<Vec<Slot>> = spec
        .arguments
        .iter()
        .map(|a| source_dimension(a.source))
        .collect();
    cartesian(&dimensions)
}

/// `allowed` crossed with the sources of arguments 2..N
///
/// Argument 1's source dimension is dropped: its slot carries the literal.
pub fn combination_template(spec: &HelperSpec, allowed: &[Literal]) -> Vec<Combination> {
    let mut dimensions: Vec<Vec<Slot>> =
        vec![allowed.iter().cloned().map(Slot::Allowed).collect()];
    dimensions.extend(
        spec.arguments
            .iter()
            .skip(1)
            .map(|a| source_dimension(a.source)),
    );
    cartesian(&dimensions)
}

/// The template used by the type-mutation and positive strategies
pub fn template(spec: &HelperSpec) -> Vec<Combination> {
    let allowed = spec.allowed_values(0);
    if allowed.is_empty() {
        raw_template(spec)
    } else {
        combination_template(spec, allowed)
    }
}
