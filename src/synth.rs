//! Value synthesis - literals and bound references for generated invocations
//!
//! Every random choice the generator makes goes through a [`Synthesizer`].
//! Seeding it fixes literal payloads; the shape of the generated document
//! never depends on the seed.

use crate::spec::{Literal, Source, ValueType};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const RESAMPLE_ATTEMPTS: usize = 16;

/// Value domain a literal is drawn from
///
/// `List` never appears in a schema. It exists so type-confusion cases can
/// pass a container where a scalar is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Integer,
    Float,
    String,
    Boolean,
    List,
}

impl From<ValueType> for Domain {
    fn from(t: ValueType) -> Self {
        match t {
            ValueType::Integer => Domain::Integer,
            ValueType::Float => Domain::Float,
            ValueType::String => Domain::String,
            ValueType::Boolean => Domain::Boolean,
        }
    }
}

impl Domain {
    /// Domains a value of `self` may be swapped for in a type-confusion case
    pub fn confusable(self) -> &'static [Domain] {
        match self {
            Domain::Integer => &[Domain::Float, Domain::String, Domain::List],
            Domain::Float => &[Domain::Integer, Domain::String, Domain::List],
            Domain::String => &[Domain::Integer, Domain::Float, Domain::List],
            Domain::List => &[Domain::Integer, Domain::Float, Domain::String],
            // Integers are often coerced to booleans, so they would not confuse
            Domain::Boolean => &[Domain::Float, Domain::String, Domain::List],
        }
    }
}

/// A named reference bound to a literal
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub name: String,
    pub value: Literal,
}

/// One synthesized invocation argument
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesizedArgument {
    Literal(Literal),
    Reference(Reference),
}

impl SynthesizedArgument {
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            SynthesizedArgument::Reference(r) => Some(r),
            SynthesizedArgument::Literal(_) => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        self.as_reference().is_some()
    }
}

impl From<Literal> for SynthesizedArgument {
    fn from(l: Literal) -> Self {
        SynthesizedArgument::Literal(l)
    }
}

impl From<Reference> for SynthesizedArgument {
    fn from(r: Reference) -> Self {
        SynthesizedArgument::Reference(r)
    }
}

/// Allocates `ref1`, `ref2`, ... names, unique until reset
#[derive(Debug, Clone, Default)]
pub struct ReferenceCounter {
    created: u64,
}

impl ReferenceCounter {
    pub fn next_name(&mut self) -> String {
        self.created += 1;
        format!("ref{}", self.created)
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn reset(&mut self) {
        self.created = 0;
    }
}

/// Random literal and reference source
pub struct Synthesizer {
    rng: StdRng,
    references: ReferenceCounter,
}

impl Synthesizer {
    /// Fixed seed when given, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            references: ReferenceCounter::default(),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            references: ReferenceCounter::default(),
        }
    }

    /// Restart reference numbering for a new document
    pub fn reset_references(&mut self) {
        self.references.reset();
    }

    pub fn references_created(&self) -> u64 {
        self.references.created()
    }

    /// A literal from `allowed` when non-empty, otherwise random in `domain`
    pub fn literal(&mut self, domain: Domain, allowed: &[Literal]) -> Literal {
        if let Some(value) = allowed.choose(&mut self.rng) {
            return value.clone();
        }

        match domain {
            Domain::Integer => Literal::Int(self.rng.gen_range(1..=9)),
            Domain::Float => Literal::Float(self.rng.gen_range(1.0..9.0)),
            Domain::String => {
                let len = self.rng.gen_range(1..=10);
                let word: String = (0..len)
                    .map(|_| LETTERS[self.rng.gen_range(0..LETTERS.len())] as char)
                    .collect();
                Literal::String(word)
            }
            Domain::Boolean => Literal::Bool(self.rng.gen_bool(0.5)),
            Domain::List => Literal::List(vec![
                Literal::Int(1),
                Literal::Int(23),
                Literal::Int(56),
                Literal::Int(7),
            ]),
        }
    }

    /// A random literal in `domain` that is not one of `excluded`
    ///
    /// Falls back to a value past the largest excluded one when resampling
    /// keeps colliding. `None` when `excluded` covers the whole domain.
    pub fn literal_outside(&mut self, domain: Domain, excluded: &[Literal]) -> Option<Literal> {
        for _ in 0..RESAMPLE_ATTEMPTS {
            let candidate = self.literal(domain, &[]);
            if !excluded.contains(&candidate) {
                return Some(candidate);
            }
        }

        let escape = match domain {
            Domain::Integer => {
                let max = excluded
                    .iter()
                    .filter_map(|l| match l {
                        Literal::Int(i) => Some(*i),
                        _ => None,
                    })
                    .max()
                    .unwrap_or(0);
                Literal::Int(max.checked_add(1)?)
            }
            Domain::Float => {
                let max = excluded
                    .iter()
                    .filter_map(|l| match l {
                        Literal::Float(f) => Some(*f),
                        Literal::Int(i) => Some(*i as f64),
                        _ => None,
                    })
                    .fold(0.0_f64, f64::max);
                Literal::Float(max + 1.0)
            }
            Domain::String => {
                let longest = excluded
                    .iter()
                    .filter_map(|l| match l {
                        Literal::String(s) => Some(s.as_str()),
                        _ => None,
                    })
                    .max_by_key(|s| s.len())
                    .unwrap_or("");
                Literal::String(format!("{}z", longest))
            }
            // both values or the single list payload
            Domain::Boolean => Literal::Bool(!excluded.contains(&Literal::Bool(true))),
            Domain::List => self.literal(Domain::List, &[]),
        };

        Some(escape).filter(|value| !excluded.contains(value))
    }

    /// A fresh reference bound to a synthesized literal
    pub fn reference(&mut self, domain: Domain, allowed: &[Literal]) -> Reference {
        let value = self.literal(domain, allowed);
        self.bind(value)
    }

    /// A fresh reference bound to `value`
    pub fn bind(&mut self, value: Literal) -> Reference {
        Reference {
            name: self.references.next_name(),
            value,
        }
    }

    /// Synthesize according to `source`; `Both` yields a literal iff `prefer_value`
    pub fn argument(
        &mut self,
        domain: Domain,
        source: Source,
        allowed: &[Literal],
        prefer_value: bool,
    ) -> SynthesizedArgument {
        match source {
            Source::Value => self.literal(domain, allowed).into(),
            Source::Reference => self.reference(domain, allowed).into(),
            Source::Both if prefer_value => self.literal(domain, allowed).into(),
            Source::Both => self.reference(domain, allowed).into(),
        }
    }

    /// Uniformly pick a domain other than the declared one
    pub fn change_type(&mut self, declared: ValueType) -> Domain {
        let candidates = Domain::from(declared).confusable();
        candidates[self.rng.gen_range(0..candidates.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Domain::Integer)]
    #[case(Domain::Float)]
    #[case(Domain::String)]
    #[case(Domain::Boolean)]
    fn test_literal_matches_domain(#[case] domain: Domain) {
        let mut synth = Synthesizer::seeded(7);
        for _ in 0..50 {
            match (domain, synth.literal(domain, &[])) {
                (Domain::Integer, Literal::Int(i)) => assert!((1..=9).contains(&i)),
                (Domain::Float, Literal::Float(f)) => assert!((1.0..9.0).contains(&f)),
                (Domain::String, Literal::String(s)) => {
                    assert!((1..=10).contains(&s.len()));
                    assert!(s.bytes().all(|b| b.is_ascii_lowercase()));
                }
                (Domain::Boolean, Literal::Bool(_)) => {}
                (d, l) => panic!("{:?} produced {:?}", d, l),
            }
        }
    }

    #[test]
    fn test_list_domain_is_fixed() {
        let mut synth = Synthesizer::seeded(1);
        assert_eq!(synth.literal(Domain::List, &[]).to_string(), "[1, 23, 56, 7]");
    }

    #[test]
    fn test_literal_prefers_allowed_values() {
        let mut synth = Synthesizer::seeded(3);
        let allowed = vec![Literal::from("sum"), Literal::from("sub")];
        for _ in 0..20 {
            assert!(allowed.contains(&synth.literal(Domain::Integer, &allowed)));
        }
    }

    #[test]
    fn test_literal_outside_avoids_every_allowed_value() {
        let mut synth = Synthesizer::seeded(11);
        let all_digits: Vec<Literal> = (1..=9).map(Literal::Int).collect();
        assert_eq!(
            synth.literal_outside(Domain::Integer, &all_digits),
            Some(Literal::Int(10))
        );

        let words = vec![Literal::from("a"), Literal::from("abc")];
        for _ in 0..20 {
            let outside = synth.literal_outside(Domain::String, &words).unwrap();
            assert!(!words.contains(&outside));
        }
    }

    #[test]
    fn test_literal_outside_covered_domain() {
        let mut synth = Synthesizer::seeded(3);
        let both = vec![Literal::Bool(true), Literal::Bool(false)];
        assert_eq!(synth.literal_outside(Domain::Boolean, &both), None);
        assert_eq!(
            synth.literal_outside(Domain::Boolean, &both[..1]),
            Some(Literal::Bool(false))
        );

        let list = synth.literal(Domain::List, &[]);
        assert_eq!(synth.literal_outside(Domain::List, &[list]), None);
        assert!(synth
            .literal_outside(Domain::Integer, &[Literal::Int(i64::MAX)])
            .is_some());
    }

    #[test]
    fn test_reference_names_are_sequential() {
        let mut synth = Synthesizer::seeded(5);
        assert_eq!(synth.reference(Domain::Integer, &[]).name, "ref1");
        assert_eq!(synth.bind(Literal::Int(0)).name, "ref2");
        assert_eq!(synth.references_created(), 2);

        synth.reset_references();
        assert_eq!(synth.bind(Literal::Int(0)).name, "ref1");
    }

    #[rstest]
    #[case(Source::Value, true, false)]
    #[case(Source::Value, false, false)]
    #[case(Source::Reference, true, true)]
    #[case(Source::Reference, false, true)]
    #[case(Source::Both, true, false)]
    #[case(Source::Both, false, true)]
    fn test_argument_source(
        #[case] source: Source,
        #[case] prefer_value: bool,
        #[case] expect_reference: bool,
    ) {
        let mut synth = Synthesizer::seeded(9);
        let arg = synth.argument(Domain::Integer, source, &[], prefer_value);
        assert_eq!(arg.is_reference(), expect_reference);
    }

    #[rstest]
    #[case(ValueType::Integer)]
    #[case(ValueType::Float)]
    #[case(ValueType::String)]
    #[case(ValueType::Boolean)]
    fn test_change_type_never_keeps_declared(#[case] declared: ValueType) {
        let mut synth = Synthesizer::seeded(13);
        for _ in 0..30 {
            let changed = synth.change_type(declared);
            assert_ne!(changed, Domain::from(declared));
            assert_eq!(Domain::from(declared).confusable().len(), 3);
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        let mut a = Synthesizer::seeded(42);
        let mut b = Synthesizer::seeded(42);
        for domain in [Domain::Integer, Domain::Float, Domain::String] {
            assert_eq!(a.literal(domain, &[]), b.literal(domain, &[]));
        }
    }
}
