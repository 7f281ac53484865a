use derive_more::Display;
use thiserror::Error;
use tinyvec::TinyVec;

use crate::{
    Automaton, BuildError, Match, NoTrace, PatternId, PatternSet, Symbol, Trace, TraceEvent,
    typed_vec::TypedVec,
};

/// `(segment index, offset)` pairs sharing one literal.
type SegmentRefs = TinyVec<[(usize, usize); 2]>;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum SpecPart {
    #[display("wildcard")]
    Wildcard,
    #[display("forbidden symbol")]
    Forbidden,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum WildcardError {
    #[error("the wildcard pattern is empty")]
    EmptyPattern,
    #[error("the {part} must be exactly one symbol, got {value:?}")]
    MalformedSpec { part: SpecPart, value: String },
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// The wildcard symbol and the optional symbol it must never stand for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WildcardSpec<S> {
    pub wildcard: S,
    pub forbidden: Option<S>,
}

impl<S> WildcardSpec<S> {
    pub fn new(wildcard: S) -> Self {
        Self {
            wildcard,
            forbidden: None,
        }
    }

    pub fn forbid(self, symbol: S) -> Self {
        Self {
            forbidden: Some(symbol),
            ..self
        }
    }
}

impl WildcardSpec<char> {
    /// Parses user-supplied wildcard and forbidden arguments, each of which
    /// must be a single code point.
    pub fn parse(wildcard: &str, forbidden: Option<&str>) -> Result<Self, WildcardError> {
        Ok(Self {
            wildcard: single(SpecPart::Wildcard, wildcard, wildcard.chars())?,
            forbidden: forbidden
                .map(|f| single(SpecPart::Forbidden, f, f.chars()))
                .transpose()?,
        })
    }
}

impl WildcardSpec<u8> {
    /// Like [`WildcardSpec::parse`], but each argument must be a single byte.
    pub fn parse_bytes(wildcard: &str, forbidden: Option<&str>) -> Result<Self, WildcardError> {
        Ok(Self {
            wildcard: single(SpecPart::Wildcard, wildcard, wildcard.bytes())?,
            forbidden: forbidden
                .map(|f| single(SpecPart::Forbidden, f, f.bytes()))
                .transpose()?,
        })
    }
}

fn single<S>(
    part: SpecPart,
    value: &str,
    mut iter: impl Iterator<Item = S>,
) -> Result<S, WildcardError> {
    match (iter.next(), iter.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(WildcardError::MalformedSpec {
            part,
            value: value.to_owned(),
        }),
    }
}

/// A maximal run of non-wildcard symbols and its offset within the pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment<S> {
    offset: usize,
    symbols: Box<[S]>,
}

impl<S> Segment<S> {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn symbols(&self) -> &[S] {
        &self.symbols
    }
}

/// A pattern in which the wildcard symbol matches any single symbol.
///
/// The literal segments are searched for with one automaton; a start position
/// matches when every segment is found at its offset from it.
#[derive(Clone, Debug)]
pub struct WildcardPattern<S> {
    pattern: Box<[S]>,
    wildcard: S,
    segments: Vec<Segment<S>>,
    /// Offsets of the wildcard symbols.
    holes: Vec<usize>,
    automaton: Automaton<S>,
    refs: TypedVec<PatternId, SegmentRefs>,
}

impl<S: Symbol> WildcardPattern<S> {
    pub fn new<P: AsRef<[S]>>(pattern: P, wildcard: S) -> Result<Self, WildcardError> {
        Self::new_with(pattern, wildcard, &mut NoTrace)
    }

    pub fn new_with<P: AsRef<[S]>>(
        pattern: P,
        wildcard: S,
        trace: &mut impl Trace<S>,
    ) -> Result<Self, WildcardError> {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            return Err(WildcardError::EmptyPattern);
        }

        let mut segments = Vec::new();
        let mut holes = Vec::new();
        let mut start = None;
        for (i, &symbol) in pattern.iter().enumerate() {
            if symbol == wildcard {
                holes.push(i);
                if let Some(offset) = start.take() {
                    segments.push(Segment {
                        offset,
                        symbols: pattern[offset..i].into(),
                    });
                }
            } else if start.is_none() {
                start = Some(i);
            }
        }
        if let Some(offset) = start {
            segments.push(Segment {
                offset,
                symbols: pattern[offset..].into(),
            });
        }

        for (index, segment) in segments.iter().enumerate() {
            trace.event(TraceEvent::Segment {
                index,
                offset: segment.offset,
                len: segment.symbols.len(),
            });
        }

        let set = PatternSet::new(segments.iter().map(|s| &s.symbols))?;
        let mut refs = TypedVec::new_with(SegmentRefs::new(), set.num_of_patterns());
        for (index, segment) in segments.iter().enumerate() {
            if let Some(id) = set.find_pattern_id(&segment.symbols) {
                refs[id].push((index, segment.offset));
            }
        }
        let automaton = Automaton::from_patterns_with(set, trace);

        Ok(Self {
            pattern: pattern.into(),
            wildcard,
            segments,
            holes,
            automaton,
            refs,
        })
    }

    pub fn as_slice(&self) -> &[S] {
        &self.pattern
    }

    pub fn wildcard(&self) -> S {
        self.wildcard
    }

    pub fn segments(&self) -> &[Segment<S>] {
        &self.segments
    }

    /// Ascending zero-based start positions of the pattern in `text`.
    ///
    /// With `forbidden` set, a start is dropped if any wildcard lines up with
    /// that symbol in the text.
    pub fn find_in<T: AsRef<[S]>>(&self, text: T, forbidden: Option<S>) -> Vec<usize> {
        self.find_in_with(text, forbidden, &mut NoTrace)
    }

    pub fn find_in_with<T: AsRef<[S]>>(
        &self,
        text: T,
        forbidden: Option<S>,
        trace: &mut impl Trace<S>,
    ) -> Vec<usize> {
        let text = text.as_ref();
        let Some(last_start) = text.len().checked_sub(self.pattern.len()) else {
            return Vec::new();
        };

        if self.segments.is_empty() {
            let mut result = Vec::new();
            for start in 0..=last_start {
                if self.is_allowed(text, start, forbidden, trace) {
                    trace.event(TraceEvent::Accepted { start });
                    result.push(start);
                }
            }
            return result;
        }

        let matches: Vec<Match> = self
            .automaton
            .find_iter_with(text.iter().copied(), &mut *trace)
            .collect();

        let mut counts = vec![0u32; last_start + 1];
        for m in matches {
            for &(index, offset) in &self.refs[m.pattern()] {
                let Some(start) = m.start().checked_sub(offset) else {
                    continue;
                };
                if start > last_start {
                    continue;
                }
                counts[start] += 1;
                trace.event(TraceEvent::SegmentHit {
                    index,
                    start,
                    count: counts[start],
                });
            }
        }

        let required = self.segments.len() as u32;
        let mut result = Vec::new();
        for (start, &count) in counts.iter().enumerate() {
            if count == required && self.is_allowed(text, start, forbidden, trace) {
                trace.event(TraceEvent::Accepted { start });
                result.push(start);
            }
        }
        result
    }

    fn is_allowed(
        &self,
        text: &[S],
        start: usize,
        forbidden: Option<S>,
        trace: &mut impl Trace<S>,
    ) -> bool {
        let Some(forbidden) = forbidden else {
            return true;
        };
        match self
            .holes
            .iter()
            .map(|&hole| start + hole)
            .find(|&at| text[at] == forbidden)
        {
            Some(at) => {
                trace.event(TraceEvent::Rejected { start, at });
                false
            }
            None => true,
        }
    }
}

/// Finds every zero-based start position of `pattern` in `text`, where the
/// wildcard of `spec` stands for any one symbol except the forbidden one.
pub fn find_pattern_with_wildcard<S, T, P>(
    text: T,
    pattern: P,
    spec: WildcardSpec<S>,
) -> Result<Vec<usize>, WildcardError>
where
    S: Symbol,
    T: AsRef<[S]>,
    P: AsRef<[S]>,
{
    find_pattern_with_wildcard_with(text, pattern, spec, &mut NoTrace)
}

pub fn find_pattern_with_wildcard_with<S, T, P>(
    text: T,
    pattern: P,
    spec: WildcardSpec<S>,
    trace: &mut impl Trace<S>,
) -> Result<Vec<usize>, WildcardError>
where
    S: Symbol,
    T: AsRef<[S]>,
    P: AsRef<[S]>,
{
    let pattern = WildcardPattern::new_with(pattern, spec.wildcard, trace)?;
    Ok(pattern.find_in_with(text, spec.forbidden, trace))
}
