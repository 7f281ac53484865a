use std::ops::Index;

use rapidhash::{HashMapExt, RapidHashMap};
use thiserror::Error;

use crate::{
    Symbol,
    typed_vec::{TypedVec, typed_vec_index},
};

typed_vec_index!(pub PatternId, u32);

/// A deduplicated, ordered set of non-empty patterns.
///
/// Ids are assigned in order of first appearance; a repeated pattern resolves
/// to the id of its first occurrence.
#[derive(Clone, Debug)]
pub struct PatternSet<S> {
    patterns: TypedVec<PatternId, Box<[S]>>,
    pattern_to_id: RapidHashMap<Box<[S]>, PatternId>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    #[error("the pattern at index {index} is empty")]
    EmptyPattern { index: usize },
}

impl<S: Symbol> PatternSet<S> {
    pub fn new<P: AsRef<[S]>, I: IntoIterator<Item = P>>(iter: I) -> Result<Self, BuildError> {
        let iter = iter.into_iter();
        let capacity = iter.size_hint().0;
        let mut set = Self {
            patterns: TypedVec::with_capacity(capacity),
            pattern_to_id: RapidHashMap::with_capacity(capacity),
        };
        for (index, pattern) in iter.enumerate() {
            let pattern = pattern.as_ref();
            if pattern.is_empty() {
                return Err(BuildError::EmptyPattern { index });
            }
            set.insert(pattern);
        }
        debug_assert_eq!(set.patterns.as_slice().len(), set.pattern_to_id.len());
        Ok(set)
    }

    fn insert(&mut self, pattern: &[S]) -> PatternId {
        if let Some(&id) = self.pattern_to_id.get(pattern) {
            return id;
        }
        let pattern: Box<[S]> = pattern.into();
        let id = self.patterns.push(pattern.clone());
        self.pattern_to_id.insert(pattern, id);
        id
    }

    pub fn find_pattern_id<P: AsRef<[S]>>(&self, pattern: P) -> Option<PatternId> {
        self.pattern_to_id.get(pattern.as_ref()).copied()
    }

    pub fn get_pattern<T: Into<PatternId>>(&self, id: T) -> Option<&[S]> {
        self.patterns.get(id.into()).map(AsRef::as_ref)
    }

    pub fn num_of_patterns(&self) -> PatternId {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.as_slice().is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (PatternId, &[S])> + ExactSizeIterator {
        self.patterns.enumerate().map(|(id, p)| (id, p.as_ref()))
    }
}

impl<S> Index<PatternId> for PatternSet<S> {
    type Output = [S];

    #[inline(always)]
    fn index(&self, index: PatternId) -> &Self::Output {
        &self.patterns.as_slice()[index.as_usize()]
    }
}

#[cfg(test)]
mod tests {
    use crate::{BuildError, PatternId, PatternSet};

    #[test]
    fn test_pattern_set() {
        let set = PatternSet::new([b"he" as &[_], b"she", b"hers", b"he"]).unwrap();

        assert_eq!(set.num_of_patterns().inner(), 3);
        assert_eq!(set.find_pattern_id(b"he"), Some(PatternId::new(0)));
        assert_eq!(set.find_pattern_id(b"hers"), Some(PatternId::new(2)));
        assert_eq!(set.find_pattern_id(b"his"), None);
        assert_eq!(&set[PatternId::new(1)], b"she");
        assert_eq!(set.get_pattern(2usize), Some(b"hers" as &[_]));
        assert!(set.get_pattern(3usize).is_none());
    }

    #[test]
    fn test_empty_pattern_is_rejected() {
        assert_eq!(
            PatternSet::new([b"a" as &[_], b"", b"b"]).unwrap_err(),
            BuildError::EmptyPattern { index: 1 },
        );
        assert!(PatternSet::<u8>::new(Vec::<Vec<u8>>::new()).unwrap().is_empty());
    }
}
