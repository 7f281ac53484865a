use std::{
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use derive_more::Debug;

/// A vector addressed by a dedicated index newtype instead of `usize`.
#[derive(Debug)]
#[debug("{inner:?}")]
pub(crate) struct TypedVec<I, T> {
    inner: Vec<T>,
    _phantom: PhantomData<I>,
}

impl<I, T: Clone> Clone for TypedVec<I, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<I, T: PartialEq> PartialEq for TypedVec<I, T> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<I, T: Eq> Eq for TypedVec<I, T> {}

impl<I: TypedVecIndex, T> TypedVec<I, T> {
    #[inline(always)]
    pub fn push(&mut self, val: T) -> I {
        let len = self.len();
        self.inner.push(val);
        len
    }

    #[inline(always)]
    pub fn get(&self, id: I) -> Option<&T> {
        self.inner.get(id.into_usize())
    }

    #[inline(always)]
    pub fn len(&self) -> I {
        I::from_usize(self.inner.len())
    }

    pub fn enumerate(&self) -> impl DoubleEndedIterator<Item = (I, &T)> + ExactSizeIterator {
        self.inner
            .iter()
            .enumerate()
            .map(|(i, t)| (I::from_usize(i), t))
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = I> + ExactSizeIterator + 'static {
        (0..self.inner.len()).map(I::from_usize)
    }
}

impl<I: TypedVecIndex, T: Clone> TypedVec<I, T> {
    pub fn new_with(value: T, len: I) -> Self {
        vec![value; len.into_usize()].into()
    }
}

impl<I, T> TypedVec<I, T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Vec::with_capacity(capacity),
            _phantom: PhantomData,
        }
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        self.inner.as_ref()
    }

    #[inline(always)]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.inner.iter()
    }
}

impl<I, T> Default for TypedVec<I, T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<I: TypedVecIndex, T> Index<I> for TypedVec<I, T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: I) -> &Self::Output {
        self.inner.index(index.into_usize())
    }
}

impl<I: TypedVecIndex, T> IndexMut<I> for TypedVec<I, T> {
    #[inline(always)]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        self.inner.index_mut(index.into_usize())
    }
}

impl<I, T, C: Into<Vec<T>>> From<C> for TypedVec<I, T> {
    fn from(inner: C) -> Self {
        Self {
            inner: inner.into(),
            _phantom: PhantomData,
        }
    }
}

/// Allocates a vector with room for `capacity` items and `head` already in it.
pub(crate) fn vec_with_head<T>(head: T, capacity: usize) -> Vec<T> {
    let mut vec = Vec::with_capacity(capacity.max(1));
    vec.push(head);
    vec
}

pub(crate) trait TypedVecIndex: 'static + Copy + PartialEq + PartialOrd {
    fn into_usize(self) -> usize;
    fn from_usize(val: usize) -> Self;
}

macro_rules! typed_vec_index {
    ($vis:vis $name:ident, $inner:tt) => {
        #[derive(
            Copy,
            Clone,
            Default,
            Hash,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            ::derive_more::Debug,
            ::derive_more::Display,
            ::derive_more::Into,
            ::derive_more::From,
        )]
        #[debug("{}", _0)]
        $vis struct $name($inner);

        #[allow(dead_code)]
        impl $name {
            pub const ZERO: Self = Self($inner::MIN);
            pub const MAX: Self = Self($inner::MAX);

            #[inline(always)]
            pub const fn new(inner: $inner) -> Self {
                Self(inner)
            }

            #[inline(always)]
            pub const fn inner(self) -> $inner {
                self.0
            }

            #[inline(always)]
            pub const fn as_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl $crate::typed_vec::TypedVecIndex for $name {
            #[inline(always)]
            fn into_usize(self) -> usize {
                self.as_usize()
            }

            #[inline(always)]
            fn from_usize(val: usize) -> Self {
                Self(val.min(<$inner>::MAX as usize) as $inner)
            }
        }

        impl From<usize> for $name {
            #[inline(always)]
            fn from(val: usize) -> Self {
                <Self as $crate::typed_vec::TypedVecIndex>::from_usize(val)
            }
        }
    };
}

pub(crate) use typed_vec_index;
