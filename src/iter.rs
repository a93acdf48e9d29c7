use crate::SoaArray;
use core::{
    fmt::{self, Debug, Formatter},
    iter::FusedIterator,
};

/// Iterator over read-only views of the rows of a container.
///
/// This struct is created by the [`iter`] method.
///
/// [`iter`]: SoaArray::iter
pub struct Iter<'a, S>
where
    S: SoaArray,
{
    soa: &'a S,
    start: usize,
    end: usize,
}

impl<'a, S> Iter<'a, S>
where
    S: SoaArray,
{
    pub(crate) fn new(soa: &'a S) -> Self {
        Self {
            soa,
            start: 0,
            end: S::ROWS,
        }
    }

    /// The index of the next row yielded from the front.
    pub fn position(&self) -> usize {
        self.start
    }
}

impl<S> Clone for Iter<'_, S>
where
    S: SoaArray,
{
    fn clone(&self) -> Self {
        Self {
            soa: self.soa,
            start: self.start,
            end: self.end,
        }
    }
}

impl<S> Debug for Iter<'_, S>
where
    S: SoaArray,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("container", &S::NAME)
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl<'a, S> Iterator for Iter<'a, S>
where
    S: SoaArray,
{
    type Item = S::Ref<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            None
        } else {
            let out = self.soa.get(self.start);
            self.start += 1;
            out
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }

    fn count(self) -> usize {
        self.end - self.start
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.start = self.start.saturating_add(n).min(self.end);
        self.next()
    }
}

impl<S> DoubleEndedIterator for Iter<'_, S>
where
    S: SoaArray,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            None
        } else {
            self.end -= 1;
            self.soa.get(self.end)
        }
    }

    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        self.end = self.end.saturating_sub(n).max(self.start);
        self.next_back()
    }
}

impl<S> ExactSizeIterator for Iter<'_, S> where S: SoaArray {}

impl<S> FusedIterator for Iter<'_, S> where S: SoaArray {}
