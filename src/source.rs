use std::sync::Arc;

/// A randomly indexable, synchronously available collection of items.
///
/// Valid indexes are `[0, len())`. The length may change between refreshes, but the engine
/// never observes it changing in the middle of a recycling pass because it only reads the
/// source while it holds it.
pub trait ItemSource {
    type Item;

    fn len(&self) -> usize;

    fn item(&self, index: usize) -> Option<&Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> ItemSource for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn item(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> ItemSource for Arc<[T]> {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn item(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}
