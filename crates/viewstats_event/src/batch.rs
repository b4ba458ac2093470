//! Ordered group of page views.

use crate::record::PageView;

/// An ordered group of page views accumulated between flushes.
///
/// # Invariants
///
/// - Insertion order is preserved; index 0 is the oldest view
/// - [`Batch::oldest`] is the oldest surviving capture time, which the
///   age-based flush trigger relies on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    views: Vec<PageView>,
}

impl Batch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty batch with room for `capacity` views.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            views: Vec::with_capacity(capacity),
        }
    }

    /// Appends a view at the tail.
    pub fn push(&mut self, view: PageView) {
        self.views.push(view);
    }

    /// Appends all views of `other` at the tail, preserving their order.
    pub fn extend_from(&mut self, other: Batch) {
        self.views.extend(other.views);
    }

    /// Places all views of `older` ahead of the current contents.
    ///
    /// Used when views recovered from disk must be delivered before the
    /// ones recorded since.
    pub fn prepend(&mut self, older: Batch) {
        if older.is_empty() {
            return;
        }
        let mut merged = older.views;
        merged.append(&mut self.views);
        self.views = merged;
    }

    /// Removes up to `count` views from the head and returns how many were
    /// removed.
    pub fn drop_oldest(&mut self, count: usize) -> usize {
        let count = count.min(self.views.len());
        self.views.drain(..count);
        count
    }

    /// Number of views in the batch.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns true if the batch holds no views.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// The oldest view still in the batch.
    #[must_use]
    pub fn oldest(&self) -> Option<&PageView> {
        self.views.first()
    }

    /// Iterates the views oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, PageView> {
        self.views.iter()
    }

    /// Returns the views as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[PageView] {
        &self.views
    }

    /// Consumes the batch and returns its views.
    #[must_use]
    pub fn into_vec(self) -> Vec<PageView> {
        self.views
    }
}

impl From<Vec<PageView>> for Batch {
    fn from(views: Vec<PageView>) -> Self {
        Self { views }
    }
}

impl FromIterator<PageView> for Batch {
    fn from_iter<I: IntoIterator<Item = PageView>>(iter: I) -> Self {
        Self {
            views: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Batch {
    type Item = PageView;
    type IntoIter = std::vec::IntoIter<PageView>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.into_iter()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a PageView;
    type IntoIter = std::slice::Iter<'a, PageView>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.iter()
    }
}
