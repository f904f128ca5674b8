//! The opaque result container every query returns.

use crate::dyn_array::DynArray;

/// A list of digit strings produced by [`crate::PhoneForward::get`],
/// [`crate::PhoneForward::reverse`], or
/// [`crate::PhoneForward::get_reverse`]. Never absent: invalid input
/// yields an empty container rather than a missing one.
#[derive(Debug, Clone, Default)]
pub struct PhoneNumbers(DynArray);

impl PhoneNumbers {
    pub(crate) fn empty() -> Self {
        Self(DynArray::new())
    }

    pub(crate) fn single(s: String) -> Self {
        let mut arr = DynArray::new();
        arr.push_move(s);
        Self(arr)
    }

    pub(crate) fn from_dyn_array(arr: DynArray) -> Self {
        Self(arr)
    }

    /// Returns the `i`-th string, or `None` if `i >= len()`.
    pub fn get(&self, i: usize) -> Option<&str> {
        self.0.get(i)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a PhoneNumbers {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.as_slice().iter().map(String::as_str)
    }
}
