use crate::Reflect;

/// A trait used to power string keyed map operations via reflection.
///
/// Entries are always reported sorted by key, so the text form of a
/// `HashMap` is as stable as the one of a `BTreeMap`.
pub trait Map: Reflect {
    /// Returns the entries sorted by key.
    fn entries(&self) -> Vec<(&str, &dyn Reflect)>;

    /// Returns the values in key order.
    fn values_mut(&mut self) -> Vec<&mut dyn Reflect>;

    /// Returns the number of entries.
    fn len(&self) -> usize;
}
