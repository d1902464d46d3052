use crate::Reflect;

/// A trait used to power list-like operations via reflection.
pub trait List: Reflect {
    /// Returns a reference to the element at `index`.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the element at `index`.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the list has no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
