use crate::Reflect;

/// A trait used to power struct-like operations via reflection.
///
/// Fields are addressed by the index stored in
/// [`MemberAccess::Field`](crate::info::MemberAccess::Field),
/// properties go through their accessors instead.
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, ops::Struct};
///
/// #[derive(Reflect, Default)]
/// struct Foo {
///     pub bar: u32,
/// }
///
/// let mut foo = Foo { bar: 1 };
/// *foo.field_at_mut(0).unwrap().downcast_mut::<u32>().unwrap() = 2;
/// assert_eq!(foo.bar, 2);
/// ```
pub trait Struct: Reflect {
    /// Returns a reference to the field at `index`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the field at `index`.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the number of reflected fields.
    fn field_len(&self) -> usize;
}
