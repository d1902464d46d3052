use crate::Reflect;
use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// Visibility & Marker

/// Declared visibility of a member.
///
/// Only `pub` counts as public, `pub(crate)` and friends are private.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

/// Explicit serialization marker of a member.
///
/// Written as `#[reflect(include)]` or `#[reflect(exclude)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Marker {
    #[default]
    Default,
    Include,
    Exclude,
}

// -----------------------------------------------------------------------------
// MemberAccess

/// Reads a property, returning `None` if `this` is not the owner type.
pub type PropertyGetter = fn(this: &dyn Reflect) -> Option<Box<dyn Reflect>>;

/// Writes a property, giving the value back on a type mismatch.
pub type PropertySetter =
    fn(this: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

/// How a member is reached on an instance.
#[derive(Debug, Clone, Copy)]
pub enum MemberAccess {
    /// A stored field, the index is the position in [`Struct::field_at`](crate::ops::Struct::field_at).
    Field(usize),
    /// A value computed by accessor functions.
    Property {
        get: Option<PropertyGetter>,
        set: Option<PropertySetter>,
    },
}

// -----------------------------------------------------------------------------
// MemberInfo

/// Descriptor of a single struct member.
///
/// Usually generated by [`#[derive(Reflect)]`](crate::derive::Reflect),
/// field attributes map onto the builder methods:
///
/// | attribute                  | method                 |
/// |----------------------------|------------------------|
/// | `#[reflect(include)]`      | [`with_marker`]        |
/// | `#[reflect(exclude)]`      | [`with_marker`]        |
/// | `#[reflect(rename = "x")]` | [`with_rename`]        |
///
/// [`with_marker`]: MemberInfo::with_marker
/// [`with_rename`]: MemberInfo::with_rename
#[derive(Debug, Clone)]
pub struct MemberInfo {
    name: &'static str,
    rename: Option<&'static str>,
    visibility: Visibility,
    marker: Marker,
    access: MemberAccess,
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
}

impl MemberInfo {
    /// Creates a public, unmarked field descriptor.
    #[inline]
    pub fn field<T: Typed>(name: &'static str, index: usize) -> Self {
        Self::new::<T>(name, MemberAccess::Field(index))
    }

    /// Creates a public, unmarked property descriptor.
    #[inline]
    pub fn property<T: Typed>(
        name: &'static str,
        get: Option<PropertyGetter>,
        set: Option<PropertySetter>,
    ) -> Self {
        Self::new::<T>(name, MemberAccess::Property { get, set })
    }

    fn new<T: Typed>(name: &'static str, access: MemberAccess) -> Self {
        Self {
            name,
            rename: None,
            visibility: Visibility::Public,
            marker: Marker::Default,
            access,
            ty: Type::of::<T>(),
            type_info: T::type_info,
        }
    }

    #[inline]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[inline]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    #[inline]
    pub fn with_rename(mut self, rename: &'static str) -> Self {
        self.rename = Some(rename);
        self
    }

    /// The identifier in source code.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The optional serialized-name override.
    #[inline]
    pub const fn rename(&self) -> Option<&'static str> {
        self.rename
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub const fn is_public(&self) -> bool {
        matches!(self.visibility, Visibility::Public)
    }

    #[inline]
    pub const fn marker(&self) -> Marker {
        self.marker
    }

    #[inline]
    pub const fn access(&self) -> MemberAccess {
        self.access
    }

    /// The declared type of the member.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// The [`TypeInfo`] of the declared type.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Fields are always reachable, properties need both accessors.
    #[inline]
    pub const fn is_accessible(&self) -> bool {
        match self.access {
            MemberAccess::Field(_) => true,
            MemberAccess::Property { get, set } => get.is_some() && set.is_some(),
        }
    }
}

