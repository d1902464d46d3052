use crate::hash::HashMap;
use crate::info::{MemberAccess, MemberInfo, Type, TypePath};

// -----------------------------------------------------------------------------
// StructInfo

/// Type information of a struct with named members.
///
/// Members keep declaration order, fields first and properties after them.
///
/// # Examples
///
/// ```
/// use vc_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Default)]
/// struct Player {
///     pub name: String,
///     #[reflect(rename = "hp")]
///     pub health: u32,
///     cache: u64,
/// }
///
/// let info = Player::type_info().as_struct().unwrap();
/// assert_eq!(info.member_len(), 3);
/// assert_eq!(info.member("health").unwrap().rename(), Some("hp"));
/// assert!(!info.member("cache").unwrap().is_public());
/// ```
#[derive(Debug)]
pub struct StructInfo {
    ty: Type,
    members: Box<[MemberInfo]>,
    member_indices: HashMap<&'static str, usize>,
    field_len: usize,
}

impl StructInfo {
    /// Creates a new [`StructInfo`].
    pub fn new<T: TypePath>(members: Vec<MemberInfo>) -> Self {
        let member_indices = members
            .iter()
            .enumerate()
            .map(|(index, member)| (member.name(), index))
            .collect();
        let field_len = members
            .iter()
            .filter(|member| matches!(member.access(), MemberAccess::Field(_)))
            .count();

        Self {
            ty: Type::of::<T>(),
            members: members.into_boxed_slice(),
            member_indices,
            field_len,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns all members in declaration order.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Returns the member with the given source name.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.member_indices
            .get(name)
            .map(|&index| &self.members[index])
    }

    #[inline]
    pub fn member_at(&self, index: usize) -> Option<&MemberInfo> {
        self.members.get(index)
    }

    #[inline]
    pub fn member_len(&self) -> usize {
        self.members.len()
    }

    /// Number of stored fields, properties excluded.
    #[inline]
    pub const fn field_len(&self) -> usize {
        self.field_len
    }
}
