use crate::info::{Marker, MemberInfo};

// -----------------------------------------------------------------------------
// Decision

/// The outcome of an [`InclusionRule`] for one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Whether the member takes part in persistence.
    pub include: bool,
    /// The key used in the text form.
    pub name: &'static str,
}

impl Decision {
    #[inline]
    pub const fn include(name: &'static str) -> Self {
        Self {
            include: true,
            name,
        }
    }

    #[inline]
    pub const fn exclude(name: &'static str) -> Self {
        Self {
            include: false,
            name,
        }
    }
}

// -----------------------------------------------------------------------------
// InclusionRule

/// Decides which members of a struct are persisted.
///
/// Inaccessible members, properties missing a getter or a setter, never
/// reach the rule.
///
/// Closures can be used directly:
///
/// ```
/// use vc_reflect::info::MemberInfo;
/// use vc_reflect::serde::{Decision, InclusionRule};
///
/// let upper = |member: &MemberInfo| Decision::include(member.name());
/// let member = MemberInfo::field::<u32>("hp", 0);
/// assert!(upper.decide(&member).include);
/// ```
pub trait InclusionRule: Send + Sync + 'static {
    fn decide(&self, member: &MemberInfo) -> Decision;
}

impl<F> InclusionRule for F
where
    F: Fn(&MemberInfo) -> Decision + Send + Sync + 'static,
{
    #[inline]
    fn decide(&self, member: &MemberInfo) -> Decision {
        self(member)
    }
}

#[inline]
fn serialized_name(member: &MemberInfo) -> &'static str {
    member.rename().unwrap_or(member.name())
}

/// Public members unless excluded, private members only when included.
///
/// The serialized name is the rename override if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRule;

impl InclusionRule for DefaultRule {
    fn decide(&self, member: &MemberInfo) -> Decision {
        let include = match member.marker() {
            Marker::Include => true,
            Marker::Exclude => false,
            Marker::Default => member.is_public(),
        };
        Decision {
            include,
            name: serialized_name(member),
        }
    }
}

/// Every public member, markers are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicOnlyRule;

impl InclusionRule for PublicOnlyRule {
    #[inline]
    fn decide(&self, member: &MemberInfo) -> Decision {
        Decision {
            include: member.is_public(),
            name: serialized_name(member),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{DefaultRule, InclusionRule, PublicOnlyRule};
    use crate::info::{Marker, MemberInfo, Visibility};

    fn member(visibility: Visibility, marker: Marker) -> MemberInfo {
        MemberInfo::field::<i32>("value", 0)
            .with_visibility(visibility)
            .with_marker(marker)
    }

    #[test]
    fn default_rule_table() {
        let cases = [
            (Visibility::Public, Marker::Default, true),
            (Visibility::Public, Marker::Include, true),
            (Visibility::Public, Marker::Exclude, false),
            (Visibility::Private, Marker::Default, false),
            (Visibility::Private, Marker::Include, true),
            (Visibility::Private, Marker::Exclude, false),
        ];
        for (visibility, marker, expected) in cases {
            let decision = DefaultRule.decide(&member(visibility, marker));
            assert_eq!(decision.include, expected, "{visibility:?} {marker:?}");
        }
    }

    #[test]
    fn public_only_ignores_markers() {
        assert!(PublicOnlyRule.decide(&member(Visibility::Public, Marker::Exclude)).include);
        assert!(!PublicOnlyRule.decide(&member(Visibility::Private, Marker::Include)).include);
    }

    #[test]
    fn rename_is_the_serialized_name() {
        let member = MemberInfo::field::<i32>("hit_points", 0).with_rename("hp");
        assert_eq!(DefaultRule.decide(&member).name, "hp");
        let plain = MemberInfo::field::<i32>("hit_points", 0);
        assert_eq!(DefaultRule.decide(&plain).name, "hit_points");
    }
}
