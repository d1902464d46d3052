use core::any::TypeId;
use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock};

use log::warn;

use crate::hash::{HashMap, TypeIdMap, new_map};
use crate::info::{MemberInfo, StructInfo};
use crate::serde::InclusionRule;

// -----------------------------------------------------------------------------
// Schema

/// A member that takes part in persistence.
#[derive(Debug, Clone, Copy)]
pub struct IncludedMember {
    pub info: &'static MemberInfo,
    /// The key in the text form.
    pub name: &'static str,
}

/// The persisted members of one struct type, in declaration order.
#[derive(Debug)]
pub struct Schema {
    members: Box<[IncludedMember]>,
    by_name: HashMap<&'static str, usize>,
}

impl Schema {
    /// Applies `rule` to every accessible member of `info`.
    ///
    /// A member persisted under `hint_key` would clash with the type hint,
    /// it is dropped with a warning.
    pub fn build(info: &'static StructInfo, rule: &dyn InclusionRule, hint_key: &str) -> Self {
        let mut members = Vec::with_capacity(info.member_len());
        let mut by_name: HashMap<&'static str, usize> = new_map();

        for member in info.members() {
            if !member.is_accessible() {
                continue;
            }
            let decision = rule.decide(member);
            if !decision.include {
                continue;
            }
            if decision.name == hint_key {
                warn!(
                    "`{}` persists `{}` under the hint key `{hint_key}`, skipping it",
                    info.ty().path(),
                    member.name(),
                );
                continue;
            }
            if by_name.contains_key(decision.name) {
                warn!(
                    "`{}` persists two members as `{}`, keeping the first",
                    info.ty().path(),
                    decision.name,
                );
                continue;
            }
            by_name.insert(decision.name, members.len());
            members.push(IncludedMember {
                info: member,
                name: decision.name,
            });
        }

        Self {
            members: members.into_boxed_slice(),
            by_name,
        }
    }

    #[inline]
    pub fn members(&self) -> &[IncludedMember] {
        &self.members
    }

    /// Looks up a member by its key in the text form.
    #[inline]
    pub fn member(&self, name: &str) -> Option<&IncludedMember> {
        self.by_name.get(name).map(|&idx| &self.members[idx])
    }
}

// -----------------------------------------------------------------------------
// SchemaCache

/// Per-type memo of [`Schema`]s, safe for concurrent readers.
///
/// The cache does not know the rule or the hint key, a cache must only be
/// used with one of each.
#[derive(Default)]
pub struct SchemaCache {
    table: RwLock<TypeIdMap<Arc<Schema>>>,
}

impl SchemaCache {
    #[inline]
    pub const fn new() -> Self {
        Self {
            table: RwLock::new(new_map()),
        }
    }

    pub fn get_or_build(
        &self,
        info: &'static StructInfo,
        rule: &dyn InclusionRule,
        hint_key: &str,
    ) -> Arc<Schema> {
        let type_id: TypeId = info.ty().id();
        if let Some(schema) = self
            .table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return Arc::clone(schema);
        }

        // Built outside the lock, a racing thread may build the same schema.
        let schema = Arc::new(Schema::build(info, rule, hint_key));
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(table.entry(type_id).or_insert(schema))
    }

    pub fn clear(&self) {
        self.table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.table.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -----------------------------------------------------------------------------
// Tests
