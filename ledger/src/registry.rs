//! Address-keyed membership sets for admins and validators.

use phishblock_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Membership set for one role.
///
/// Absence means "not a member"; there is no separate `false` entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleRegistry {
    members: BTreeSet<Address>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant the role. Returns `false` if the address already held it.
    pub fn grant(&mut self, address: Address) -> bool {
        self.members.insert(address)
    }

    /// Revoke the role. Returns `false` if the address did not hold it.
    pub fn revoke(&mut self, address: &Address) -> bool {
        self.members.remove(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in address order.
    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }
}

impl FromIterator<Address> for RoleRegistry {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}
