//! Region to archive group resolution

use crate::archive::{Group, Index};
use crate::hash::djb2;
use crate::region::RegionId;

/// Which group wins when several share a region's name hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Last matching group in directory order
    #[default]
    LastMatch,
    /// First matching group in directory order
    FirstMatch,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RegionLocator {
    policy: MatchPolicy,
}

impl RegionLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Name hash of the group holding `region`'s terrain
    pub fn name_hash(region: RegionId) -> i32 {
        djb2(&region.archive_name())
    }

    /// Find `region`'s group in a map index directory
    pub fn locate<'a>(&self, index: &'a Index, region: RegionId) -> Option<&'a Group> {
        let hash = Self::name_hash(region);
        let mut matches = index.groups.iter().filter(|g| g.name_hash == hash);
        match self.policy {
            MatchPolicy::FirstMatch => matches.next(),
            MatchPolicy::LastMatch => matches.last(),
        }
    }
}
