//! Administrative roles and the rank table that orders them.
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Ranks assigned to each [`Role`], shared by all checks in the process.
static ROLE_RANKS: [(Role, Rank); 3] = [
    (Role::SubAdmin, Rank(1)),
    (Role::VenueAdmin, Rank(2)),
    (Role::SiteAdmin, Rank(3)),
];

/// Administrative roles that can be assigned to callers.
///
/// Roles are ordered by [`Rank`] and higher ranked roles are granted everything
/// lower ranked roles are granted.
/// The default role is the highest ranked one so that operations that do not
/// specify a minimum role are restricted as much as possible.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// Venue staff with access to day to day operations of their venue.
    SubAdmin,

    /// Administrator of a single venue.
    VenueAdmin,

    /// Administrator of the whole site, not restricted to any venue.
    #[default]
    SiteAdmin,
}

impl Role {
    /// All known roles, from lowest to highest rank.
    pub const ALL: [Role; 3] = [Role::SubAdmin, Role::VenueAdmin, Role::SiteAdmin];

    /// Name of the role as it appears in caller claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SubAdmin => "subAdmin",
            Role::VenueAdmin => "venueAdmin",
            Role::SiteAdmin => "siteAdmin",
        }
    }

    /// Rank of the role in the role hierarchy.
    pub fn rank(&self) -> Rank {
        ROLE_RANKS
            .iter()
            .find(|(role, _)| role == self)
            .map(|(_, rank)| *rank)
            .unwrap_or(Rank::UNRANKED)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| UnknownRole(value.to_string()))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Position of a role name in the role hierarchy.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Rank(u8);

impl Rank {
    /// Rank of role names missing from the rank table, lower than all known roles.
    pub const UNRANKED: Rank = Rank(0);

    /// Look up the rank of a role name as found in caller claims.
    ///
    /// Role names absent from the rank table yield [`Rank::UNRANKED`].
    pub fn of(role: &str) -> Rank {
        role.parse::<Role>()
            .map(|role| role.rank())
            .unwrap_or(Rank::UNRANKED)
    }

    /// Numeric value of the rank.
    pub fn value(&self) -> u8 {
        self.0
    }
}

/// The role name is not one of the known [`Role`]s.
#[derive(Debug, thiserror::Error)]
#[error("role '{0}' is not recognised")]
pub struct UnknownRole(pub String);
