// SPDX-License-Identifier: MIT

//! Role definitions and the role policy table.
//!
//! A user holds a set of roles. Each role may own a group of fields on the
//! user record; the policy table below says which fields belong to which
//! role so that removing a role can strip exactly what it owned.

use serde::{Deserialize, Serialize};

use crate::models::user::{DominantHand, PlayerHistoryEntry, TournamentEntry, User};

/// A named capability a user can hold. Serialized exactly as stored in
/// legacy records (`"Super Admin"` contains a space).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    User,
    #[serde(rename = "Super Admin")]
    SuperAdmin,
    Coach,
    Referee,
    Player,
}

impl Role {
    /// All known roles, in display order.
    pub const ALL: [Role; 5] = [
        Role::User,
        Role::SuperAdmin,
        Role::Coach,
        Role::Referee,
        Role::Player,
    ];

    /// Stored/displayed name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::SuperAdmin => "Super Admin",
            Role::Coach => "Coach",
            Role::Referee => "Referee",
            Role::Player => "Player",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a path or query parameter names a role we don't know.
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

// ─── Role Policy Table ───────────────────────────────────────────

/// One row of the policy table: the fields a role exclusively owns,
/// named as they appear in the persisted record.
pub struct RolePolicy {
    pub role: Role,
    pub owned_fields: &'static [&'static str],
}

/// Static mapping from role to the fields it exclusively owns. Consulted by
/// `remove_role` to know what to strip. Roles without an entry own nothing.
pub const ROLE_POLICIES: &[RolePolicy] = &[
    RolePolicy {
        role: Role::Coach,
        owned_fields: &["yearOfExperience", "licenseCertificate", "associatedPlayers"],
    },
    RolePolicy {
        role: Role::Referee,
        owned_fields: &["certification", "certificationDocument"],
    },
    RolePolicy {
        role: Role::Player,
        owned_fields: &[
            "height",
            "weight",
            "dominantHand",
            "healthCertificate",
            "coach",
            "rank",
            "points",
            "tournamentHistory",
            "playerHistory",
        ],
    },
];

/// Fields exclusively owned by `role`, or an empty slice.
pub fn owned_fields(role: Role) -> &'static [&'static str] {
    ROLE_POLICIES
        .iter()
        .find(|policy| policy.role == role)
        .map(|policy| policy.owned_fields)
        .unwrap_or(&[])
}

// ─── Role Assignment ─────────────────────────────────────────────

/// A role grant with its typed role-specific data.
///
/// Wire shape is adjacently tagged, e.g.
/// `{"role": "Coach", "data": {"yearOfExperience": 5}}`. Roles that own no
/// fields (`User`, `Super Admin`) take no `data`. Unknown fields inside
/// `data` are rejected rather than silently merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", content = "data")]
pub enum RoleAssignment {
    User,
    #[serde(rename = "Super Admin")]
    SuperAdmin,
    Coach(CoachProfile),
    Referee(RefereeProfile),
    Player(PlayerProfile),
}

impl RoleAssignment {
    /// Assignment for `role` with no role-specific data.
    pub fn bare(role: Role) -> Self {
        match role {
            Role::User => RoleAssignment::User,
            Role::SuperAdmin => RoleAssignment::SuperAdmin,
            Role::Coach => RoleAssignment::Coach(CoachProfile::default()),
            Role::Referee => RoleAssignment::Referee(RefereeProfile::default()),
            Role::Player => RoleAssignment::Player(PlayerProfile::default()),
        }
    }

    /// The role this assignment grants.
    pub fn role(&self) -> Role {
        match self {
            RoleAssignment::User => Role::User,
            RoleAssignment::SuperAdmin => Role::SuperAdmin,
            RoleAssignment::Coach(_) => Role::Coach,
            RoleAssignment::Referee(_) => Role::Referee,
            RoleAssignment::Player(_) => Role::Player,
        }
    }

    /// Merge the supplied role-specific fields onto the record. Only fields
    /// present in the assignment overwrite; everything else is untouched.
    pub fn apply(&self, user: &mut User) {
        match self {
            RoleAssignment::User | RoleAssignment::SuperAdmin => {}
            RoleAssignment::Coach(profile) => profile.apply(user),
            RoleAssignment::Referee(profile) => profile.apply(user),
            RoleAssignment::Player(profile) => profile.apply(user),
        }
    }
}

/// Coach-owned fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CoachProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_experience: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_players: Option<Vec<String>>,
}

impl CoachProfile {
    fn apply(&self, user: &mut User) {
        if let Some(years) = self.year_of_experience {
            user.year_of_experience = Some(years);
        }
        if let Some(cert) = &self.license_certificate {
            user.license_certificate = Some(cert.clone());
        }
        if let Some(players) = &self.associated_players {
            user.associated_players = Some(players.clone());
        }
    }
}

/// Referee-owned fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RefereeProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification_document: Option<String>,
}

impl RefereeProfile {
    fn apply(&self, user: &mut User) {
        if let Some(certified) = self.certification {
            user.certification = Some(certified);
        }
        if let Some(doc) = &self.certification_document {
            user.certification_document = Some(doc.clone());
        }
    }
}

/// Player-owned fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlayerProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_hand: Option<DominantHand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coach: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament_history: Option<Vec<TournamentEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_history: Option<Vec<PlayerHistoryEntry>>,
}

impl PlayerProfile {
    fn apply(&self, user: &mut User) {
        if let Some(height) = &self.height {
            user.height = Some(height.clone());
        }
        if let Some(weight) = &self.weight {
            user.weight = Some(weight.clone());
        }
        if let Some(hand) = self.dominant_hand {
            user.dominant_hand = Some(hand);
        }
        if let Some(cert) = &self.health_certificate {
            user.health_certificate = Some(cert.clone());
        }
        if let Some(coach) = &self.coach {
            user.coach = Some(coach.clone());
        }
        if let Some(rank) = self.rank {
            user.rank = Some(rank);
        }
        if let Some(points) = self.points {
            user.points = Some(points);
        }
        if let Some(history) = &self.tournament_history {
            user.tournament_history = Some(history.clone());
        }
        if let Some(history) = &self.player_history {
            user.player_history = Some(history.clone());
        }
    }
}
