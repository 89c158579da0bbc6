//! User record as persisted by the legacy dashboard.
//!
//! The serialized shape is camelCase and must stay interoperable with
//! existing stored data, so every role-specific field lives flat on the
//! record and is simply absent while its owning role is not held.

use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Account status toggle shown in the admin tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

/// Playing hand for Player records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DominantHand {
    Left,
    Right,
}

/// One tournament result in a player's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentEntry {
    pub id: String,
    pub name: String,
    pub date: String,
    pub result: String,
    pub points: u32,
}

/// One entry in a player's activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerHistoryEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A directory user. May hold several roles at once; the `role` field is the
/// derived primary role and is always a member of `roles`.
///
/// Legacy records may lack `roles` entirely; [`User::normalize_roles`] is
/// applied on load to bring them up to the current shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// Primary role, kept for display and legacy single-role consumers.
    #[serde(default)]
    pub role: Role,
    /// Ordered role set. Never empty after normalization.
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub status: UserStatus,
    /// RFC 3339 timestamp of the last login.
    #[serde(default)]
    pub last_login: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clubs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// Only set for newly created accounts; scrubbed from API responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    // Coach-owned fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_players: Option<Vec<String>>,

    // Referee-owned fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification_document: Option<String>,

    // Player-owned fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_hand: Option<DominantHand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament_history: Option<Vec<TournamentEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_history: Option<Vec<PlayerHistoryEntry>>,
}

impl User {
    /// Minimal record with the given id; everything else empty or defaulted.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: String::new(),
            role: Role::User,
            roles: vec![Role::User],
            first_name: String::new(),
            last_name: String::new(),
            status: UserStatus::Active,
            last_login: String::new(),
            gender: None,
            dob: None,
            phone1: None,
            phone2: None,
            country: None,
            classification: None,
            organizations: None,
            clubs: None,
            profile_picture: None,
            password: None,
            year_of_experience: None,
            license_certificate: None,
            associated_players: None,
            certification: None,
            certification_document: None,
            height: None,
            weight: None,
            dominant_hand: None,
            health_certificate: None,
            coach: None,
            rank: None,
            points: None,
            tournament_history: None,
            player_history: None,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Bring a loaded record up to the current shape.
    ///
    /// Legacy records carry only the single `role` field; synthesize
    /// `roles = [role]` for them. `User` membership is then restored if
    /// missing and duplicates dropped, keeping first occurrences.
    pub fn normalize_roles(&mut self) {
        if self.roles.is_empty() {
            self.roles.push(self.role);
        }
        if !self.roles.contains(&Role::User) {
            self.roles.insert(0, Role::User);
        }
        // The primary role counts as held even when an old record never
        // listed it in `roles`.
        if !self.roles.contains(&self.role) {
            self.roles.push(self.role);
        }
        let mut seen = Vec::with_capacity(self.roles.len());
        self.roles.retain(|role| {
            if seen.contains(role) {
                false
            } else {
                seen.push(*role);
                true
            }
        });
    }

    /// Clear a role-owned field by its persisted name. Names come from the
    /// role policy table; unknown names are ignored.
    pub fn clear_field(&mut self, field: &str) {
        match field {
            "yearOfExperience" => self.year_of_experience = None,
            "licenseCertificate" => self.license_certificate = None,
            "associatedPlayers" => self.associated_players = None,
            "certification" => self.certification = None,
            "certificationDocument" => self.certification_document = None,
            "height" => self.height = None,
            "weight" => self.weight = None,
            "dominantHand" => self.dominant_hand = None,
            "healthCertificate" => self.health_certificate = None,
            "coach" => self.coach = None,
            "rank" => self.rank = None,
            "points" => self.points = None,
            "tournamentHistory" => self.tournament_history = None,
            "playerHistory" => self.player_history = None,
            _ => {}
        }
    }
}

/// Partial update of the common profile fields.
///
/// Role membership is deliberately absent here: roles change only through
/// the assign/remove operations, never as a side effect of a profile edit.
/// Unknown fields (including `role`/`roles`) are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: Option<UserStatus>,
    pub last_login: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub phone1: Option<String>,
    pub phone2: Option<String>,
    pub country: Option<String>,
    pub classification: Option<String>,
    pub organizations: Option<Vec<String>>,
    pub clubs: Option<Vec<String>>,
    pub profile_picture: Option<String>,
    pub password: Option<String>,
}

impl UserUpdate {
    /// Merge every supplied field onto the record.
    pub fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(status) = self.status {
            user.status = status;
        }
        if let Some(last_login) = &self.last_login {
            user.last_login = last_login.clone();
        }
        if let Some(gender) = &self.gender {
            user.gender = Some(gender.clone());
        }
        if let Some(dob) = &self.dob {
            user.dob = Some(dob.clone());
        }
        if let Some(phone1) = &self.phone1 {
            user.phone1 = Some(phone1.clone());
        }
        if let Some(phone2) = &self.phone2 {
            user.phone2 = Some(phone2.clone());
        }
        if let Some(country) = &self.country {
            user.country = Some(country.clone());
        }
        if let Some(classification) = &self.classification {
            user.classification = Some(classification.clone());
        }
        if let Some(organizations) = &self.organizations {
            user.organizations = Some(organizations.clone());
        }
        if let Some(clubs) = &self.clubs {
            user.clubs = Some(clubs.clone());
        }
        if let Some(profile_picture) = &self.profile_picture {
            user.profile_picture = Some(profile_picture.clone());
        }
        if let Some(password) = &self.password {
            user.password = Some(password.clone());
        }
    }
}
