//! User entity
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::domain::value_objects::{EntityId, RatingSummary, Score};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role { #[default] User, Agent, Admin }

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Role {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "agent" => Ok(Self::Agent),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Profile data kept for agent accounts.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct AgentProfile {
    pub rating: f64,
    pub total_ratings: u32,
    pub completed_tickets: u32,
    pub response_time: u32,
    pub bio: String,
    pub experience: String,
    pub skills: Vec<String>,
}

impl AgentProfile {
    pub fn new(skills: Vec<String>) -> Self {
        Self { skills, ..Self::default() }
    }

    pub fn rating_summary(&self) -> RatingSummary {
        RatingSummary { average: self.rating, count: self.total_ratings }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: Role,
    pub specializations: Vec<String>,
    pub profile: Option<AgentProfile>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
        specializations: Vec<String>,
    ) -> Self {
        let profile = (role == Role::Agent).then(|| AgentProfile::new(specializations.clone()));
        Self {
            id: EntityId::new(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role,
            specializations,
            profile,
            created_at: Utc::now(),
        }
    }

    pub fn is_agent(&self) -> bool { self.role == Role::Agent }
    pub fn is_admin(&self) -> bool { self.role == Role::Admin }

    /// Current average rating; unrated agents and non-agents report 0.
    pub fn rating(&self) -> f64 {
        self.profile.as_ref().map(|p| p.rating).unwrap_or(0.0)
    }

    /// Fold a new rating into the agent profile, creating the profile if missing.
    pub fn record_rating(&mut self, score: Score) -> RatingSummary {
        let profile = self.profile.get_or_insert_with(|| AgentProfile::new(self.specializations.clone()));
        let summary = profile.rating_summary().record(score);
        profile.rating = summary.average;
        profile.total_ratings = summary.count;
        summary
    }

    pub fn set_specializations(&mut self, tags: Vec<String>) {
        if let Some(profile) = self.profile.as_mut() {
            profile.skills = tags.clone();
        }
        self.specializations = tags;
    }

    /// Name shown to other participants; falls back to the email.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() { &self.email } else { &self.username }
    }
}
