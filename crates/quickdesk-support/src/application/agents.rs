//! Agent application service: ratings, profiles, specializations

use std::sync::Arc;

use crate::application::dto::{Actor, RatingOutcome};
use crate::domain::aggregates::{RatingRecord, Role, User};
use crate::domain::value_objects::{EntityId, Score};
use crate::ports::outbound::{RatingRepository, UserRepository};
use crate::{Result, SupportError};

pub struct AgentService {
    users: Arc<dyn UserRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl AgentService {
    pub fn new(users: Arc<dyn UserRepository>, ratings: Arc<dyn RatingRepository>) -> Self {
        Self { users, ratings }
    }

    /// Fold a rating into the agent's running average.
    ///
    /// Read-modify-write without compare-and-swap: two concurrent ratings for
    /// the same agent can lose one update.
    pub async fn rate(
        &self,
        agent_id: &EntityId,
        rater: &Actor,
        rating: f64,
        comment: Option<String>,
    ) -> Result<RatingOutcome> {
        let score = Score::new(rating)?;
        let mut agent = self.profile(agent_id).await?;

        // Record first so a failed insert leaves the average untouched.
        self.ratings.insert(&RatingRecord::new(agent.id, rater.id, score, comment)).await?;
        let summary = agent.record_rating(score);
        self.users.save(&agent).await?;

        tracing::info!(%agent_id, rating = score.value(), average = summary.average, "agent rated");
        Ok(RatingOutcome { new_rating: summary.average, total_ratings: summary.count })
    }

    pub async fn profile(&self, agent_id: &EntityId) -> Result<User> {
        self.users
            .find_by_id(agent_id)
            .await?
            .filter(User::is_agent)
            .ok_or(SupportError::AgentNotFound)
    }

    /// Replace an agent's tags. Only the agent or an admin may do this.
    pub async fn set_specializations(&self, agent_id: &EntityId, actor: &Actor, tags: Vec<String>) -> Result<User> {
        if actor.role != Role::Admin && &actor.id != agent_id {
            return Err(SupportError::AccessDenied);
        }
        let mut agent = self.profile(agent_id).await?;
        agent.set_specializations(normalize_tags(tags));
        self.users.save(&agent).await?;
        Ok(agent)
    }
}

/// Trim tags and drop blank ones; a blank tag would match every description.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
