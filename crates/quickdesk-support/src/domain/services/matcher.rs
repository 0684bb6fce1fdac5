//! Agent matching
//!
//! Scores every agent against a ticket's description and category and ranks
//! them. The ranking is computed from an immutable snapshot and never stored.
//!
//! Per agent, the score is the sum of:
//! - `2.0` for each agent tag found (case-insensitively) in the description
//! - `1.0` for each (category tag, agent tag) pair where either contains the other
//! - `0.5 × rating`
//!
//! Only agents with a score strictly above zero are returned, highest first.
//! Equal scores keep the order in which agents were enumerated.

use serde::Serialize;

use crate::domain::aggregates::{Category, User};

pub const DESCRIPTION_MATCH_WEIGHT: f64 = 2.0;
pub const CATEGORY_MATCH_WEIGHT: f64 = 1.0;
pub const RATING_WEIGHT: f64 = 0.5;

/// An agent paired with its score for one ticket.
#[derive(Clone, Debug, Serialize)]
pub struct CandidateScore {
    pub agent: User,
    pub score: f64,
    pub rating: f64,
    pub specializations: Vec<String>,
}

/// Rank `agents` for a ticket. A missing category contributes no tags.
pub fn rank_agents(description: &str, category: Option<&Category>, agents: &[User]) -> Vec<CandidateScore> {
    let description = description.to_lowercase();
    let category_tags: Vec<String> = category
        .map(|c| c.specializations.iter().map(|t| t.to_lowercase()).collect())
        .unwrap_or_default();

    let mut candidates: Vec<CandidateScore> = agents
        .iter()
        .filter_map(|agent| {
            let score = score_agent(&description, &category_tags, agent);
            (score > 0.0).then(|| CandidateScore {
                agent: agent.clone(),
                score,
                rating: agent.rating(),
                specializations: agent.specializations.clone(),
            })
        })
        .collect();

    // stable: ties stay in enumeration order
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}

/// Score one agent. Both `description` and `category_tags` must already be lower-cased.
fn score_agent(description: &str, category_tags: &[String], agent: &User) -> f64 {
    let agent_tags: Vec<String> = agent.specializations.iter().map(|t| t.to_lowercase()).collect();
    let mut score = 0.0;

    for tag in &agent_tags {
        if description.contains(tag.as_str()) {
            score += DESCRIPTION_MATCH_WEIGHT;
        }
    }

    for category_tag in category_tags {
        for tag in &agent_tags {
            if category_tag.contains(tag.as_str()) || tag.contains(category_tag.as_str()) {
                score += CATEGORY_MATCH_WEIGHT;
            }
        }
    }

    score + agent.rating() * RATING_WEIGHT
}
