use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_timestamp},
    plan::entities::WeeklyPlan,
    profile::entities::UserProfile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackRating {
    Like,
    Dislike,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlanFeedback {
    pub rating: FeedbackRating,
    pub comment: Option<String>,
}

impl PlanFeedback {
    pub fn new(rating: FeedbackRating, comment: Option<String>) -> Self {
        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Self { rating, comment }
    }
}

/// A generated plan kept in the user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlanRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub profile: UserProfile,
    pub plan: WeeklyPlan,
    pub feedback: Option<PlanFeedback>,
}

impl PlanRecord {
    pub fn new(profile: UserProfile, plan: WeeklyPlan) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            created_at: now,
            profile,
            plan,
            feedback: None,
        }
    }

    pub fn feedback_submitted(&self) -> bool {
        self.feedback.is_some()
    }

    /// Feedback is accepted once per record.
    pub fn submit_feedback(&mut self, feedback: PlanFeedback) -> Result<(), CoreError> {
        if self.feedback_submitted() {
            return Err(CoreError::AlreadySubmitted);
        }

        self.feedback = Some(feedback);
        Ok(())
    }
}
