use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    history::{
        entities::{PlanFeedback, PlanRecord},
        ports::PreferencesStore,
    },
};

/// Attaches feedback to a stored plan and writes the history back.
#[instrument(skip(store, feedback), fields(rating = ?feedback.rating))]
pub async fn submit_plan_feedback<S>(
    store: &S,
    plan_id: Uuid,
    feedback: PlanFeedback,
) -> Result<PlanRecord, CoreError>
where
    S: PreferencesStore,
{
    let mut history = store.load_history().await?;

    let record = history
        .iter_mut()
        .find(|record| record.id == plan_id)
        .ok_or(CoreError::NotFound)?;
    record.submit_feedback(feedback)?;
    let updated = record.clone();

    store.save_history(history).await?;
    info!("plan feedback recorded");

    Ok(updated)
}
