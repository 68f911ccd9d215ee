use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, history::entities::PlanRecord};

/// Persistence collaborator for plan history and the premium flag.
///
/// Each key is written whole and the last write wins; nothing ties the two
/// keys together transactionally.
#[cfg_attr(test, mockall::automock)]
pub trait PreferencesStore: Send + Sync {
    fn load_history(&self) -> impl Future<Output = Result<Vec<PlanRecord>, CoreError>> + Send;

    fn save_history(
        &self,
        history: Vec<PlanRecord>,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn is_premium(&self) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn set_premium(&self, premium: bool) -> impl Future<Output = Result<(), CoreError>> + Send;
}
