use std::sync::Arc;

use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info};

use crate::charts::{build_bmi_chart, build_macro_chart, BmiChart, MacroChart};
use crate::generator::GeminiClient;
use crate::health::MacroSplit;
use crate::models::{DietPlan, NutritionTable, UserProfile};
use crate::nutrition::extract;

/// A plan request running in the background.
pub struct PendingPlan {
    pub id: u64,
    handle: JoinHandle<DietPlan>,
}

impl PendingPlan {
    /// Wait for the plan. `None` if the task was aborted.
    pub async fn wait(self) -> Option<(u64, DietPlan)> {
        match self.handle.await {
            Ok(plan) => Some((self.id, plan)),
            Err(e) => {
                debug!(id = self.id, error = %e, "Plan request ended without a result");
                None
            }
        }
    }
}

/// Everything the UI shows, held in one place.
///
/// Only the most recently issued request may replace the plan; results of
/// older requests are dropped. Dropping the state aborts any request still
/// running.
#[derive(Default)]
pub struct AppState {
    profile: Option<UserProfile>,
    plan: Option<DietPlan>,
    nutrition: NutritionTable,
    macro_split: MacroSplit,
    latest_request: u64,
    in_flight: Option<AbortHandle>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    pub fn plan(&self) -> Option<&DietPlan> {
        self.plan.as_ref()
    }

    pub fn nutrition(&self) -> &NutritionTable {
        &self.nutrition
    }

    pub fn macro_split(&self) -> &MacroSplit {
        &self.macro_split
    }

    /// Id of the request whose result is currently wanted.
    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Issue a new request id, aborting whatever was running before.
    pub fn next_request(&mut self) -> u64 {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.latest_request += 1;
        self.latest_request
    }

    /// Spawn plan generation for a profile on the current runtime.
    pub fn start_generation(&mut self, client: Arc<GeminiClient>, profile: UserProfile) -> PendingPlan {
        let id = self.next_request();
        let status = profile.bmi().band.status_label();
        info!(id, name = %profile.name, status = %status, "Starting plan generation");

        let handle = tokio::spawn(async move { client.generate_diet(&profile, &status).await });
        self.in_flight = Some(handle.abort_handle());
        PendingPlan { id, handle }
    }

    /// Abort the running request; any result it still delivers is stale.
    pub fn cancel_generation(&mut self) {
        if self.in_flight.is_some() {
            info!(id = self.latest_request, "Plan generation canceled");
        }
        self.next_request();
    }

    /// Store a finished plan if it belongs to the latest request, and
    /// recompute the nutrition table from it. Returns whether it was applied.
    pub fn apply_plan(&mut self, id: u64, plan: DietPlan) -> bool {
        if id != self.latest_request {
            debug!(id, latest = self.latest_request, "Discarding stale plan");
            return false;
        }
        self.in_flight = None;
        self.nutrition = extract(plan.text());
        self.plan = Some(plan);
        true
    }

    /// BMI chart for the current profile.
    pub fn bmi_chart(&self) -> Option<BmiChart> {
        self.profile
            .as_ref()
            .map(|p| build_bmi_chart(p.weight, p.height))
    }

    pub fn macro_chart(&self) -> MacroChart {
        build_macro_chart(&self.macro_split)
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_latest_plan() {
        let mut state = AppState::new();
        let id = state.next_request();
        assert!(state.apply_plan(id, DietPlan::new("Day 1:\n\nLunch\nCalories: 400")));
        assert_eq!(state.nutrition().meal("Day 1", "Lunch").unwrap().calories, "400");
    }

    #[test]
    fn test_stale_plan_is_discarded() {
        let mut state = AppState::new();
        let old = state.next_request();
        let new = state.next_request();

        assert!(state.apply_plan(new, DietPlan::new("newest")));
        assert!(!state.apply_plan(old, DietPlan::new("older")));
        assert_eq!(state.plan().unwrap().text(), "newest");
    }

    #[test]
    fn test_cancel_makes_pending_stale() {
        let mut state = AppState::new();
        let id = state.next_request();
        state.cancel_generation();
        assert!(!state.apply_plan(id, DietPlan::new("late")));
        assert!(state.plan().is_none());
    }

    #[test]
    fn test_no_bmi_chart_without_profile() {
        let state = AppState::new();
        assert!(state.bmi_chart().is_none());
        assert_eq!(state.macro_chart().slices.len(), 3);
    }
}
