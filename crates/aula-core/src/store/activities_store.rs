use crate::models::{Activity, ActivityPatch, Delivery};
use crate::store::list_sync::ListSync;

/// Sub-store for the activities view. Besides the usual create/edit/delete
/// lifecycle, activities carry per-student hand-in state mutated by the
/// `delivered`/`result`/`viewed` sub-events.
#[derive(Default)]
pub struct ActivitiesStore {
    pub list: ListSync<Activity>,
}

impl ActivitiesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, activities: Vec<Activity>) {
        self.list.load(activities);
    }

    pub fn handle_new(&mut self, activity: Activity) {
        self.list.insert(activity);
    }

    pub fn handle_edited(&mut self, id: &str, patch: ActivityPatch) {
        if !self.list.apply_edit(id, |activity| activity.apply_patch(patch)) {
            tracing::debug!(id, "edit for unknown activity dropped");
        }
    }

    pub fn handle_deleted(&mut self, id: &str) {
        self.list.remove(id);
    }

    pub fn handle_delivered(&mut self, id: &str, student_id: &str, delivery: Delivery) {
        self.list
            .apply_edit(id, |activity| activity.record_delivery(student_id, delivery));
    }

    pub fn handle_result(&mut self, id: &str, student_id: &str, result: String) {
        self.list
            .apply_edit(id, |activity| activity.record_result(student_id, result));
    }

    pub fn handle_viewed(&mut self, id: &str, student_id: &str) {
        self.list
            .apply_edit(id, |activity| activity.record_viewed(student_id));
    }
}
