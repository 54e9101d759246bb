use crate::models::Report;
use crate::store::list_sync::ListSync;

/// Sub-store for the reports view. Reports are the simplest list: only the
/// title is editable after filing.
#[derive(Default)]
pub struct ReportsStore {
    pub list: ListSync<Report>,
}

impl ReportsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, reports: Vec<Report>) {
        self.list.load(reports);
    }

    pub fn handle_new(&mut self, report: Report) {
        self.list.insert(report);
    }

    pub fn handle_edited(&mut self, id: &str, new_title: String) {
        if !self.list.apply_edit(id, |report| report.title = new_title) {
            tracing::debug!(id, "edit for unknown report dropped");
        }
    }

    pub fn handle_deleted(&mut self, id: &str) {
        self.list.remove(id);
    }
}
