use crate::models::{Person, PersonPatch};
use crate::store::list_sync::ListSync;

/// Sub-store for the people directory. Unlike the dated lists this one is
/// ordered by name, ascending.
#[derive(Default)]
pub struct PeopleStore {
    pub list: ListSync<Person>,
}

impl PeopleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, people: Vec<Person>) {
        self.list.load(people);
    }

    pub fn handle_new(&mut self, person: Person) {
        self.list.insert(person);
    }

    pub fn handle_edited(&mut self, patch: PersonPatch) {
        let id = patch.id.clone();
        if !self.list.apply_edit(&id, |person| person.apply_patch(patch)) {
            tracing::debug!(id, "edit for unknown person dropped");
        }
    }

    pub fn handle_deleted(&mut self, id: &str) {
        self.list.remove(id);
    }
}
