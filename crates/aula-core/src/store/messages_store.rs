use crate::models::{Message, MessagePatch};
use crate::store::list_sync::ListSync;

/// Sub-store for the messages view.
#[derive(Default)]
pub struct MessagesStore {
    pub list: ListSync<Message>,
}

impl MessagesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, messages: Vec<Message>) {
        self.list.load(messages);
    }

    pub fn handle_new(&mut self, message: Message) {
        self.list.insert(message);
    }

    pub fn handle_edited(&mut self, id: &str, patch: MessagePatch) {
        if !self.list.apply_edit(id, |message| message.apply_patch(patch)) {
            tracing::debug!(id, "edit for unknown message dropped");
        }
    }

    pub fn handle_deleted(&mut self, id: &str) {
        self.list.remove(id);
    }
}
