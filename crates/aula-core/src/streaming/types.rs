use serde::Deserialize;

use crate::models::{Activity, ActivityPatch, Delivery, Grade, Message, MessagePatch, Person, PersonPatch, Report};

/// One inbound frame from the live socket, parsed into its typed variant at
/// the transport boundary. Stores never see raw JSON.
///
/// The server tags every frame with a string `event` discriminator; payload
/// fields sit beside the tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event")]
pub enum LiveEvent {
    #[serde(rename = "newMessage")]
    NewMessage(Message),
    #[serde(rename = "editedMessage")]
    EditedMessage { id: String, message: MessagePatch },
    #[serde(rename = "deletedMessage")]
    DeletedMessage { id: String },

    #[serde(rename = "newActivity")]
    NewActivity(Activity),
    #[serde(rename = "editedActivity")]
    EditedActivity {
        id: String,
        #[serde(rename = "newActivity")]
        activity: ActivityPatch,
    },
    #[serde(rename = "deletedActivity")]
    DeletedActivity { id: String },
    #[serde(rename = "deliveredActivity")]
    DeliveredActivity {
        id: String,
        user: String,
        delivery: Delivery,
    },
    #[serde(rename = "resultActivity")]
    ResultActivity {
        id: String,
        user: String,
        result: String,
    },
    #[serde(rename = "viewedActivity")]
    ViewedActivity { id: String, user: String },

    #[serde(rename = "newReport")]
    NewReport(Report),
    #[serde(rename = "editedReport")]
    EditedReport {
        id: String,
        #[serde(rename = "newTitle")]
        new_title: String,
    },
    #[serde(rename = "deletedReport")]
    DeletedReport { id: String },

    #[serde(rename = "newUser")]
    NewUser { user: Person },
    #[serde(rename = "editedUser")]
    EditedUser { user: PersonPatch },
    #[serde(rename = "deletedUser")]
    DeletedUser {
        #[serde(rename = "userId")]
        user_id: String,
    },

    #[serde(rename = "newGrades")]
    NewGrades { grades: Vec<Grade> },
}

/// Keep-alive frame the server sends as a bare string, not JSON.
const PING_FRAME: &str = "Ping!";

/// Parse one text frame. Returns `None` for the keep-alive frame and for
/// frames that do not decode into a known event (logged and dropped).
pub fn parse_frame(raw: &str) -> Option<LiveEvent> {
    if raw == PING_FRAME {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::debug!(error = %e, frame = raw, "dropping unparseable socket frame");
            None
        }
    }
}
