//! Push-notification routing.
//!
//! A push payload is a JSON object carrying the same `event` discriminator
//! as the live socket. Only the four "new content" events produce a
//! notification; each maps to a fixed title and the hash route the click
//! should open.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushKind {
    Message,
    Activity,
    Report,
    Grades,
}

impl PushKind {
    pub fn from_event(event: &str) -> Option<Self> {
        match event {
            "newMessage" => Some(Self::Message),
            "newActivity" => Some(Self::Activity),
            "newReport" => Some(Self::Report),
            "newGrades" => Some(Self::Grades),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Message => "New message!",
            Self::Activity => "New activity!",
            Self::Report => "New report!",
            Self::Grades => "New grades!",
        }
    }

    /// Hash route a notification click navigates to.
    pub fn route(self) -> &'static str {
        match self {
            Self::Message => "#messages",
            Self::Activity => "#activities",
            Self::Report => "#reports",
            Self::Grades => "#grades",
        }
    }
}

#[derive(Debug, Deserialize)]
struct PushPayload {
    event: String,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushNotification {
    pub kind: PushKind,
    /// Record title shown as the notification body, when the payload has one.
    pub body: Option<String>,
}

/// Parse a raw push payload into a displayable notification. Unknown or
/// malformed payloads yield nothing.
pub fn parse_push(raw: &str) -> Option<PushNotification> {
    let payload: PushPayload = serde_json::from_str(raw).ok()?;
    let kind = PushKind::from_event(&payload.event)?;
    Some(PushNotification {
        kind,
        body: payload.title,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_routes_to_messages() {
        let notification =
            parse_push(r#"{"event": "newMessage", "title": "Field trip"}"#).unwrap();
        assert_eq!(notification.kind, PushKind::Message);
        assert_eq!(notification.kind.title(), "New message!");
        assert_eq!(notification.kind.route(), "#messages");
        assert_eq!(notification.body.as_deref(), Some("Field trip"));
    }

    #[test]
    fn test_grades_push_has_no_body() {
        let notification = parse_push(r#"{"event": "newGrades"}"#).unwrap();
        assert_eq!(notification.kind, PushKind::Grades);
        assert_eq!(notification.kind.route(), "#grades");
        assert!(notification.body.is_none());
    }

    #[test]
    fn test_non_push_events_are_ignored() {
        assert!(parse_push(r#"{"event": "deletedMessage", "id": "1"}"#).is_none());
        assert!(parse_push("garbage").is_none());
    }
}
