//! Who is connected right now.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use mathdash_common::ConnectionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub user_id: String,
    pub username: String,
    pub joined_at: DateTime<Utc>,
}

/// Connection id -> participant. A connection that joins twice keeps only
/// its latest identity; two connections with the same user id are two
/// participants.
#[derive(Debug, Default)]
pub struct PresenceTracker {
    participants: HashMap<ConnectionId, Participant>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the participant on `connection`. Returns the
    /// previous entry, if any.
    pub fn add(
        &mut self,
        connection: ConnectionId,
        user_id: impl Into<String>,
        username: impl Into<String>,
    ) -> Option<Participant> {
        self.participants.insert(
            connection,
            Participant {
                user_id: user_id.into(),
                username: username.into(),
                joined_at: Utc::now(),
            },
        )
    }

    pub fn remove(&mut self, connection: &ConnectionId) -> Option<Participant> {
        self.participants.remove(connection)
    }

    pub fn get(&self, connection: &ConnectionId) -> Option<&Participant> {
        self.participants.get(connection)
    }

    pub fn count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Copy of the distinct user ids currently present.
    pub fn participant_ids(&self) -> BTreeSet<String> {
        self.participants
            .values()
            .map(|p| p.user_id.clone())
            .collect()
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.participants.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove() {
        let mut presence = PresenceTracker::new();
        let conn = ConnectionId::from("c1");
        assert!(presence.add(conn.clone(), "u1", "alice").is_none());
        assert_eq!(presence.count(), 1);
        assert_eq!(presence.get(&conn).unwrap().username, "alice");

        let removed = presence.remove(&conn).unwrap();
        assert_eq!(removed.user_id, "u1");
        assert!(presence.is_empty());
        assert!(presence.remove(&conn).is_none());
    }

    #[test]
    fn rejoin_on_same_connection_overwrites() {
        let mut presence = PresenceTracker::new();
        let conn = ConnectionId::from("c1");
        presence.add(conn.clone(), "u1", "alice");
        let previous = presence.add(conn.clone(), "u2", "bob").unwrap();
        assert_eq!(previous.username, "alice");
        assert_eq!(presence.count(), 1);
        assert_eq!(presence.get(&conn).unwrap().username, "bob");
    }

    #[test]
    fn same_user_on_two_connections_counts_twice() {
        let mut presence = PresenceTracker::new();
        presence.add(ConnectionId::from("c1"), "u1", "alice");
        presence.add(ConnectionId::from("c2"), "u1", "alice");
        assert_eq!(presence.count(), 2);
        assert_eq!(presence.participant_ids().len(), 1);
    }

    #[test]
    fn participant_ids_is_a_copy() {
        let mut presence = PresenceTracker::new();
        presence.add(ConnectionId::from("c1"), "u1", "alice");
        let ids = presence.participant_ids();
        presence.remove(&ConnectionId::from("c1"));
        assert!(ids.contains("u1"));
        assert!(presence.participant_ids().is_empty());
    }
}
