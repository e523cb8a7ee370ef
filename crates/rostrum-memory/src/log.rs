//! Fixed-capacity conversation log with FIFO eviction.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use rostrum_models::{Message, Role};

use crate::filter::MessageFilter;

/// Default maximum number of retained messages.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Statistics over the current log contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogStats {
    /// Number of messages currently retained.
    pub total_messages: usize,
    /// Message count per role.
    pub role_counts: HashMap<Role, usize>,
    /// Sum of content lengths, in characters.
    pub total_characters: usize,
    /// Messages retained out of capacity.
    pub capacity_used: usize,
    /// Maximum retained messages.
    pub capacity: usize,
}

/// Serializable snapshot of a log's full state.
///
/// A plain structural form: messages in order, the auxiliary metadata
/// map, and the stats at export time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSnapshot {
    /// All retained messages, oldest first.
    pub messages: Vec<Message>,
    /// Auxiliary metadata attached to the log.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Stats at export time.
    pub stats: LogStats,
}

/// Insertion-ordered message buffer with a fixed capacity.
///
/// Appending beyond capacity silently evicts the oldest entry; eviction
/// is the memory-bounding mechanism, not a failure. Queries return
/// snapshots and never mutate the underlying sequence.
#[derive(Debug)]
pub struct ConversationLog {
    messages: VecDeque<Message>,
    metadata: HashMap<String, serde_json::Value>,
    capacity: usize,
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationLog {
    /// Creates a log with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a log retaining at most `capacity` messages.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            metadata: HashMap::new(),
            capacity,
        }
    }

    /// Appends a message, evicting the oldest entry at capacity.
    pub fn push(&mut self, message: Message) {
        if self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        debug!(
            role = %message.role,
            chars = message.content.len(),
            "message appended to log"
        );
        self.messages.push_back(message);
    }

    /// Number of retained messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true when no messages are retained.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Maximum number of retained messages.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sets an auxiliary metadata entry.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata.insert(key.into(), value);
    }

    /// The auxiliary metadata map.
    pub fn metadata(&self) -> &HashMap<String, serde_json::Value> {
        &self.metadata
    }

    /// Returns a snapshot of messages matching `filter`, restricted to
    /// the last `limit` matches, preserving original order.
    pub fn query(&self, filter: Option<&MessageFilter>, limit: Option<usize>) -> Vec<Message> {
        let matched: Vec<&Message> = self
            .messages
            .iter()
            .filter(|m| filter.map_or(true, |f| f.matches(m)))
            .collect();

        let skip = limit.map_or(0, |l| matched.len().saturating_sub(l));
        matched.into_iter().skip(skip).cloned().collect()
    }

    /// Agent-visible conversation history (excludes system messages).
    pub fn conversation_history(&self, limit: Option<usize>) -> Vec<Message> {
        self.query(Some(&MessageFilter::conversation()), limit)
    }

    /// Only the pro/con arguments, for judge transcript construction.
    pub fn debate_messages(&self, limit: Option<usize>) -> Vec<Message> {
        self.query(Some(&MessageFilter::debaters()), limit)
    }

    /// Statistics over the current contents.
    pub fn stats(&self) -> LogStats {
        let mut role_counts: HashMap<Role, usize> = HashMap::new();
        let mut total_characters = 0;

        for message in &self.messages {
            *role_counts.entry(message.role).or_insert(0) += 1;
            total_characters += message.content.len();
        }

        LogStats {
            total_messages: self.messages.len(),
            role_counts,
            total_characters,
            capacity_used: self.messages.len(),
            capacity: self.capacity,
        }
    }

    /// Removes all messages and auxiliary metadata.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.metadata.clear();
    }

    /// Exports the full log state as a serializable snapshot.
    pub fn export(&self) -> LogSnapshot {
        LogSnapshot {
            messages: self.messages.iter().cloned().collect(),
            metadata: self.metadata.clone(),
            stats: self.stats(),
        }
    }

    /// Replaces the log contents with a previously exported snapshot.
    ///
    /// Existing state is cleared first. If the snapshot holds more
    /// messages than this log's capacity, the usual FIFO eviction
    /// applies from the front.
    pub fn import(&mut self, snapshot: LogSnapshot) {
        self.clear();
        let count = snapshot.messages.len();
        for message in snapshot.messages {
            self.push(message);
        }
        self.metadata = snapshot.metadata;
        debug!(imported = count, retained = self.messages.len(), "log imported");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbered(n: usize) -> Message {
        Message::pro(format!("argument {}", n))
    }

    #[test]
    fn test_push_and_len() {
        let mut log = ConversationLog::new();
        assert!(log.is_empty());

        log.push(Message::pro("a"));
        log.push(Message::con("b"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_eviction_keeps_most_recent_in_order() {
        let mut log = ConversationLog::with_capacity(3);
        for n in 0..10 {
            log.push(numbered(n));
        }

        assert_eq!(log.len(), 3);
        let contents: Vec<String> = log
            .query(None, None)
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["argument 7", "argument 8", "argument 9"]);
    }

    #[test]
    fn test_query_role_filter_preserves_order() {
        let mut log = ConversationLog::new();
        log.push(Message::pro("p1"));
        log.push(Message::con("c1"));
        log.push(Message::system("s1"));
        log.push(Message::pro("p2"));

        let filter = MessageFilter::new().with_role(Role::Pro);
        let pros = log.query(Some(&filter), None);

        assert_eq!(pros.len(), 2);
        assert_eq!(pros[0].content, "p1");
        assert_eq!(pros[1].content, "p2");
    }

    #[test]
    fn test_query_limit_takes_last_matches() {
        let mut log = ConversationLog::new();
        for n in 0..5 {
            log.push(numbered(n));
        }

        let last_two = log.query(None, Some(2));
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].content, "argument 3");
        assert_eq!(last_two[1].content, "argument 4");
    }

    #[test]
    fn test_query_does_not_mutate_log() {
        let mut log = ConversationLog::new();
        log.push(Message::pro("a"));

        let _ = log.query(None, Some(0));
        let _ = log.conversation_history(None);

        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_conversation_history_excludes_system() {
        let mut log = ConversationLog::new();
        log.push(Message::system("phase marker"));
        log.push(Message::pro("p1"));
        log.push(Message::judge("j1"));

        let history = log.conversation_history(None);
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|m| m.role != Role::System));
    }

    #[test]
    fn test_debate_messages_only_pro_con() {
        let mut log = ConversationLog::new();
        log.push(Message::pro("p1"));
        log.push(Message::judge("j1"));
        log.push(Message::con("c1"));
        log.push(Message::system("s1"));

        let debate = log.debate_messages(None);
        assert_eq!(debate.len(), 2);
        assert_eq!(debate[0].role, Role::Pro);
        assert_eq!(debate[1].role, Role::Con);
    }

    #[test]
    fn test_stats() {
        let mut log = ConversationLog::with_capacity(10);
        log.push(Message::pro("abcd"));
        log.push(Message::pro("ef"));
        log.push(Message::con("gh"));

        let stats = log.stats();
        assert_eq!(stats.total_messages, 3);
        assert_eq!(stats.role_counts[&Role::Pro], 2);
        assert_eq!(stats.role_counts[&Role::Con], 1);
        assert_eq!(stats.total_characters, 8);
        assert_eq!(stats.capacity_used, 3);
        assert_eq!(stats.capacity, 10);
    }

    #[test]
    fn test_export_import_roundtrip() {
        let mut log = ConversationLog::new();
        log.push(Message::pro("p1").with_metadata("turn", json!(0)));
        log.push(Message::con("c1").with_metadata("turn", json!(1)));
        log.set_metadata("topic", json!("test"));

        let snapshot = log.export();

        let mut restored = ConversationLog::new();
        restored.import(snapshot);

        assert_eq!(restored.len(), 2);
        let original = log.query(None, None);
        let imported = restored.query(None, None);
        assert_eq!(original, imported);
        assert_eq!(restored.metadata()["topic"], json!("test"));
    }

    #[test]
    fn test_import_clears_existing_state() {
        let mut source = ConversationLog::new();
        source.push(Message::pro("new"));
        let snapshot = source.export();

        let mut log = ConversationLog::new();
        log.push(Message::con("old"));
        log.set_metadata("stale", json!(true));
        log.import(snapshot);

        assert_eq!(log.len(), 1);
        assert_eq!(log.query(None, None)[0].content, "new");
        assert!(!log.metadata().contains_key("stale"));
    }

    #[test]
    fn test_import_beyond_capacity_evicts_from_front() {
        let mut source = ConversationLog::new();
        for n in 0..5 {
            source.push(numbered(n));
        }
        let snapshot = source.export();

        let mut small = ConversationLog::with_capacity(2);
        small.import(snapshot);

        assert_eq!(small.len(), 2);
        let contents: Vec<String> = small
            .query(None, None)
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["argument 3", "argument 4"]);
    }

    #[test]
    fn test_snapshot_serialization_roundtrip() {
        let mut log = ConversationLog::new();
        log.push(Message::pro("p1"));
        log.set_metadata("k", json!("v"));

        let snapshot = log.export();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: LogSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.messages, snapshot.messages);
        assert_eq!(parsed.metadata, snapshot.metadata);
        assert_eq!(parsed.stats, snapshot.stats);
    }
}
