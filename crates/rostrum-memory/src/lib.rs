//! Bounded conversation memory for Rostrum debate sessions.
//!
//! This crate provides the [`ConversationLog`]: a fixed-capacity,
//! insertion-ordered message buffer with silent FIFO eviction, filtered
//! snapshot queries, and full export/import round-tripping.
//!
//! # Example
//!
//! ```
//! use rostrum_memory::{ConversationLog, MessageFilter};
//! use rostrum_models::{Message, Role};
//!
//! let mut log = ConversationLog::new();
//! log.push(Message::pro("Opening argument"));
//! log.push(Message::con("Rebuttal"));
//!
//! let filter = MessageFilter::new().with_role(Role::Pro);
//! let pro_messages = log.query(Some(&filter), None);
//! assert_eq!(pro_messages.len(), 1);
//! ```

pub mod filter;
pub mod log;

pub use filter::MessageFilter;
pub use log::{ConversationLog, LogSnapshot, LogStats, DEFAULT_CAPACITY};
