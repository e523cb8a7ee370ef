//! Message filtering for log queries.

use rostrum_models::{Message, Role};

/// Filter criteria for querying the conversation log.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    /// Roles to include. `None` matches every role.
    pub roles: Option<Vec<Role>>,
}

impl MessageFilter {
    /// Creates a new empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role to the accepted set.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.get_or_insert_with(Vec::new).push(role);
        self
    }

    /// Sets the accepted role set.
    pub fn with_roles(mut self, roles: impl Into<Vec<Role>>) -> Self {
        self.roles = Some(roles.into());
        self
    }

    /// Filter matching the agent-visible conversation (pro, con, judge).
    pub fn conversation() -> Self {
        Self::new().with_roles(vec![Role::Pro, Role::Con, Role::Judge])
    }

    /// Filter matching only the two debating sides.
    pub fn debaters() -> Self {
        Self::new().with_roles(vec![Role::Pro, Role::Con])
    }

    /// Returns true if the message matches this filter.
    pub fn matches(&self, message: &Message) -> bool {
        match &self.roles {
            Some(roles) => roles.contains(&message.role),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = MessageFilter::new();

        assert!(filter.matches(&Message::pro("a")));
        assert!(filter.matches(&Message::system("b")));
    }

    #[test]
    fn test_filter_by_role() {
        let filter = MessageFilter::new().with_role(Role::Judge);

        assert!(filter.matches(&Message::judge("verdict")));
        assert!(!filter.matches(&Message::pro("argument")));
    }

    #[test]
    fn test_conversation_filter_excludes_system() {
        let filter = MessageFilter::conversation();

        assert!(filter.matches(&Message::pro("a")));
        assert!(filter.matches(&Message::con("b")));
        assert!(filter.matches(&Message::judge("c")));
        assert!(!filter.matches(&Message::system("d")));
    }

    #[test]
    fn test_debaters_filter() {
        let filter = MessageFilter::debaters();

        assert!(filter.matches(&Message::pro("a")));
        assert!(filter.matches(&Message::con("b")));
        assert!(!filter.matches(&Message::judge("c")));
        assert!(!filter.matches(&Message::system("d")));
    }
}
