//! Session keys, player identifiers and the display-name registry.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, instrument};

/// Where a message was sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ChatScope {
    /// A group channel shared by many members.
    #[display("group:{_0}")]
    Group(String),
    /// A one-to-one conversation.
    #[display("private:{_0}")]
    Private(String),
}

/// Key of a game session: one per group channel or private conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
pub struct SessionKey(ChatScope);

impl SessionKey {
    /// Key for a group channel.
    pub fn group(id: impl Into<String>) -> Self {
        Self(ChatScope::Group(id.into()))
    }

    /// Key for a private conversation.
    pub fn private(id: impl Into<String>) -> Self {
        Self(ChatScope::Private(id.into()))
    }

    /// The chat scope this key stands for.
    pub fn scope(&self) -> &ChatScope {
        &self.0
    }
}

/// Opaque player identity.
///
/// A group member is identified by the pair (group, sender) so the same
/// account in two groups counts as two players. In a private conversation
/// the conversation itself is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum PlayerId {
    /// Member of a group channel.
    #[display("{group}/{sender}")]
    Member {
        /// Group channel.
        group: String,
        /// Sender within the group.
        sender: String,
    },
    /// Party to a private conversation.
    #[display("{conversation}")]
    Direct {
        /// Conversation id.
        conversation: String,
    },
}

impl PlayerId {
    /// Resolves the identity of `sender` speaking in `scope`.
    pub fn in_scope(scope: &ChatScope, sender: &str) -> Self {
        match scope {
            ChatScope::Group(group) => PlayerId::Member {
                group: group.clone(),
                sender: sender.to_string(),
            },
            ChatScope::Private(conversation) => PlayerId::Direct {
                conversation: conversation.clone(),
            },
        }
    }

    /// Convenience constructor for group members.
    pub fn member(group: impl Into<String>, sender: impl Into<String>) -> Self {
        PlayerId::Member {
            group: group.into(),
            sender: sender.into(),
        }
    }

    /// Label used when no display name was ever registered.
    pub fn fallback_label(&self) -> &str {
        match self {
            PlayerId::Member { sender, .. } => sender,
            PlayerId::Direct { conversation } => conversation,
        }
    }
}

/// Process-wide mapping from player identity to display name.
///
/// Entries outlive sessions and are never removed. Cloning shares the
/// underlying map.
#[derive(Debug, Clone)]
pub struct IdentityRegistry {
    names: Arc<RwLock<HashMap<PlayerId, String>>>,
    placeholders: Arc<Vec<String>>,
}

impl IdentityRegistry {
    /// Creates an empty registry. Names equal to one of `placeholders`
    /// (or blank) are never stored.
    #[instrument(skip(placeholders))]
    pub fn new(placeholders: Vec<String>) -> Self {
        info!(placeholders = placeholders.len(), "Creating identity registry");
        Self {
            names: Arc::new(RwLock::new(HashMap::new())),
            placeholders: Arc::new(placeholders),
        }
    }

    /// True for a name worth remembering.
    pub fn is_usable(&self, name: &str) -> bool {
        let name = name.trim();
        !name.is_empty() && !self.placeholders.iter().any(|p| p == name)
    }

    /// Stores or overwrites the display name for `player` when `name` is usable.
    ///
    /// Returns whether a name was stored.
    #[instrument(skip(self))]
    pub fn register(&self, player: &PlayerId, name: Option<&str>) -> bool {
        let Some(name) = name.filter(|n| self.is_usable(n)) else {
            debug!(%player, "No usable display name supplied");
            return false;
        };
        let mut names = self.names.write().unwrap_or_else(PoisonError::into_inner);
        names.insert(player.clone(), name.trim().to_string());
        debug!(%player, name = name.trim(), "Display name registered");
        true
    }

    /// Stored name, or the identifier-derived fallback.
    pub fn display_name(&self, player: &PlayerId) -> String {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        names
            .get(player)
            .cloned()
            .unwrap_or_else(|| player.fallback_label().to_string())
    }

    /// Stored name only.
    pub fn stored_name(&self, player: &PlayerId) -> Option<String> {
        let names = self.names.read().unwrap_or_else(PoisonError::into_inner);
        names.get(player).cloned()
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new(vec!["unknown".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_identity_is_scoped_by_group() {
        let a = PlayerId::in_scope(&ChatScope::Group("g1".into()), "42");
        let b = PlayerId::in_scope(&ChatScope::Group("g2".into()), "42");
        assert_ne!(a, b);
        assert_eq!(a.fallback_label(), "42");
        assert_eq!(a.to_string(), "g1/42");
    }

    #[test]
    fn test_direct_identity_is_the_conversation() {
        let p = PlayerId::in_scope(&ChatScope::Private("dm-7".into()), "ignored");
        assert_eq!(p, PlayerId::Direct { conversation: "dm-7".into() });
        assert_eq!(p.fallback_label(), "dm-7");
    }

    #[test]
    fn test_composite_keys_do_not_collide() {
        // "a_b" + "c" and "a" + "b_c" would collide as joined strings.
        let left = PlayerId::member("a_b", "c");
        let right = PlayerId::member("a", "b_c");
        assert_ne!(left, right);
    }

    #[test]
    fn test_register_and_fallback() {
        let registry = IdentityRegistry::default();
        let alice = PlayerId::member("g", "1001");
        assert_eq!(registry.display_name(&alice), "1001");

        assert!(registry.register(&alice, Some("Alice")));
        assert_eq!(registry.display_name(&alice), "Alice");

        assert!(registry.register(&alice, Some("Alice B")));
        assert_eq!(registry.stored_name(&alice).as_deref(), Some("Alice B"));
    }

    #[test]
    fn test_placeholders_are_ignored() {
        let registry = IdentityRegistry::default();
        let bob = PlayerId::member("g", "2002");
        registry.register(&bob, Some("Bob"));

        assert!(!registry.register(&bob, Some("unknown")));
        assert!(!registry.register(&bob, Some("   ")));
        assert!(!registry.register(&bob, None));
        assert_eq!(registry.display_name(&bob), "Bob");
    }

    #[test]
    fn test_clones_share_names() {
        let registry = IdentityRegistry::default();
        let shared = registry.clone();
        let carol = PlayerId::member("g", "3003");
        shared.register(&carol, Some("Carol"));
        assert_eq!(registry.display_name(&carol), "Carol");
    }
}
