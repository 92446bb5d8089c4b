//! Append-only conversation log.
//!
//! Turns are immutable once pushed: fields are private and the log only
//! exposes shared slices, so insertion order is display order for the life
//! of the owning panel.

#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

/// Who authored a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One message in the conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    id: String,
    role: Role,
    content: String,
}

impl Turn {
    fn new(role: Role, content: String) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), role, content }
    }

    /// Stable key for keyed list rendering.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Markdown content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered turn log owned by one chat session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn and return a reference to it.
    pub fn push(&mut self, role: Role, content: impl Into<String>) -> &Turn {
        self.turns.push(Turn::new(role, content.into()));
        let last = self.turns.len() - 1;
        &self.turns[last]
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}
