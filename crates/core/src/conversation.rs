//! Conversation-related types.

use banter_model::ModelMessage;

/// An ordered history of role-tagged messages exchanged with a model.
///
/// A transcript always begins with exactly one system message. The rest
/// of the history is append-only; role ordering of the remainder is not
/// constrained. [`reset`][Transcript::reset] discards everything but the
/// system message.
#[derive(Clone, Debug)]
pub struct Transcript {
    items: Vec<ModelMessage>,
}

impl Transcript {
    /// Creates a transcript holding the given system message.
    #[inline]
    pub fn new<S: Into<String>>(system: S) -> Self {
        Self {
            items: vec![ModelMessage::System(system.into())],
        }
    }

    /// Appends a user message.
    #[inline]
    pub fn push_user<S: Into<String>>(&mut self, content: S) {
        self.items.push(ModelMessage::User(content.into()));
    }

    /// Appends an assistant message.
    #[inline]
    pub fn push_assistant<S: Into<String>>(&mut self, content: S) {
        self.items.push(ModelMessage::Assistant(content.into()));
    }

    /// Discards the history, keeping only the system message the
    /// transcript was created with.
    #[inline]
    pub fn reset(&mut self) {
        self.items.truncate(1);
    }

    /// Removes the most recent message. The system message at the head
    /// is never removed.
    #[inline]
    pub(crate) fn pop_last(&mut self) {
        if self.items.len() > 1 {
            self.items.pop();
        }
    }

    /// Returns the messages, oldest first.
    #[inline]
    pub fn messages(&self) -> &[ModelMessage] {
        &self.items
    }

    /// Returns the number of messages, including the system message.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`: a transcript holds at least its system message.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}
