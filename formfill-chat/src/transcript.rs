use std::fmt;

use crate::CitedSource;

pub const WELCOME_MESSAGE: &str = "Welcome to the Policy Assistant! I can help you find information in our policy and procedure documents. What would you like to know?";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Identifier of a transcript entry, `msg-{n}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a message shows.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    /// Placeholder while a query is outstanding.
    Loading,
    Answer {
        text: String,
        sources: Vec<CitedSource>,
    },
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub content: MessageContent,
}

/// Ordered chat history.
///
/// Append-only, except that an entry's content may be replaced in place
/// (the loading placeholder becoming its reply).
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// A transcript holding only the welcome message.
    pub fn new() -> Self {
        let mut transcript = Self::empty();
        transcript.push(
            Sender::Assistant,
            MessageContent::Text(WELCOME_MESSAGE.to_owned()),
        );
        transcript
    }

    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    pub fn push(&mut self, sender: Sender, content: MessageContent) -> MessageId {
        let id = MessageId(format!("msg-{}", self.next_id));
        self.next_id += 1;
        self.messages.push(Message {
            id: id.clone(),
            sender,
            content,
        });
        id
    }

    /// Swap the content of an existing message. Returns `false` if the id
    /// is unknown.
    pub fn replace(&mut self, id: &MessageId, content: MessageContent) -> bool {
        match self.messages.iter_mut().find(|m| &m.id == id) {
            Some(message) => {
                message.content = content;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| &m.id == id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
