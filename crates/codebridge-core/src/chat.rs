//! Assistant chat transcript and thinking indicator.

use crate::error::{CodebridgeError, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Greeting shown in a fresh (or freshly cleared) transcript.
pub const GREETING: &str =
    "Hello! I'm your coding assistant. Ask me anything about the code you're learning!";

const QUOTA_PREAMBLE: &str = "The AI assistant is currently experiencing high demand. I'm using my built-in knowledge to answer instead.\n\n";
const QUOTA_DEFAULT: &str = "Please try a different question or check back later.";
const GENERIC_ERROR: &str =
    "Sorry, I encountered an error while processing your request. Please try again later.";
const TRANSPORT_ERROR: &str = "Sorry, I encountered a technical issue while processing your request. Our system is still working, but with limited AI capabilities at the moment. Please try asking another question or try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    /// Local wall-clock label such as `14:05`.
    pub timestamp_label: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp_label: Local::now().format("%H:%M").to_string(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Ordered chat history plus the thinking flag of one chat surface.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    thinking: bool,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// A transcript containing only the greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
            thinking: false,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// Drops the history and restores the greeting.
    pub fn clear(&mut self) {
        self.messages = vec![ChatMessage::assistant(GREETING)];
    }
}

pub type SharedTranscript = Arc<Mutex<Transcript>>;

fn lock(transcript: &SharedTranscript) -> MutexGuard<'_, Transcript> {
    transcript.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Live thinking indicator for one pending question.
///
/// At most one guard can exist per transcript. The thinking flag is cleared
/// when the guard is completed (atomically with the reply being appended) or
/// dropped. Repainting the chat is up to the owner of the markup.
#[derive(Debug)]
pub struct ThinkingGuard {
    transcript: SharedTranscript,
    active: bool,
}

impl ThinkingGuard {
    pub fn begin(transcript: &SharedTranscript) -> Result<Self> {
        let mut state = lock(transcript);
        if state.thinking {
            return Err(CodebridgeError::busy("the assistant is still answering"));
        }
        state.thinking = true;
        Ok(Self {
            transcript: Arc::clone(transcript),
            active: true,
        })
    }

    /// Removes the indicator and appends `reply` under the same lock.
    pub fn complete(mut self, reply: ChatMessage) {
        let mut state = lock(&self.transcript);
        state.thinking = false;
        state.push(reply);
        self.active = false;
    }
}

impl Drop for ThinkingGuard {
    fn drop(&mut self) {
        if self.active {
            lock(&self.transcript).thinking = false;
        }
    }
}

/// How an assistant request failed, as far as the learner is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantFailure {
    /// The server ran out of model quota.
    Quota,
    /// The server answered but reported an error.
    Server,
    /// No usable response arrived.
    Transport,
}

impl AssistantFailure {
    /// Classifies an `/api/ask` failure.
    ///
    /// Quota detection is a plain substring match on the error text. It is a
    /// heuristic and will misfire on any message that merely mentions
    /// "quota".
    pub fn classify(err: &CodebridgeError) -> Self {
        match err {
            CodebridgeError::Network(_) => Self::Transport,
            CodebridgeError::Http { message, .. } | CodebridgeError::Application { message, .. } => {
                if message.to_lowercase().contains("quota") {
                    Self::Quota
                } else {
                    Self::Server
                }
            }
            _ => Self::Transport,
        }
    }

    /// The assistant bubble shown for this failure.
    ///
    /// `fallback` is the `response` field the server sent alongside its
    /// error, if any.
    pub fn reply(self, fallback: Option<&str>) -> String {
        let fallback = fallback.filter(|text| !text.trim().is_empty());
        match self {
            Self::Quota => format!("{}{}", QUOTA_PREAMBLE, fallback.unwrap_or(QUOTA_DEFAULT)),
            Self::Server => fallback.unwrap_or(GENERIC_ERROR).to_string(),
            Self::Transport => TRANSPORT_ERROR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> SharedTranscript {
        Arc::new(Mutex::new(Transcript::new()))
    }

    #[test]
    fn test_new_transcript_has_greeting() {
        let transcript = Transcript::new();
        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].content, GREETING);
        assert_eq!(transcript.messages()[0].role, ChatRole::Assistant);
    }

    #[test]
    fn test_clear_restores_greeting() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("what is a loop?"));
        transcript.push(ChatMessage::assistant("a loop repeats"));
        transcript.clear();
        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].content, GREETING);
    }

    #[test]
    fn test_second_guard_is_busy() {
        let transcript = shared();
        let guard = ThinkingGuard::begin(&transcript).unwrap();
        assert!(lock(&transcript).is_thinking());

        let err = ThinkingGuard::begin(&transcript).unwrap_err();
        assert!(matches!(err, CodebridgeError::Busy(_)));

        guard.complete(ChatMessage::assistant("done"));
        assert!(!lock(&transcript).is_thinking());
        assert_eq!(lock(&transcript).messages().last().unwrap().content, "done");
    }

    #[test]
    fn test_dropped_guard_clears_indicator() {
        let transcript = shared();
        {
            let _guard = ThinkingGuard::begin(&transcript).unwrap();
            assert!(lock(&transcript).is_thinking());
        }
        assert!(!lock(&transcript).is_thinking());
        assert!(ThinkingGuard::begin(&transcript).is_ok());
    }

    #[test]
    fn test_classify_quota() {
        let err = CodebridgeError::Application {
            message: "You exceeded your current quota".to_string(),
            fallback: Some("Loops repeat work.".to_string()),
        };
        let failure = AssistantFailure::classify(&err);
        assert_eq!(failure, AssistantFailure::Quota);
        assert_eq!(
            failure.reply(err.fallback_body()),
            format!("{}Loops repeat work.", QUOTA_PREAMBLE)
        );
        assert_eq!(
            failure.reply(None),
            format!("{}{}", QUOTA_PREAMBLE, QUOTA_DEFAULT)
        );
    }

    #[test]
    fn test_classify_other_failures() {
        let server = AssistantFailure::classify(&CodebridgeError::http(500, "boom"));
        assert_eq!(server, AssistantFailure::Server);
        assert_eq!(server.reply(None), GENERIC_ERROR);
        assert_eq!(server.reply(Some("partial answer")), "partial answer");

        let transport = AssistantFailure::classify(&CodebridgeError::network("refused"));
        assert_eq!(transport, AssistantFailure::Transport);
        assert_eq!(transport.reply(Some("ignored")), TRANSPORT_ERROR);
    }
}
