//! The assistant chat, shared by the sidebar assistant and the helpline.

use super::paint;
use crate::document::{self, classes, mounts, SharedDocument};
use crate::markup::{escape_html, markdown_lite, templates};
use codebridge_core::chat::{ChatMessage, ChatRole, SharedTranscript, ThinkingGuard, Transcript};
use codebridge_core::Result;
use minijinja::context;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Serialize)]
struct MessageView<'a> {
    role: &'static str,
    html: String,
    time: &'a str,
}

impl<'a> From<&'a ChatMessage> for MessageView<'a> {
    fn from(message: &'a ChatMessage) -> Self {
        let (role, html) = match message.role {
            ChatRole::User => ("user", escape_html(&message.content)),
            ChatRole::Assistant => ("ai", markdown_lite(&message.content)),
        };
        Self {
            role,
            html,
            time: &message.timestamp_label,
        }
    }
}

fn render_transcript(document: &SharedDocument, transcript: &SharedTranscript) {
    let transcript = transcript
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    let messages: Vec<MessageView<'_>> =
        transcript.messages().iter().map(MessageView::from).collect();
    paint(
        document,
        mounts::CHAT,
        templates::CHAT_TRANSCRIPT,
        context! { messages, thinking => transcript.is_thinking() },
    );
}

/// A question waiting for its reply.
///
/// Dropping it unanswered removes the thinking indicator from the chat
/// markup as well as from the transcript.
pub struct PendingQuestion {
    guard: Option<ThinkingGuard>,
    document: SharedDocument,
    transcript: SharedTranscript,
}

impl std::fmt::Debug for PendingQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingQuestion")
            .field("answered", &self.guard.is_none())
            .finish()
    }
}

impl Drop for PendingQuestion {
    fn drop(&mut self) {
        if let Some(guard) = self.guard.take() {
            drop(guard);
            render_transcript(&self.document, &self.transcript);
        }
    }
}

pub struct AssistantPanel {
    document: SharedDocument,
    transcript: SharedTranscript,
}

impl AssistantPanel {
    pub fn new(document: SharedDocument) -> Self {
        Self {
            document,
            transcript: Arc::new(Mutex::new(Transcript::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Transcript> {
        self.transcript.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mount(&self) {
        self.render();
    }

    pub fn transcript(&self) -> SharedTranscript {
        Arc::clone(&self.transcript)
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().messages().to_vec()
    }

    pub fn is_thinking(&self) -> bool {
        self.lock().is_thinking()
    }

    pub fn render(&self) {
        render_transcript(&self.document, &self.transcript);
    }

    /// Appends the learner's question and shows the thinking indicator.
    ///
    /// Fails with `Busy` while an earlier question is unanswered.
    pub fn begin_question(&self, question: &str) -> Result<PendingQuestion> {
        let guard = ThinkingGuard::begin(&self.transcript)?;
        self.lock().push(ChatMessage::user(question));
        self.render();
        Ok(PendingQuestion {
            guard: Some(guard),
            document: Arc::clone(&self.document),
            transcript: Arc::clone(&self.transcript),
        })
    }

    /// Replaces the thinking indicator with the assistant's reply.
    pub fn finish(&self, mut pending: PendingQuestion, reply: &str) {
        if let Some(guard) = pending.guard.take() {
            guard.complete(ChatMessage::assistant(reply));
        }
        self.render();
    }

    pub fn clear(&self) {
        self.lock().clear();
        self.render();
    }

    /// Shows or hides the helpline. Returns whether it is visible afterwards.
    pub fn toggle(&self) -> bool {
        document::lock(&self.document)
            .toggle_class(mounts::HELPLINE, classes::ACTIVE)
            .unwrap_or(false)
    }
}
