//! Timed on-screen messages
//!
//! Each message counts down independently and is dropped once its timer
//! reaches zero.

use std::collections::VecDeque;

/// A message with its remaining display time
#[derive(Debug, Clone, PartialEq)]
pub struct TimedMessage {
    pub text: String,
    pub remaining: f32,
}

impl TimedMessage {
    pub fn new(text: impl Into<String>, duration: f32) -> Self {
        Self {
            text: text.into(),
            remaining: duration,
        }
    }

    /// Advance the timer; returns whether the message is still visible
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining > 0.0
    }
}

/// FIFO of timed messages, oldest first
#[derive(Debug, Clone, Default)]
pub struct MessageQueue {
    messages: VecDeque<TimedMessage>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, duration: f32) {
        self.messages.push_back(TimedMessage::new(text, duration));
    }

    /// Advance every timer and drop expired messages
    pub fn tick(&mut self, dt: f32) {
        self.messages.retain_mut(|message| message.tick(dt));
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
