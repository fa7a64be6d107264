//! Transient on-screen message queues.
//!
//! Unlike a scrolling log, these are strict FIFO: one message visible at a
//! time, each shown for its full duration before the next appears, no matter
//! how many handlers pushed in the same frame. The game keeps two instances —
//! player-facing messages ("Locked.") and hints ("The combination must be
//! written down somewhere…").

use std::collections::VecDeque;

/// Duration used by [`MessageQueue::push_default`].
pub const DEFAULT_MESSAGE_SECS: f32 = 3.0;

#[derive(Debug, Clone)]
struct Message {
    text: String,
    duration: f32,
}

/// Strict FIFO queue of timed messages, drained by the frame loop.
#[derive(Debug, Default)]
pub struct MessageQueue {
    pending: VecDeque<Message>,
    current: Option<Message>,
    /// Seconds the current message has left on screen.
    remaining: f32,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for `duration` seconds. If nothing is visible it
    /// appears immediately; otherwise it waits its turn.
    pub fn push(&mut self, text: impl Into<String>, duration: f32) {
        let msg = Message {
            text: text.into(),
            duration: duration.max(0.0),
        };
        if self.current.is_none() {
            self.remaining = msg.duration;
            self.current = Some(msg);
        } else {
            self.pending.push_back(msg);
        }
    }

    /// Queue a message with the default duration.
    pub fn push_default(&mut self, text: impl Into<String>) {
        self.push(text, DEFAULT_MESSAGE_SECS);
    }

    /// Advance the visible message's timer, promoting the next queued
    /// message when the current one expires.
    pub fn update(&mut self, dt: f32) {
        if self.current.is_none() {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.current = self.pending.pop_front();
            self.remaining = self.current.as_ref().map_or(0.0, |m| m.duration);
        }
    }

    /// The message currently on screen, if any.
    pub fn visible(&self) -> Option<&str> {
        self.current.as_ref().map(|m| m.text.as_str())
    }

    /// True if neither a visible message nor queued messages remain.
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.pending.is_empty()
    }

    /// Number of messages waiting behind the visible one.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three same-frame pushes drain in call order, one at a time, for a
    /// total visible time equal to the summed durations.
    #[test]
    fn fifo_order_and_non_overlap() {
        let mut queue = MessageQueue::new();
        queue.push("first", 0.10);
        queue.push("second", 0.20);
        queue.push("third", 0.05);

        let step = 0.01;
        let mut shown: Vec<String> = Vec::new();
        let mut visible_ticks = 0u32;
        for _ in 0..100 {
            if let Some(text) = queue.visible() {
                visible_ticks += 1;
                if shown.last().map(String::as_str) != Some(text) {
                    shown.push(text.to_string());
                }
            }
            queue.update(step);
        }

        assert_eq!(shown, vec!["first", "second", "third"]);
        assert!(queue.is_idle());
        // 0.35s total at 0.01s ticks, allow one tick of slack per transition
        let total = visible_ticks as f32 * step;
        assert!((total - 0.35).abs() <= 0.03, "visible for {}s", total);
    }

    /// A push while idle is visible immediately, without waiting a frame.
    #[test]
    fn push_while_idle_is_immediate() {
        let mut queue = MessageQueue::new();
        assert!(queue.visible().is_none());
        queue.push_default("hello");
        assert_eq!(queue.visible(), Some("hello"));
    }

    /// Updating an empty queue is a no-op.
    #[test]
    fn update_empty_queue() {
        let mut queue = MessageQueue::new();
        queue.update(1.0);
        assert!(queue.is_idle());
    }
}
