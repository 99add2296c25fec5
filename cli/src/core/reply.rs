//! # Delayed Bot Replies
//!
//! File: cli/src/core/reply.rs
//!
//! ## Overview
//!
//! The chat widget never shows the bot reply in the same instant as the user
//! message. The caller computes the answer synchronously, then hands it to a
//! `DelayedReply`, which releases it after the configured "typing" delay.
//!
//! A pending reply can be cancelled explicitly, and is cancelled when its handle
//! is dropped, so ending a session mid-delay never leaks a late message.
//!
//! ## Examples
//!
//! ```rust
//! let answer = responder.respond(&input).to_string();
//! let mut reply = DelayedReply::schedule(answer, Duration::from_millis(500));
//! if let Some(text) = reply.delivered().await {
//!     session.push_bot(&text);
//! }
//! ```
//!
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct DelayedReply {
    /// `None` once the reply was taken or the timer is known to be gone.
    rx: Option<oneshot::Receiver<String>>,
    timer: JoinHandle<()>,
}

impl DelayedReply {
    /// Spawns the one-shot timer. Must be called inside a tokio runtime.
    pub fn schedule(answer: String, delay: Duration) -> Self {
        let (tx, rx) = oneshot::channel();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session ended; nothing to deliver to.
            let _ = tx.send(answer);
        });
        debug!("Scheduled bot reply in {:?}", delay);
        Self {
            rx: Some(rx),
            timer,
        }
    }

    /// Takes the reply if the delay already elapsed, without waiting.
    /// A reply is handed out at most once.
    pub fn try_take(&mut self) -> Option<String> {
        let rx = self.rx.as_mut()?;
        match rx.try_recv() {
            Ok(text) => {
                self.rx = None;
                Some(text)
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.rx = None;
                None
            }
        }
    }

    /// Waits for the reply. `None` if the timer was cancelled first or the
    /// reply was already taken.
    pub async fn delivered(&mut self) -> Option<String> {
        let rx = self.rx.as_mut()?;
        let text = rx.await.ok();
        self.rx = None;
        text
    }

    pub fn cancel(&self) {
        if !self.timer.is_finished() {
            debug!("Cancelling pending bot reply");
        }
        self.timer.abort();
    }

    pub fn is_pending(&self) -> bool {
        !self.timer.is_finished()
    }
}

impl Drop for DelayedReply {
    fn drop(&mut self) {
        self.timer.abort();
    }
}
