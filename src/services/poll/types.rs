//! Poller types and events.

/// Lifecycle of a poller for one upload handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// No handle armed.
    Idle,
    /// Handle armed, text not available yet.
    Polling,
    /// Text extracted; polling for this handle has stopped for good.
    Done,
}

/// Events emitted while polling for extraction results.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// A GET against the results location is about to be issued
    AttemptStarted { attempt: u32 },
    /// The results exist but carry no text yet
    NotReady { attempt: u32 },
    /// The request or decode failed; treated like `NotReady`
    AttemptFailed { attempt: u32, error: String },
    /// Text is available
    Ready { attempt: u32, chars: usize },
    /// Polling was cancelled before text arrived
    Cancelled { attempts: u32 },
}
