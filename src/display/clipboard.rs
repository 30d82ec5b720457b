//! Copy-to-clipboard and the transient "copied" acknowledgment.

use crate::session::GenerationState;
use arboard::Clipboard;
use std::sync::{mpsc, Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// How long the "copied" acknowledgment stays up.
pub const COPY_REVERT_DELAY: Duration = Duration::from_millis(2000);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Failed to copy text: {0}")]
    Unavailable(String),
}

/// Port for writing to the system clipboard.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Arboard-backed system clipboard.
pub struct ArboardClipboard {
    clipboard: Clipboard,
}

impl ArboardClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let clipboard = Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { clipboard })
    }
}

impl ClipboardWriter for ArboardClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

type Job = (String, mpsc::Sender<Result<(), ClipboardError>>);

/// Keeps one clipboard open for the life of the app.
///
/// On X11 the copied text is served by the process that set it, so the
/// clipboard must outlive the copy command. The clipboard is opened lazily
/// on a dedicated thread and reopened if opening failed.
pub struct ClipboardOwner {
    jobs: Mutex<mpsc::Sender<Job>>,
}

impl ClipboardOwner {
    /// Owner backed by the system clipboard.
    pub fn system() -> Self {
        Self::spawn(ArboardClipboard::new)
    }

    pub fn spawn<C, F>(open: F) -> Self
    where
        C: ClipboardWriter + 'static,
        F: Fn() -> Result<C, ClipboardError> + Send + 'static,
    {
        let (jobs, rx) = mpsc::channel::<Job>();
        let spawned = thread::Builder::new()
            .name("clipboard".into())
            .spawn(move || {
                let mut clipboard: Option<C> = None;
                for (text, reply) in rx {
                    let result = match clipboard.as_mut() {
                        Some(c) => c.write_text(&text),
                        None => open().and_then(|c| clipboard.insert(c).write_text(&text)),
                    };
                    let _ = reply.send(result);
                }
                debug!("Clipboard owner stopped");
            });
        if let Err(e) = spawned {
            warn!(error = %e, "Failed to start clipboard thread");
        }
        Self {
            jobs: Mutex::new(jobs),
        }
    }

    /// Handle that writes through the long-lived clipboard.
    pub fn writer(&self) -> OwnedClipboard {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        OwnedClipboard { jobs }
    }
}

pub struct OwnedClipboard {
    jobs: mpsc::Sender<Job>,
}

impl ClipboardWriter for OwnedClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let (reply, result) = mpsc::channel();
        let stopped = || ClipboardError::Unavailable("clipboard thread is not running".into());
        self.jobs
            .send((text.to_string(), reply))
            .map_err(|_| stopped())?;
        result.recv().map_err(|_| stopped())?
    }
}

#[derive(Debug, Default)]
struct IndicatorState {
    copied: bool,
    token: u64,
}

/// Tracks whether the "copied" badge is showing.
///
/// Every copy bumps a token; a scheduled revert only clears the badge if no
/// newer copy happened in the meantime.
#[derive(Debug)]
pub struct CopyIndicator {
    state: Mutex<IndicatorState>,
    delay: Duration,
}

impl CopyIndicator {
    pub fn new() -> Self {
        Self::with_delay(COPY_REVERT_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            state: Mutex::new(IndicatorState::default()),
            delay,
        }
    }

    fn lock(&self) -> MutexGuard<'_, IndicatorState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn is_copied(&self) -> bool {
        self.lock().copied
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn mark(&self) -> u64 {
        let mut state = self.lock();
        state.copied = true;
        state.token += 1;
        state.token
    }

    /// Clears the badge if `token` is still the latest copy.
    pub fn revert(&self, token: u64) -> bool {
        let mut state = self.lock();
        if state.token == token && state.copied {
            state.copied = false;
            true
        } else {
            false
        }
    }
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes the currently displayed result to `clipboard`.
///
/// Returns the indicator token for the copy, or `None` when there is no
/// result on screen.
pub fn copy_result<C: ClipboardWriter + ?Sized>(
    clipboard: &mut C,
    state: &GenerationState,
    indicator: &CopyIndicator,
) -> Result<Option<u64>, ClipboardError> {
    let Some(text) = state.lyrics() else {
        debug!("Nothing to copy");
        return Ok(None);
    };

    clipboard.write_text(text).map_err(|e| {
        warn!(error = %e, "Clipboard write failed");
        e
    })?;

    Ok(Some(indicator.mark()))
}

/// Reverts the badge after the indicator's delay, then runs `on_revert` if
/// this copy was still the latest one.
pub fn schedule_revert<F>(indicator: Arc<CopyIndicator>, token: u64, on_revert: F)
where
    F: FnOnce() + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(indicator.delay()).await;
        if indicator.revert(token) {
            on_revert();
        }
    });
}
