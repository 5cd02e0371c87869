//! Indeterminate progress line shown while a request is outstanding.
//!
//! The ticker is spawned next to the awaited request and stopped as soon as
//! the request resolves. If the caller drops the future (Ctrl+C), the drop
//! guard cancels the ticker as well.

use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

pub const CHAT_STATUS_PHRASES: &[&str] = &[
    "Thinking it through",
    "Checking market data",
    "Reviewing enrollment rules",
    "Consulting the journey playbook",
    "Putting it together",
];

pub const JOURNEY_STATUS_PHRASES: &[&str] = &[
    "Building your journey",
    "Profiling the target market",
    "Sequencing touchpoints",
    "Balancing channels",
    "Finalizing the flowchart",
];

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const TICK: Duration = Duration::from_millis(100);
const TICKS_PER_PHRASE: usize = 25;

pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

#[derive(Clone)]
pub struct StatusPresenter {
    sink: Option<SharedWriter>,
}

impl StatusPresenter {
    /// Draw on stderr when it is a terminal; otherwise stay silent.
    pub fn stderr() -> Self {
        if io::stderr().is_terminal() {
            let sink: SharedWriter = Arc::new(Mutex::new(io::stderr()));
            Self { sink: Some(sink) }
        } else {
            Self::disabled()
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn with_writer(sink: SharedWriter) -> Self {
        Self { sink: Some(sink) }
    }

    /// Await `future` while a spinner rotates through `phrases`.
    pub async fn run<F>(&self, phrases: &'static [&'static str], future: F) -> F::Output
    where
        F: Future,
    {
        let Some(sink) = self.sink.clone() else {
            return future.await;
        };

        let token = CancellationToken::new();
        let start = random_index(phrases.len());
        let ticker = tokio::spawn(tick(token.clone(), sink, phrases, start));
        let guard = token.drop_guard();

        let output = future.await;

        let token = guard.disarm();
        token.cancel();
        let _ = ticker.await;
        output
    }
}

async fn tick(
    token: CancellationToken,
    sink: SharedWriter,
    phrases: &'static [&'static str],
    start: usize,
) {
    let mut interval = tokio::time::interval(TICK);
    let mut frame = 0_usize;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                let line = status_line(phrases, start, frame);
                if let Ok(mut out) = sink.lock() {
                    let _ = write!(out, "\r\x1b[K{line}");
                    let _ = out.flush();
                }
                frame += 1;
            }
        }
    }

    if let Ok(mut out) = sink.lock() {
        let _ = write!(out, "\r\x1b[K");
        let _ = out.flush();
    }
}

fn status_line(phrases: &[&str], start: usize, frame: usize) -> String {
    let glyph = SPINNER_FRAMES[frame % SPINNER_FRAMES.len()];
    if phrases.is_empty() {
        return glyph.to_string();
    }
    let phrase = phrases[(start + frame / TICKS_PER_PHRASE) % phrases.len()];
    format!("{glyph} {phrase}...")
}

pub(crate) fn random_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    getrandom::u32().map(|n| n as usize % len).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> (Arc<Mutex<Vec<u8>>>, StatusPresenter) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink: SharedWriter = buffer.clone();
        (buffer, StatusPresenter::with_writer(sink))
    }

    fn written(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn phrases_rotate_every_few_seconds() {
        let phrases = &["one", "two"];
        assert_eq!(status_line(phrases, 0, 0), "⠋ one...");
        assert!(status_line(phrases, 0, TICKS_PER_PHRASE - 1).ends_with("one..."));
        assert!(status_line(phrases, 0, TICKS_PER_PHRASE).ends_with("two..."));
        assert!(status_line(phrases, 1, 0).ends_with("two..."));
    }

    #[tokio::test]
    async fn ticker_stops_when_request_resolves() {
        let (buffer, presenter) = capture();

        let value = presenter
            .run(CHAT_STATUS_PHRASES, async {
                tokio::time::sleep(Duration::from_millis(250)).await;
                42
            })
            .await;
        assert_eq!(value, 42);

        let after_return = written(&buffer);
        assert!(after_return.contains("..."), "spinner should have drawn");
        assert!(after_return.ends_with("\r\x1b[K"), "line should be cleared");

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(written(&buffer), after_return, "ticker outlived the request");
    }

    #[tokio::test]
    async fn dropping_the_request_stops_the_ticker() {
        let (buffer, presenter) = capture();

        let result = tokio::time::timeout(
            Duration::from_millis(150),
            presenter.run(JOURNEY_STATUS_PHRASES, tokio::time::sleep(Duration::from_secs(30))),
        )
        .await;
        assert!(result.is_err());

        tokio::time::sleep(Duration::from_millis(150)).await;
        let settled = written(&buffer);
        assert!(settled.ends_with("\r\x1b[K"));
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(written(&buffer), settled);
    }

    #[tokio::test]
    async fn disabled_presenter_only_awaits() {
        let presenter = StatusPresenter::disabled();
        assert_eq!(presenter.run(CHAT_STATUS_PHRASES, async { "done" }).await, "done");
    }
}
