use std::io::BufRead;
use std::thread;

use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// One device-orientation event.
///
/// `alpha` is the generic orientation field. Some platforms also report a
/// true-north compass heading, which wins whenever it is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct HeadingReading {
    #[serde(default)]
    pub alpha: Option<f64>,
    #[serde(default, rename = "webkitCompassHeading", alias = "compassHeading")]
    pub compass_heading: Option<f64>,
}

impl HeadingReading {
    pub fn from_alpha(alpha: f64) -> Self {
        Self {
            alpha: Some(alpha),
            compass_heading: None,
        }
    }

    pub fn heading(&self) -> Option<f64> {
        self.compass_heading
            .filter(|h| h.is_finite())
            .or(self.alpha.filter(|h| h.is_finite()))
            .map(|h| h.rem_euclid(360.0))
    }

    /// Parses a bare number (taken as `alpha`) or a JSON object.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if let Ok(alpha) = line.parse::<f64>() {
            return Some(Self::from_alpha(alpha));
        }
        serde_json::from_str(line).ok()
    }
}

/// Push-based heading stream.
pub trait HeadingSource {
    fn subscribe(&mut self) -> HeadingSubscription;
}

/// Live subscription to a heading stream. Readings arrive in order; call
/// [`HeadingSubscription::unsubscribe`] once the needle is no longer shown.
///
/// Closing the receiver is the whole unsubscribe: the producer sees its next
/// send fail and stops.
pub struct HeadingSubscription {
    rx: mpsc::Receiver<HeadingReading>,
}

impl HeadingSubscription {
    pub fn new(rx: mpsc::Receiver<HeadingReading>) -> Self {
        Self { rx }
    }

    /// A subscription that ends immediately, used when no sensor is present.
    pub fn closed() -> Self {
        let (_, rx) = mpsc::channel(1);
        Self { rx }
    }

    pub async fn next(&mut self) -> Option<HeadingReading> {
        self.rx.recv().await
    }

    pub fn unsubscribe(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.rx.close();
    }
}

impl Drop for HeadingSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Reads one heading per line from any buffered reader (stdin in the CLI).
///
/// Lines are read on a dedicated OS thread, so a reader parked in a blocking
/// read never holds up runtime shutdown. After unsubscribe the thread exits at
/// its next line or at end of input, whichever comes first; a process that
/// returns from `main` in the meantime does not wait for it.
pub struct LineHeadingSource<R> {
    reader: Option<R>,
}

impl<R> LineHeadingSource<R>
where
    R: BufRead + Send + 'static,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
        }
    }
}

impl<R> HeadingSource for LineHeadingSource<R>
where
    R: BufRead + Send + 'static,
{
    /// The underlying reader can only be consumed once; later calls get a
    /// closed subscription.
    fn subscribe(&mut self) -> HeadingSubscription {
        let Some(reader) = self.reader.take() else {
            return HeadingSubscription::closed();
        };

        let (tx, rx) = mpsc::channel(64);
        let spawned = thread::Builder::new()
            .name("heading-reader".into())
            .spawn(move || {
                for line in reader.lines() {
                    let line = match line {
                        Ok(line) => line,
                        Err(e) => {
                            debug!("Heading stream closed: {}", e);
                            break;
                        }
                    };
                    match HeadingReading::parse(&line) {
                        Some(reading) => {
                            if tx.blocking_send(reading).is_err() {
                                break;
                            }
                        }
                        None => debug!("Skipping unparseable heading line: {:?}", line),
                    }
                }
            });

        match spawned {
            Ok(_) => HeadingSubscription::new(rx),
            Err(e) => {
                warn!("Failed to start heading reader: {}", e);
                HeadingSubscription::closed()
            }
        }
    }
}
