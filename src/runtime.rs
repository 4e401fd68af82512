use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Countdown cadence. One tick per elapsed second.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Unified event type consumed by the app loop
#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Single channel all event producers (keyboard reader, tick driver) feed
/// into. The app loop owns the receiving end and is the only consumer, so
/// state transitions never overlap.
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl EventBus {
    /// Bus with no producers attached. Tests and headless drivers push
    /// events through `sender()`.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Bus with a crossterm input reader thread attached.
    pub fn with_input_reader() -> Self {
        let bus = Self::new();

        let tx = bus.tx.clone();
        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(Event::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(Event::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        bus
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Blocks until the next event. There is no timeout path in the app
    /// loop: while the timer is paused and no keys arrive, nothing needs
    /// redrawing.
    pub fn recv(&self) -> Result<Event, RecvError> {
        self.rx.recv()
    }

    /// Bounded receive for headless drivers that must not block forever.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellation handle for one spawned ticker thread. Dropping cancels.
struct TickHandle {
    cancelled: Arc<AtomicBool>,
}

impl TickHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Owned periodic ticker feeding `Event::Tick` into the bus while armed.
///
/// At most one ticker thread is live at a time: `arm` cancels any previous
/// handle before spawning, so re-arming can never double-decrement the
/// countdown. Whoever flips the timer's running flag owns arming and
/// disarming this driver.
pub struct TickDriver {
    tx: Sender<Event>,
    period: Duration,
    handle: Option<TickHandle>,
}

impl TickDriver {
    pub fn new(tx: Sender<Event>, period: Duration) -> Self {
        Self {
            tx,
            period,
            handle: None,
        }
    }

    /// Starts the periodic ticker. Idempotent: a live ticker is cancelled
    /// before the replacement is spawned.
    pub fn arm(&mut self) {
        self.disarm();

        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let tx = self.tx.clone();
        let period = self.period;

        thread::spawn(move || loop {
            thread::sleep(period);
            if flag.load(Ordering::Relaxed) {
                break;
            }
            if tx.send(Event::Tick).is_err() {
                break;
            }
        });

        self.handle = Some(TickHandle { cancelled });
    }

    /// Cancels the live ticker, if any.
    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.disarm();
    }
}
