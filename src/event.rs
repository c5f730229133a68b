use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Reads terminal input on a background thread so the UI thread only
/// ever sees discrete events, one at a time.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                let next = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        // Repeat and Release would double-submit answers
                        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(AppEvent::Key(key))
                        }
                        Ok(Event::Resize(_, _)) => Some(AppEvent::Resize),
                        _ => None,
                    }
                } else {
                    Some(AppEvent::Tick)
                };

                if let Some(app_event) = next {
                    if tx.send(app_event).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
