use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use std::thread;
use std::time::{Duration, Instant};
use todo_core::Key;
use tracing::{debug, error, info, trace, warn};

/// Event types for the TUI application
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press from the terminal
    Input(KeyEvent),

    /// The terminal window lost focus
    FocusLost,

    /// Terminal was resized
    Resize(u16, u16),

    /// Timer tick for UI updates
    Tick,

    /// User request to quit the application
    Quit,
}

/// Reads terminal events on a background thread and forwards them over a
/// channel to the main loop.
pub struct EventHandler {
    /// Channel for receiving events
    pub rx: Receiver<Event>,

    /// Channel for sending events
    pub tx: Sender<Event>,

    /// Tick rate for the event loop
    pub tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        debug!("Initializing TUI event handler");
        let (tx, rx) = crossbeam_channel::unbounded();
        let event_tx = tx.clone();

        info!(
            "Spawning event handling thread with tick rate of {}ms",
            tick_rate.as_millis()
        );
        thread::spawn(move || {
            let mut last_tick = Instant::now();

            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if let Ok(true) = crossterm::event::poll(timeout) {
                    match crossterm::event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            // Handle Ctrl+C specially for immediate exit
                            if key.code == KeyCode::Char('c')
                                && key.modifiers.contains(KeyModifiers::CONTROL)
                            {
                                let _ = event_tx.send(Event::Quit);
                                break;
                            }
                            trace!("Sending key event to main loop: {:?}", key);
                            if let Err(e) = event_tx.send(Event::Input(key)) {
                                error!("Failed to send key event: {}", e);
                                break;
                            }
                        }
                        Ok(CrosstermEvent::FocusLost) => {
                            if event_tx.send(Event::FocusLost).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Resize(width, height)) => {
                            if event_tx.send(Event::Resize(width, height)).is_err() {
                                break;
                            }
                        }
                        Ok(other) => trace!("Ignoring terminal event: {:?}", other),
                        Err(e) => warn!("Failed to read terminal event: {}", e),
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if event_tx.send(Event::Tick).is_err() {
                        // Channel closed, exit thread
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
            debug!("Event handling thread exiting");
        });

        Self { rx, tx, tick_rate }
    }

    /// Block until the next event arrives.
    pub fn next(&self) -> Result<Event> {
        let event = self.rx.recv()?;
        if !matches!(event, Event::Tick) {
            trace!("Received event: {:?}", event);
        }
        Ok(event)
    }

    /// Send an event to the channel
    pub fn send(&self, event: Event) -> Result<()> {
        self.tx.send(event)?;
        Ok(())
    }
}

/// Map a crossterm key event onto the keys the text fields understand.
///
/// Control and Alt chords become [`Key::Other`] so they never insert text.
pub fn to_key(event: &KeyEvent) -> Key {
    let chord = event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match event.code {
        KeyCode::Char(_) if chord => Key::Other,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        _ => Key::Other,
    }
}
