pub mod events;
pub mod state;
pub mod ui;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use todo_core::Config;
use tracing::{debug, info, warn};

use events::{to_key, Event, EventHandler};
use state::AppState;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub struct App {
    pub state: AppState,
    event_handler: EventHandler,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let state = AppState::new(&config.ui);
        let event_handler = EventHandler::new(Duration::from_millis(config.ui.tick_rate_ms));

        Ok(Self {
            state,
            event_handler,
        })
    }

    /// Take over the terminal and run until the user quits. The terminal is
    /// restored whether or not the loop fails.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal);
        result
    }

    fn event_loop(&mut self, terminal: &mut Term) -> Result<()> {
        terminal.draw(|f| ui::render(f, &self.state))?;

        while !self.state.should_quit {
            let redraw = match self.event_handler.next()? {
                Event::Input(key) => {
                    self.state.handle_key(to_key(&key));
                    true
                }
                Event::FocusLost => {
                    self.state.focus_lost();
                    true
                }
                Event::Resize(width, height) => {
                    debug!("Terminal resized to {}x{}", width, height);
                    true
                }
                Event::Tick => false,
                Event::Quit => {
                    info!("Quit requested");
                    self.state.should_quit = true;
                    false
                }
            };

            if redraw {
                terminal.draw(|f| ui::render(f, &self.state))?;
            }
        }

        Ok(())
    }
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableFocusChange) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Term) {
    let _ = terminal.show_cursor();

    if let Err(e) = execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        LeaveAlternateScreen
    ) {
        warn!("Failed to leave alternate screen: {}", e);
    }

    if let Err(e) = disable_raw_mode() {
        warn!("Failed to disable raw mode: {}", e);
    }
}
