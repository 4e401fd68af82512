pub mod pomodoro;
pub mod runtime;
pub mod ui;

use crate::{
    pomodoro::{Mode, Timer},
    runtime::{Event, EventBus, TickDriver, TICK_PERIOD},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

/// minimal pomodoro timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal pomodoro timer for the terminal. Three fixed presets (Focus 25m, Short Break 5m, Long Break 15m), start/pause/reset, nothing else."
)]
pub struct Cli {}

#[derive(Debug)]
pub struct App {
    pub timer: Timer,
}

impl App {
    pub fn new() -> Self {
        Self {
            timer: Timer::new(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let _cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let bus = EventBus::with_input_reader();
    let mut driver = TickDriver::new(bus.sender(), TICK_PERIOD);

    terminal.draw(|f| draw(app, f))?;

    loop {
        match bus.recv()? {
            Event::Tick => {
                app.timer.tick();
                sync_driver(app, &mut driver);
            }
            Event::Resize => {}
            Event::Key(key) => {
                if handle_key(app, key) {
                    break;
                }
                sync_driver(app, &mut driver);
            }
        }
        terminal.draw(|f| draw(app, f))?;
    }

    Ok(())
}

/// Keeps the tick driver armed exactly while the timer is running. Every
/// transition to idle, including tick-driven expiry, disarms here.
fn sync_driver(app: &App, driver: &mut TickDriver) {
    if app.timer.is_running() {
        if !driver.is_armed() {
            driver.arm();
        }
    } else {
        driver.disarm();
    }
}

/// Applies one key press to the timer. Returns true when the app should
/// quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('q') => return true,
        KeyCode::Char(' ') => app.timer.toggle(),
        KeyCode::Char('r') => app.timer.reset(),
        KeyCode::Char('1') => app.timer.switch_mode(Mode::Focus),
        KeyCode::Char('2') => app.timer.switch_mode(Mode::ShortBreak),
        KeyCode::Char('3') => app.timer.switch_mode(Mode::LongBreak),
        KeyCode::Tab => {
            let next = app.timer.mode.next();
            app.timer.switch_mode(next);
        }
        _ => {}
    }
    false
}

fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cli_takes_no_options() {
        let cli = Cli::parse_from(["tomate"]);
        assert!(format!("{:?}", cli).contains("Cli"));

        // anything beyond the standard flags is rejected
        assert!(Cli::try_parse_from(["tomate", "--minutes", "30"]).is_err());
    }

    #[test]
    fn test_app_initial_state() {
        let app = App::new();
        assert_eq!(app.timer.mode, Mode::Focus);
        assert_eq!(app.timer.minutes, 25);
        assert_eq!(app.timer.seconds, 0);
        assert!(!app.timer.running);
    }

    #[test]
    fn test_space_toggles() {
        let mut app = App::new();

        assert!(!handle_key(&mut app, key(KeyCode::Char(' '))));
        assert!(app.timer.running);

        assert!(!handle_key(&mut app, key(KeyCode::Char(' '))));
        assert!(!app.timer.running);
    }

    #[test]
    fn test_r_resets() {
        let mut app = App::new();
        app.timer.toggle();
        app.timer.tick();
        app.timer.tick();

        handle_key(&mut app, key(KeyCode::Char('r')));
        assert_eq!(app.timer.minutes, 25);
        assert_eq!(app.timer.seconds, 0);
        assert!(!app.timer.running);
    }

    #[test]
    fn test_number_keys_select_modes() {
        let mut app = App::new();

        handle_key(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.timer.mode, Mode::ShortBreak);
        assert_eq!(app.timer.minutes, 5);

        handle_key(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.timer.mode, Mode::LongBreak);
        assert_eq!(app.timer.minutes, 15);

        handle_key(&mut app, key(KeyCode::Char('1')));
        assert_eq!(app.timer.mode, Mode::Focus);
        assert_eq!(app.timer.minutes, 25);
    }

    #[test]
    fn test_tab_cycles_modes() {
        let mut app = App::new();

        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.timer.mode, Mode::ShortBreak);

        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.timer.mode, Mode::LongBreak);

        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.timer.mode, Mode::Focus);
    }

    #[test]
    fn test_switch_while_running_pauses() {
        let mut app = App::new();
        app.timer.toggle();

        handle_key(&mut app, key(KeyCode::Char('2')));
        assert!(!app.timer.running);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))));
        assert!(handle_key(&mut app, key(KeyCode::Esc)));
        assert!(handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));

        // other keys are ignored
        assert!(!handle_key(&mut app, key(KeyCode::Char('x'))));
        assert_eq!(app.timer, Timer::new());
    }

    #[test]
    fn test_sync_driver_follows_running_flag() {
        let bus = EventBus::new();
        let mut driver = TickDriver::new(bus.sender(), Duration::from_secs(1));
        let mut app = App::new();

        sync_driver(&app, &mut driver);
        assert!(!driver.is_armed());

        app.timer.toggle();
        sync_driver(&app, &mut driver);
        assert!(driver.is_armed());

        // running and already armed: stays armed, no re-arm churn
        sync_driver(&app, &mut driver);
        assert!(driver.is_armed());

        app.timer.toggle();
        sync_driver(&app, &mut driver);
        assert!(!driver.is_armed());
    }

    #[test]
    fn test_expiry_disarms_driver() {
        let bus = EventBus::new();
        let mut driver = TickDriver::new(bus.sender(), Duration::from_secs(1));
        let mut app = App::new();

        app.timer = Timer {
            mode: Mode::ShortBreak,
            minutes: 0,
            seconds: 1,
            running: true,
        };
        sync_driver(&app, &mut driver);
        assert!(driver.is_armed());

        app.timer.tick(); // 0:00, still running
        sync_driver(&app, &mut driver);
        assert!(driver.is_armed());

        app.timer.tick(); // expiry: stop and rearm to preset
        sync_driver(&app, &mut driver);
        assert!(!driver.is_armed());
        assert_eq!(app.timer.minutes, 5);
        assert!(!app.timer.running);
    }

    #[test]
    fn test_draw_renders_via_widget() {
        use ratatui::backend::TestBackend;

        let app = App::new();
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| draw(&app, f)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("Focus"));
    }
}
