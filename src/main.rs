use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

use tabata::{
    app::{App, AppAction},
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore, MAX_TICK_MS, MIN_TICK_MS},
    controller::Controller,
    cues::{CueSink, Muted, TerminalBell},
    locale::Locale,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TimerEvent},
};

/// interval-workout timer: prepare, work and rest phases with a progress ring and audio cues
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal interval-workout timer. Runs a fixed plan of three exercise blocks with four sets each, short rests between sets and long rests between blocks. Countdowns are anchored on the wall clock, so they stay correct after the terminal is suspended or loses focus."
)]
pub struct Cli {
    /// language for all labels
    #[clap(short = 'l', long, value_enum)]
    locale: Option<Locale>,

    /// refresh interval in milliseconds
    #[clap(short = 't', long)]
    tick_ms: Option<u64>,

    /// disable the terminal bell cues
    #[clap(long)]
    mute: bool,

    /// disable the floating hearts shown on completion
    #[clap(long)]
    no_celebration: bool,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// log at debug level regardless of TABATA_LOG / RUST_LOG
    #[clap(long)]
    debug_log: bool,
}

impl Cli {
    /// Command line values win over the stored config
    fn merge(&self, stored: Config) -> Config {
        Config {
            locale: self.locale.unwrap_or(stored.locale),
            tick_ms: self
                .tick_ms
                .unwrap_or(stored.tick_ms)
                .clamp(MIN_TICK_MS, MAX_TICK_MS),
            sound: stored.sound && !self.mute,
            celebration: stored.celebration && !self.no_celebration,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    // logging is best effort: the timer runs without it
    let _log_guard = logging::init(&AppDirs::log_dir(), cli.debug_log).ok();

    let store = FileConfigStore::new();
    let config = cli.merge(store.load());
    if cli.save_config {
        store.save(&config)?;
    }
    tracing::info!(?config, "starting");

    let cues: Box<dyn CueSink> = if config.sound {
        Box::new(TerminalBell)
    } else {
        Box::new(Muted)
    };
    let controller = Controller::new(config.locale, SystemClock, cues);
    let mut app = App::new(controller, config.celebration, config.clamped_tick_ms());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, config.clamped_tick_ms());
    app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        LeaveAlternateScreen,
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "terminal loop failed");
    }
    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<SystemClock, Box<dyn CueSink>>,
    tick_ms: u64,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::from_millis(tick_ms));

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let size = terminal.size()?;

        match runner.step() {
            TimerEvent::Tick => {
                // Draw on every tick while a countdown or animation is live
                let animating = app.is_animating();
                app.on_tick(size.width, size.height);
                if animating || app.is_animating() {
                    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                }
            }
            TimerEvent::FocusGained => {
                app.on_focus_gained(size.width, size.height);
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            TimerEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            TimerEvent::Disconnected => {
                tracing::warn!("terminal input closed, leaving");
                break;
            }
            TimerEvent::Key(key) => {
                if app.on_key(key, size.width, size.height) == AppAction::Quit {
                    break;
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["tabata"]);
        assert_eq!(cli.locale, None);
        assert_eq!(cli.tick_ms, None);
        assert!(!cli.mute);
        assert!(!cli.no_celebration);
        assert!(!cli.save_config);
        assert!(!cli.debug_log);
    }

    #[test]
    fn test_cli_locale() {
        let cli = Cli::parse_from(["tabata", "-l", "en"]);
        assert_eq!(cli.locale, Some(Locale::English));

        let cli = Cli::parse_from(["tabata", "--locale", "ru"]);
        assert_eq!(cli.locale, Some(Locale::Russian));
    }

    #[test]
    fn test_cli_rejects_unknown_locale() {
        assert!(Cli::try_parse_from(["tabata", "--locale", "de"]).is_err());
    }

    #[test]
    fn test_merge_keeps_stored_values_by_default() {
        let stored = Config {
            locale: Locale::English,
            tick_ms: 200,
            sound: true,
            celebration: true,
        };
        let merged = Cli::parse_from(["tabata"]).merge(stored.clone());
        assert_eq!(merged, stored);
    }

    #[test]
    fn test_merge_cli_overrides() {
        let cli = Cli::parse_from([
            "tabata",
            "-l",
            "ru",
            "-t",
            "5",
            "--mute",
            "--no-celebration",
        ]);
        let merged = cli.merge(Config {
            locale: Locale::English,
            ..Config::default()
        });
        assert_eq!(merged.locale, Locale::Russian);
        assert_eq!(merged.tick_ms, MIN_TICK_MS);
        assert!(!merged.sound);
        assert!(!merged.celebration);
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
