mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keyrace::config::{Config, ConfigStore, FileConfigStore};
use keyrace::events::{sound_cue, RaceListener, SoundCue};
use keyrace::language::SentencePool;
use keyrace::race::{Phase, RaceSession, StartError, DEFAULT_BOTS};
use keyrace::results::ResultLog;
use keyrace::runtime::{CrosstermEventSource, DriverEvent, Runner};
use keyrace::TICK_RATE_MS;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

/// terminal typing race against simulated rivals
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Race a handful of simulated rivals to transcribe a sentence: live wpm, ranked finishes, and per-language sentence pools."
)]
pub struct Cli {
    /// language to race in
    #[clap(short = 'l', long, value_enum, default_value_t = RaceLanguage::En)]
    language: RaceLanguage,

    /// number of simulated rivals
    #[clap(short = 'b', long, default_value_t = DEFAULT_BOTS)]
    bots: usize,

    /// seed for sentence selection and bot pacing
    #[clap(long)]
    seed: Option<u64>,

    /// disable sound cues
    #[clap(long)]
    mute: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum RaceLanguage {
    En,
    Es,
}

impl RaceLanguage {
    fn code(&self) -> String {
        self.to_string().to_lowercase()
    }
}

pub struct App {
    pub session: RaceSession,
    pub language: String,
    pub sound: bool,
    pub last_cue: Option<SoundCue>,
    pub notice: Option<String>,
}

impl App {
    pub fn new(cli: &Cli, config: &Config) -> Self {
        let rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let session = RaceSession::with_rng(SentencePool::embedded(), config.bots, rng);

        Self {
            session,
            language: config.language.clone(),
            sound: config.sound,
            last_cue: None,
            notice: None,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    config.language = cli.language.code();
    config.bots = cli.bots;
    if cli.mute {
        config.sound = false;
    }
    let _ = store.save(&config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&cli, &config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let source = CrosstermEventSource::new();
    let runner = Runner::new(source, Duration::from_millis(TICK_RATE_MS));
    let mut results = ResultLog::new();

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            DriverEvent::Tick => app.session.tick(),
            DriverEvent::Resize => {}
            DriverEvent::Key(key) => {
                if !handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        for event in app.session.drain_events() {
            if app.sound {
                if let Some(cue) = sound_cue(&event) {
                    app.last_cue = Some(cue);
                }
            }
            results.on_event(&event);
        }
    }
}

/// Returns false when the app should exit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return false;
    }

    match key.code {
        KeyCode::Esc => match app.session.phase {
            Phase::Racing => app.session.abort(),
            _ => return false,
        },
        KeyCode::Enter => {
            if app.session.phase != Phase::Racing {
                app.notice = None;
                app.last_cue = None;
                app.session.reset();
                match app.session.start(&app.language) {
                    Ok(()) => {}
                    Err(StartError::NotAuthorized) => {
                        app.notice = Some("Sign in to race".to_string());
                    }
                    Err(StartError::EmptyPool(e)) => {
                        app.notice = Some(e.to_string());
                    }
                }
            }
        }
        KeyCode::Tab => {
            if app.session.phase != Phase::Racing {
                app.language = if app.language == "en" {
                    "es".to_string()
                } else {
                    "en".to_string()
                };
                app.session.set_language(&app.language);
            }
        }
        KeyCode::Backspace => {
            if app.session.phase == Phase::Racing {
                let mut buf = app.session.typed.clone();
                buf.pop();
                app.session.keystroke(&buf);
            }
        }
        KeyCode::Char(c) => {
            if app.session.phase == Phase::Racing {
                let mut buf = app.session.typed.clone();
                buf.push(c);
                app.session.keystroke(&buf);
            }
        }
        _ => {}
    }

    true
}
