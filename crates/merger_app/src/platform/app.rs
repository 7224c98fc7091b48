use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use merger_core::{update, AppState, Msg};
use merger_logging::{merger_debug, merger_info, merger_warn};

use super::config::{self, AppConfig, DEFAULT_CONFIG_FILE};
use super::effects::EffectRunner;
use super::input::{self, Command};
use super::{logging, ui};

/// Everything the main loop reacts to arrives on one channel.
pub enum AppEvent {
    Line(String),
    Msg(Msg),
    InputClosed,
}

pub fn run_app(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let (config, config_error) = match config::load(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    logging::initialize(config.log_destination);
    merger_info!("Starting pdf_merger with {}", config_path.display());
    if let Some(err) = &config_error {
        merger_warn!("{}; using defaults", err);
        eprintln!("Warning: {err}; using defaults");
    }

    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.engine_config(), app_tx.clone())
        .with_context(|| format!("cannot start the engine for {}", config.base_url))?;
    spawn_stdin_reader(app_tx);

    let mut app = App::new(runner);
    app.draw(&ui::render::render(&app.state.view()))?;

    while let Ok(event) = app_rx.recv() {
        let keep_running = match event {
            AppEvent::Line(line) => app.handle_line(&line)?,
            AppEvent::Msg(msg) => {
                app.dispatch(msg)?;
                true
            }
            AppEvent::InputClosed => false,
        };
        if !keep_running {
            break;
        }
    }

    merger_info!("Shutting down");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
    seq: u64,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            seq: 0,
        }
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> anyhow::Result<bool> {
        if self.state.clear_confirmation_pending() {
            self.dispatch(Msg::ClearConfirmed {
                accepted: input::is_yes(line),
            })?;
            return Ok(true);
        }

        match input::parse(line) {
            Ok(Command::Dispatch(msgs)) => {
                for msg in msgs {
                    self.dispatch(msg)?;
                }
            }
            Ok(Command::Redraw) => self.draw(&ui::render::render(&self.state.view()))?,
            Ok(Command::Help) => self.draw(&ui::render::help())?,
            Ok(Command::Quit) => return Ok(false),
            Err(err) => self.draw(&[err.to_string()])?,
        }
        Ok(true)
    }

    fn dispatch(&mut self, msg: Msg) -> anyhow::Result<()> {
        self.seq += 1;
        merger_logging::set_dispatch_seq(self.seq);
        merger_debug!("dispatch {:?}", msg);

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let redraw = state.consume_dirty();
        let view = redraw.then(|| state.view());
        self.state = state;

        self.runner.enqueue(effects);
        if let Some(view) = view {
            self.draw(&ui::render::render(&view))?;
        }
        Ok(())
    }

    fn draw(&self, lines: &[String]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out)?;
        for line in lines {
            writeln!(out, "{line}")?;
        }
        write!(out, "{}", ui::constants::PROMPT)?;
        out.flush().context("flush terminal")?;
        Ok(())
    }
}

fn spawn_stdin_reader(app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if app_tx.send(AppEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = app_tx.send(AppEvent::InputClosed);
    });
}
