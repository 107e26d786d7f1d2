use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use console_core::{update, AppState, AppViewModel, Msg};
use console_logging::console_info;
use crossterm::event;

use super::config::{Cli, ConsoleConfig};
use super::effects::EffectRunner;
use super::ui::keymap::{self, Action};
use super::{logging, terminal, ui};

/// How long to wait for terminal input before checking engine events.
const POLL_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app(cli: Cli) -> Result<()> {
    logging::initialize(&cli.log_file, &cli.log_level);
    let config = ConsoleConfig::load(&cli);
    console_info!(
        "Starting console backend={} download_dir={:?} poll={}s",
        config.base_url,
        config.download_dir,
        config.poll_interval_secs
    );

    let runner = EffectRunner::new(config.engine_config())
        .with_context(|| format!("cannot use backend {}", config.base_url))?;
    let console = Console::new(AppState::with_usage_panel(config.show_usage), runner);

    let mut term = terminal::init()?;
    let result = console.run(&mut term);
    terminal::restore(&mut term)?;
    result
}

struct Console {
    state: AppState,
    view: AppViewModel,
    runner: EffectRunner,
    usage_updated: Option<String>,
}

impl Console {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        let view = state.view();
        Self {
            state,
            view,
            runner,
            usage_updated: None,
        }
    }

    fn run(mut self, term: &mut terminal::Term) -> Result<()> {
        let mut redraw = true;
        loop {
            if redraw {
                term.draw(|frame| {
                    ui::render::render(frame, &self.view, self.usage_updated.as_deref())
                })?;
                redraw = false;
            }

            if event::poll(POLL_INTERVAL)? {
                match keymap::map_event(event::read()?, &self.view) {
                    Action::Quit => break,
                    Action::Dispatch(msg) => redraw |= self.dispatch(msg),
                    Action::Redraw => redraw = true,
                    Action::Ignore => {}
                }
            }

            for msg in self.runner.poll_messages() {
                redraw |= self.dispatch(msg);
            }
        }
        console_info!("Console closed");
        Ok(())
    }

    /// Applies one message and runs its effects. Returns whether the view changed.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let stats_refreshed = matches!(msg, Msg::StatsLoaded(_));
        if stats_refreshed {
            self.usage_updated = Some(Local::now().format("%H:%M:%S").to_string());
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.enqueue(effects);
        let changed = state.consume_dirty();
        if changed {
            self.view = state.view();
        }
        self.state = state;
        changed || stats_refreshed
    }
}
