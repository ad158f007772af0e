use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::Parser;
use rift_reflow::actor::screen_manager::{ScreenManager, sort_screen_managers};
use rift_reflow::common::collections::HashMap;
use rift_reflow::common::config::{Config, SharedConfig, config_file};
use rift_reflow::common::log;
use rift_reflow::model::Change;
use rift_reflow::model::script::{Command, Script, Step};
use rift_reflow::sys::executor::SerialExecutor;
use rift_reflow::sys::geometry::Rect;
use rift_reflow::sys::screen::{Screen, ScreenId};
use rift_reflow::sys::window::{WindowId, WindowSet, WindowsProvider};
use rift_reflow::ui::layout_hud::{DISPLAY_DURATION, LogPresenter};
use serde::Serialize;
use tracing::{debug, error, info, warn};

#[derive(Parser)]
struct Cli {
    /// Replay script to run.
    script: PathBuf,

    /// Configuration file to use instead of ~/.rift-reflow.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Check that the configuration and the script load, without replaying.
    #[arg(long)]
    validate: bool,
}

#[derive(Serialize)]
struct AppliedFrame {
    window: WindowId,
    frame: Rect,
}

#[derive(Serialize)]
struct Applied {
    screen: ScreenId,
    frames: Vec<AppliedFrame>,
}

/// Serves window snapshots from the script and prints every applied frame
/// set as one JSON line.
#[derive(Default)]
struct ScriptedWindows {
    windows: RefCell<HashMap<ScreenId, WindowSet>>,
}

impl ScriptedWindows {
    fn set(&self, screen: ScreenId, windows: WindowSet) {
        self.windows.borrow_mut().insert(screen, windows);
    }
}

impl WindowsProvider for ScriptedWindows {
    fn active_window_set(&self, screen: &Screen) -> WindowSet {
        self.windows.borrow().get(&screen.id).cloned().unwrap_or_default()
    }

    fn apply_frames(&self, screen: &Screen, frames: &[(WindowId, Rect)]) {
        let applied = Applied {
            screen: screen.id,
            frames: frames
                .iter()
                .map(|&(window, frame)| AppliedFrame { window, frame })
                .collect(),
        };
        match serde_json::to_string(&applied) {
            Ok(line) => println!("{line}"),
            Err(e) => error!("could not serialize frames: {e}"),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::read(path).with_context(|| format!("reading {}", path.display())),
        None if config_file().exists() => Config::read(&config_file())
            .with_context(|| format!("reading {}", config_file().display())),
        None => Ok(Config::default()),
    }
}

fn run_command(manager: &ScreenManager, command: &Command) {
    match command {
        Command::CycleForward => manager.cycle_layout_forward(),
        Command::CycleBackward => manager.cycle_layout_backward(),
        Command::Select(key) => manager.select_layout(key),
        Command::ShrinkMainPane => manager.shrink_main_pane(),
        Command::ExpandMainPane => manager.expand_main_pane(),
        Command::IncreaseMainPaneCount => manager.increase_main_pane_count(),
        Command::DecreaseMainPaneCount => manager.decrease_main_pane_count(),
        Command::ReloadConfig => manager.reload_configuration(),
        Command::ShowHud => manager.display_layout_hud(),
    }
    // Pane adjustments leave reflowing to whoever issued them.
    if matches!(
        command,
        Command::ShrinkMainPane
            | Command::ExpandMainPane
            | Command::IncreaseMainPaneCount
            | Command::DecreaseMainPaneCount
    ) {
        manager.set_needs_reflow(Change::Unknown);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let opt: Cli = Parser::parse();
    log::init_logging();

    let mut config = load_config(opt.config.as_ref())?;
    let issues = config.validate();
    for issue in &issues {
        warn!("config: {issue}");
    }
    let script = Script::read(&opt.script)?;

    if opt.validate {
        if !issues.is_empty() {
            bail!("configuration has {} issue(s)", issues.len());
        }
        info!(screens = script.screens.len(), steps = script.steps.len(), "script is valid");
        return Ok(());
    }

    let fixes = config.auto_fix_values();
    if fixes > 0 {
        info!(fixes, "fixed invalid configuration values");
    }
    let config = SharedConfig::new(config);

    let mut executor = SerialExecutor::new();
    let provider = Rc::new(ScriptedWindows::default());
    let presenter = Rc::new(LogPresenter);

    let mut managers: Vec<ScreenManager> = script
        .screens
        .iter()
        .map(|spec| {
            let screen = Screen::new(spec.id, spec.frame);
            provider.set(screen.id, spec.windows.clone());
            let manager = ScreenManager::new(
                screen,
                config.clone(),
                provider.clone(),
                executor.queue(),
                presenter.clone(),
            );
            let id = spec.id;
            manager.set_on_reflow_initiation(move || debug!(screen = id, "reflow started"));
            manager.set_on_reflow_completion(move || debug!(screen = id, "reflow finished"));
            if let Some(space) = spec.space {
                manager.update_space(space);
            }
            manager
        })
        .collect();
    sort_screen_managers(&mut managers);

    let find = |id: u32| managers.iter().find(|m| m.screen().id == ScreenId(id));
    for step in &script.steps {
        debug!(?step, "replaying");
        match step {
            Step::Change { screen, change } => {
                if let Some(manager) = find(*screen) {
                    manager.set_needs_reflow(*change);
                }
            }
            Step::Command { screen, command } => {
                if let Some(manager) = find(*screen) {
                    run_command(manager, command);
                }
            }
            Step::SetWindows { screen, windows } => provider.set(ScreenId(*screen), windows.clone()),
            Step::SetSpace { screen, space } => {
                if let Some(manager) = find(*screen) {
                    manager.update_space(*space);
                }
            }
            Step::SetTiling(enabled) => config.update(|c| c.settings.tiling_enabled = *enabled),
            Step::Drain => {
                executor.fire_timers_until(Instant::now() + DISPLAY_DURATION);
            }
        }
    }
    executor.fire_timers_until(Instant::now() + DISPLAY_DURATION);

    drop(managers);
    executor.run().await;
    Ok(())
}
