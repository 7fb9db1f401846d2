use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::config::{
    Difficulty, GameOverAction, GridSize, MIN_GRID_HEIGHT, MIN_GRID_WIDTH,
};
use crate::error::ConfigError;

const APP_DIR_NAME: &str = "obstacle-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";
const LOG_FILE_NAME: &str = "obstacle-snake.log";

/// Command line flags. Anything given here wins over the settings file.
#[derive(Debug, Default, Parser)]
#[command(name = "obstacle-snake", version, about)]
pub struct Cli {
    /// Difficulty preselected in the menu (easy, medium, hard).
    #[arg(long, value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,

    /// Board width in cells.
    #[arg(long)]
    pub width: Option<u16>,

    /// Board height in cells.
    #[arg(long)]
    pub height: Option<u16>,

    /// Seed for obstacle and food placement.
    #[arg(long)]
    pub seed: Option<u64>,

    /// What to do after game over (menu, restart).
    #[arg(long = "on-game-over", value_parser = parse_game_over_action)]
    pub on_game_over: Option<GameOverAction>,

    /// Settings file to read instead of the per-user default.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Where to write the log.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long)]
    pub verbose: bool,

    /// Skip the menu and start playing right away.
    #[arg(long)]
    pub play: bool,
}

fn parse_difficulty(value: &str) -> Result<Difficulty, ConfigError> {
    value.parse()
}

fn parse_game_over_action(value: &str) -> Result<GameOverAction, ConfigError> {
    value.parse()
}

/// On-disk settings; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    difficulty: Option<Difficulty>,
    grid: Option<GridSize>,
    on_game_over: Option<GameOverAction>,
    seed: Option<u64>,
    log_file: Option<PathBuf>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub grid: GridSize,
    pub difficulty: Difficulty,
    pub on_game_over: GameOverAction,
    pub seed: Option<u64>,
    pub log_file: PathBuf,
    pub verbose: bool,
    pub skip_menu: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            difficulty: Difficulty::Medium,
            on_game_over: GameOverAction::default(),
            seed: None,
            log_file: default_log_path(),
            verbose: false,
            skip_menu: false,
        }
    }
}

impl Settings {
    /// Resolves defaults, then the settings file, then CLI flags.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => Some(read_settings_file(path)?),
            None => match default_settings_path() {
                Some(path) => read_settings_file_if_present(&path)?,
                None => None,
            },
        };

        let mut settings = Self::default();
        if let Some(file) = file {
            settings.apply_file(file);
        }
        settings.apply_cli(cli);
        settings.validate()?;

        Ok(settings)
    }

    fn apply_file(&mut self, file: SettingsFile) {
        if let Some(difficulty) = file.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(grid) = file.grid {
            self.grid = grid;
        }
        if let Some(action) = file.on_game_over {
            self.on_game_over = action;
        }
        if file.seed.is_some() {
            self.seed = file.seed;
        }
        if let Some(path) = file.log_file {
            self.log_file = path;
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(difficulty) = cli.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(width) = cli.width {
            self.grid.width = width;
        }
        if let Some(height) = cli.height {
            self.grid.height = height;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(action) = cli.on_game_over {
            self.on_game_over = action;
        }
        if let Some(path) = &cli.log_file {
            self.log_file.clone_from(path);
        }
        self.verbose = cli.verbose;
        self.skip_menu = cli.play;
    }

    /// Rejects boards that cannot hold the initial snake and its obstacles.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width < MIN_GRID_WIDTH || self.grid.height < MIN_GRID_HEIGHT {
            return Err(ConfigError::GridTooSmall {
                width: self.grid.width,
                height: self.grid.height,
                min_width: MIN_GRID_WIDTH,
                min_height: MIN_GRID_HEIGHT,
            });
        }

        Ok(())
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

fn read_settings_file_if_present(path: &Path) -> Result<Option<SettingsFile>, ConfigError> {
    match read_settings_file(path) {
        Ok(file) => Ok(Some(file)),
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

fn read_settings_file(path: &Path) -> Result<SettingsFile, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
