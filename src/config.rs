/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// Command-line flags are applied on top by the binary.

use log::info;
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::depths::DEFAULT_MAX_DEPTH;
use crate::sim::solver::SolverOptions;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct PushmoConfig {
    pub solver: SolverConfig,
    pub display: DisplayConfig,
    pub puzzles_dir: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    pub max_depth: u8,
    pub max_states: usize, // 0 = unlimited
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    pub color: bool,
    pub show_steps: bool,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    solver: TomlSolver,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSolver {
    #[serde(default = "default_max_depth")]
    max_depth: u8,
    #[serde(default)]
    max_states: usize,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_true")]
    color: bool,
    #[serde(default = "default_true")]
    show_steps: bool,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_puzzles_dir")]
    puzzles_dir: String,
}

// ── Defaults ──

fn default_max_depth() -> u8 { DEFAULT_MAX_DEPTH }
fn default_true() -> bool { true }
fn default_puzzles_dir() -> String { "puzzles".into() }

impl Default for TomlSolver {
    fn default() -> Self {
        TomlSolver {
            max_depth: default_max_depth(),
            max_states: 0,
        }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay {
            color: default_true(),
            show_steps: default_true(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            puzzles_dir: default_puzzles_dir(),
        }
    }
}

impl Default for PushmoConfig {
    fn default() -> Self {
        PushmoConfig::from_toml(TomlConfig::default(), &[])
    }
}

// ── Loading ──

impl PushmoConfig {
    /// Load config from `config.toml`.
    /// Search order: exe directory, CWD, then the XDG and system data dirs.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let cfg = PushmoConfig::from_toml(load_toml(&search_dirs), &search_dirs);
        info!(
            "config: max_depth={} max_states={} color={} puzzles_dir={}",
            cfg.solver.max_depth,
            cfg.solver.max_states,
            cfg.display.color,
            cfg.puzzles_dir.display()
        );
        cfg
    }

    /// Parse config text directly; the puzzles directory is left as written.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let raw = toml::from_str::<TomlConfig>(text)?;
        Ok(PushmoConfig::from_toml(raw, &[]))
    }

    fn from_toml(raw: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        // Resolve puzzles directory
        let dir_str = &raw.general.puzzles_dir;
        let puzzles_dir = if PathBuf::from(dir_str).is_absolute() {
            PathBuf::from(dir_str)
        } else {
            search_dirs
                .iter()
                .map(|d| d.join(dir_str))
                .find(|p| p.is_dir())
                .unwrap_or_else(|| PathBuf::from(dir_str))
        };

        PushmoConfig {
            solver: SolverConfig {
                max_depth: raw.solver.max_depth,
                max_states: raw.solver.max_states,
            },
            display: DisplayConfig {
                color: raw.display.color,
                show_steps: raw.display.show_steps,
            },
            puzzles_dir,
        }
    }

    pub fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            max_depth: self.solver.max_depth,
            max_states: match self.solver.max_states {
                0 => None,
                n => Some(n),
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD + data paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable (symlinks resolved)
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/pushmo)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/pushmo");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory
    let sys = PathBuf::from("/usr/share/pushmo");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// First readable config.toml wins.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
