/// Puzzle loader with pack support.
///
/// ## Sources:
///   1. Pack file (`.ppk` format)
///   2. Single puzzle file (any other extension)
///   3. Built-in embedded puzzles
///
/// ## Pack format (`.ppk`, Pushmo Puzzle Pack):
///   ```text
///   ## Pack Name
///   ## Author: name
///   ## Description: blah blah
///   ---
///   # Puzzle 1 - Name
///   <map rows>
///   ---
///   # Puzzle 2 - Name
///   <map rows>
///   ```
///
/// Puzzles are separated by a line containing only `---`.
/// Pack metadata lines start with `##`.
///
/// ## Single-puzzle format:
///   Optional line 1: `# Puzzle Name`
///   Lines: map rows, top row first
///
/// ## Legend:
///   '@' = Climber start          '*' = Goal
///   letter / digit = Segment     anything else = Empty

use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::domain::board::{Board, BoardError};

/// Puzzle text (owned strings, loaded from file or embedded).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelDef {
    pub name: String,
    pub rows: Vec<String>,
}

impl LevelDef {
    pub fn board(&self) -> Result<Board, LevelError> {
        Board::parse(&self.rows)
            .map_err(|source| LevelError::Board { name: self.name.clone(), source })
    }
}

/// Info about a puzzle pack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackInfo {
    pub name: String,
    pub author: String,
    pub description: String,
    pub level_count: usize,
}

#[derive(Clone, Debug)]
pub struct Pack {
    pub info: PackInfo,
    pub levels: Vec<LevelDef>,
}

impl Pack {
    /// Puzzle by 1-based number, as shown to the user.
    pub fn level(&self, number: usize) -> Result<&LevelDef, LevelError> {
        number
            .checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .ok_or(LevelError::NoSuchLevel { number, count: self.levels.len() })
    }
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("could not read {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("{} contains no puzzles", .path.display())]
    Empty { path: PathBuf },
    #[error("puzzle {number} does not exist (pack has {count})")]
    NoSuchLevel { number: usize, count: usize },
    #[error("puzzle '{name}': {source}")]
    Board { name: String, source: BoardError },
}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// Load a pack (`.ppk`) or a single puzzle file.
pub fn load_pack(path: &Path) -> Result<Pack, LevelError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| LevelError::Io { path: path.to_path_buf(), source })?;

    let fallback = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let pack = if path.extension().map_or(false, |e| e == "ppk") {
        parse_pack(&content, &fallback)
    } else {
        let levels: Vec<LevelDef> = parse_level_file(&content, &fallback).into_iter().collect();
        Pack {
            info: PackInfo {
                name: fallback.clone(),
                level_count: levels.len(),
                ..PackInfo::default()
            },
            levels,
        }
    };

    if pack.levels.is_empty() {
        return Err(LevelError::Empty { path: path.to_path_buf() });
    }
    info!("loaded {} puzzle(s) from {}", pack.levels.len(), path.display());
    Ok(pack)
}

/// Resolve a user-supplied path: as given if it exists, else inside
/// `puzzles_dir`.
pub fn resolve_path(path: &Path, puzzles_dir: &Path) -> PathBuf {
    if path.exists() || path.is_absolute() {
        return path.to_path_buf();
    }
    let candidate = puzzles_dir.join(path);
    if candidate.exists() {
        candidate
    } else {
        path.to_path_buf()
    }
}

// ══════════════════════════════════════════════════════════════
// Pack parsing
// ══════════════════════════════════════════════════════════════

/// Parse a `.ppk` pack: metadata header, then `---`-separated puzzles.
pub fn parse_pack(content: &str, fallback_name: &str) -> Pack {
    let mut info = PackInfo::default();
    let mut levels = vec![];
    let mut current_section = String::new();
    let mut in_levels = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed == "---" {
            if in_levels {
                levels.extend(parse_level_file(&current_section, &unnamed(levels.len())));
            }
            current_section.clear();
            in_levels = true;
            continue;
        }

        if !in_levels {
            if let Some(author) = trimmed.strip_prefix("## Author:") {
                info.author = author.trim().to_string();
            } else if let Some(desc) = trimmed.strip_prefix("## Description:") {
                info.description = desc.trim().to_string();
            } else if let Some(name) = trimmed.strip_prefix("##") {
                if info.name.is_empty() {
                    info.name = name.trim().to_string();
                }
            }
            continue;
        }

        current_section.push_str(line);
        current_section.push('\n');
    }

    if in_levels {
        levels.extend(parse_level_file(&current_section, &unnamed(levels.len())));
    }

    if info.name.is_empty() {
        info.name = fallback_name.to_string();
    }
    info.level_count = levels.len();
    Pack { info, levels }
}

fn unnamed(index: usize) -> String {
    format!("Puzzle {}", index + 1)
}

// ══════════════════════════════════════════════════════════════
// Single-puzzle parsing
// ══════════════════════════════════════════════════════════════

/// Parse one puzzle. `None` if there are no map rows.
pub fn parse_level_file(content: &str, fallback_name: &str) -> Option<LevelDef> {
    let mut name = String::new();
    let mut rows: Vec<String> = vec![];

    for line in content.lines() {
        let line = line.trim_end();
        if rows.is_empty() && name.is_empty() && is_name_line(line) {
            name = line[1..].trim().to_string();
        } else if rows.is_empty() && line.is_empty() {
            continue;
        } else {
            rows.push(line.to_string());
        }
    }

    while rows.last().map_or(false, |r| r.is_empty()) {
        rows.pop();
    }

    if rows.is_empty() {
        return None;
    }

    if name.is_empty() {
        name = fallback_name.to_string();
    }

    Some(LevelDef { name, rows })
}

/// Distinguish `# Puzzle Name` from a map row that happens to start with
/// `#` (an empty cell). A name line is `#` followed by a space.
fn is_name_line(line: &str) -> bool {
    line.starts_with("# ")
}

// ══════════════════════════════════════════════════════════════
// Embedded puzzles
// ══════════════════════════════════════════════════════════════

pub fn embedded_pack() -> Pack {
    let levels = embedded_levels();
    Pack {
        info: PackInfo {
            name: "Built-in Puzzles".to_string(),
            author: "pushmo".to_string(),
            description: format!("{} puzzles included with the solver", levels.len()),
            level_count: levels.len(),
        },
        levels,
    }
}

fn embedded_levels() -> Vec<LevelDef> {
    vec![
        make_embedded("Puzzle 1 - Stroll", &[
            "@...*",
        ]),
        make_embedded("Puzzle 2 - First Step", &[
            ".*.",
            "@A.",
        ]),
        make_embedded("Puzzle 3 - Two Hands", &[
            "..*",
            "..D",
            "@AD",
        ]),
        make_embedded("Puzzle 4 - Staircase", &[
            "...*",
            "..CC",
            ".BB.",
            "@A..",
        ]),
        make_embedded("Puzzle 5 - Out of Reach", &[
            "*...",
            "....",
            "....",
            "@.AB",
        ]),
    ]
}

fn make_embedded(name: &str, map: &[&str]) -> LevelDef {
    LevelDef {
        name: name.to_string(),
        rows: map.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file_with_name() {
        let def = parse_level_file("# Tiny\n.*\n@A\n\n", "x").unwrap();
        assert_eq!(def.name, "Tiny");
        assert_eq!(def.rows, vec![".*", "@A"]);
    }

    #[test]
    fn single_file_without_name_uses_fallback() {
        let def = parse_level_file(".*\r\n@A\r\n", "tiny").unwrap();
        assert_eq!(def.name, "tiny");
        assert_eq!(def.rows, vec![".*", "@A"]);
    }

    #[test]
    fn hash_row_is_not_a_name() {
        let def = parse_level_file("#*#\n@A#\n", "x").unwrap();
        assert_eq!(def.name, "x");
        assert_eq!(def.rows.len(), 2);
    }

    #[test]
    fn empty_file_has_no_level() {
        assert!(parse_level_file("\n\n", "x").is_none());
        assert!(parse_level_file("# Only a name\n", "x").is_none());
    }

    #[test]
    fn pack_metadata_and_levels() {
        let text = "\
## Sample Pack
## Author: someone
## Description: two small ones
---
# One
@..*
---
.*.
@A.
";
        let pack = parse_pack(text, "fallback");
        assert_eq!(pack.info.name, "Sample Pack");
        assert_eq!(pack.info.author, "someone");
        assert_eq!(pack.info.description, "two small ones");
        assert_eq!(pack.info.level_count, 2);
        assert_eq!(pack.levels[0].name, "One");
        assert_eq!(pack.levels[1].name, "Puzzle 2");
        assert_eq!(pack.levels[1].rows, vec![".*.", "@A."]);
    }

    #[test]
    fn pack_without_header_uses_fallback_name() {
        let pack = parse_pack("---\n@.*\n", "mine");
        assert_eq!(pack.info.name, "mine");
        assert_eq!(pack.levels.len(), 1);
    }

    #[test]
    fn level_numbers_are_one_based() {
        let pack = embedded_pack();
        assert_eq!(pack.level(1).unwrap().name, "Puzzle 1 - Stroll");
        assert!(matches!(pack.level(0), Err(LevelError::NoSuchLevel { .. })));
        assert!(matches!(
            pack.level(pack.levels.len() + 1),
            Err(LevelError::NoSuchLevel { .. })
        ));
    }

    #[test]
    fn embedded_puzzles_parse() {
        for def in embedded_pack().levels {
            let board = def.board().unwrap_or_else(|e| panic!("{e}"));
            assert!(board.start().is_some(), "{} has no start", def.name);
        }
    }

    #[test]
    fn bad_board_reports_level_name() {
        let def = LevelDef { name: "Broken".into(), rows: vec!["@..".into()] };
        let err = def.board().unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_pack(Path::new("/definitely/not/here.ppk")).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }

    #[test]
    fn resolve_falls_back_to_given_path() {
        let p = resolve_path(Path::new("nope.txt"), Path::new("/no/such/dir"));
        assert_eq!(p, PathBuf::from("nope.txt"));
    }
}
