use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::GridSize;

const APP_DIR_NAME: &str = "snake-pilot";
const SCORE_FILE_NAME: &str = "high_scores.json";

/// Best scores keyed by board size. Scores on different boards are not
/// comparable, so each gets its own entry.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    boards: HashMap<String, u32>,
}

fn board_key(grid: GridSize) -> String {
    format!("{}x{}", grid.width, grid.height)
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Loads the best score recorded for this board size.
///
/// Returns `Ok(0)` when no score file exists yet. Returns `Err` when the
/// file exists but cannot be read or parsed, so the caller can surface a
/// warning before entering raw terminal mode.
pub fn load_high_score(grid: GridSize) -> io::Result<u32> {
    load_high_score_from_path(&scores_path(), grid)
}

/// Records `score` for this board size if it beats the stored best.
///
/// Returns whether a new best was written.
pub fn record_high_score(grid: GridSize, score: u32) -> io::Result<bool> {
    record_high_score_to_path(&scores_path(), grid, score)
}

fn read_score_file(path: &Path) -> io::Result<ScoreFile> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ScoreFile::default()),
        Err(e) => return Err(e),
    };

    serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn load_high_score_from_path(path: &Path, grid: GridSize) -> io::Result<u32> {
    let file = read_score_file(path)?;
    Ok(file.boards.get(&board_key(grid)).copied().unwrap_or(0))
}

fn record_high_score_to_path(path: &Path, grid: GridSize, score: u32) -> io::Result<bool> {
    let mut file = read_score_file(path)?;
    let entry = file.boards.entry(board_key(grid)).or_insert(0);
    if score <= *entry {
        return Ok(false);
    }
    *entry = score;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&file)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
    fs::write(path, json)?;
    Ok(true)
}
