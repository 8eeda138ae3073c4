//! Flat-file save format.
//!
//! ```text
//! Key Code: 042917
//! Key
//! Coin
//! Coin
//! ```
//!
//! The first line carries a random six digit key code that is shown to the
//! player and never checked on load. Every following line names one item.
//! Unknown lines are skipped on load rather than rejected.
//!
//! Writes go to a temp file in the same directory and are renamed over the
//! target while holding an exclusive lock on a sibling `.<name>.lock` file.
//! The target is only ever touched by the rename, so a failed save leaves the
//! previous file intact, or no file at all if there was none.

use fs2::FileExt;
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use super::dice::Dice;
use super::errors::{GameError, GameResult};
use super::types::{Inventory, Item};

/// Default save file name, relative to the working directory.
pub const DEFAULT_SAVE_FILE: &str = "save_game.txt";

const HEADER_PREFIX: &str = "Key Code: ";
const KEY_CODE_SPACE: usize = 1_000_000;

/// Six digit, zero padded code drawn uniformly from `000000..=999999`.
pub fn generate_key_code(dice: &mut dyn Dice) -> String {
    format_key_code(dice.roll(KEY_CODE_SPACE))
}

pub fn format_key_code(n: usize) -> String {
    format!("{:06}", n)
}

/// Render the save file body for `inventory`.
pub fn encode(inventory: &Inventory, key_code: &str) -> String {
    let mut out = String::with_capacity(HEADER_PREFIX.len() + 8 + inventory.len() * 5);
    out.push_str(HEADER_PREFIX);
    out.push_str(key_code);
    out.push('\n');
    for item in inventory.items() {
        out.push_str(item.as_str());
        out.push('\n');
    }
    out
}

/// Parse a save file body. A body with no item lines yields an empty inventory.
pub fn decode(content: &str) -> Inventory {
    let mut inventory = Inventory::new();
    for line in content.lines().skip(1) {
        match Item::parse(line.trim()) {
            Some(item) => inventory.push(item),
            None => {
                if !line.trim().is_empty() {
                    debug!("save: ignoring unrecognised line '{}'", line.trim());
                }
            }
        }
    }
    inventory
}

/// Overwrite `path` with `inventory` under `key_code`.
pub fn save(path: &Path, inventory: &Inventory, key_code: &str) -> GameResult<()> {
    write_atomic(path, &encode(inventory, key_code)).map_err(|source| GameError::Save {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "save: wrote {} items to {} (key code {})",
        inventory.len(),
        path.display(),
        key_code
    );
    Ok(())
}

/// Read the inventory stored at `path`. A missing or unreadable file is an error.
pub fn load(path: &Path) -> GameResult<Inventory> {
    let bytes = std::fs::read(path).map_err(|source| GameError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    // Junk bytes only spoil their own line, which decode then skips.
    let inventory = decode(&String::from_utf8_lossy(&bytes));
    info!(
        "save: loaded {} items from {}",
        inventory.len(),
        path.display()
    );
    Ok(inventory)
}

/// The key code from the header line, if the file has a well formed one.
pub fn read_key_code(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path).ok()?;
    let content = String::from_utf8_lossy(&bytes);
    let header = content.lines().next()?;
    let code = header.trim_end().strip_prefix(HEADER_PREFIX)?;
    if code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit()) {
        Some(code.to_string())
    } else {
        None
    }
}

/// Write a header-only save so a new player has something to load.
/// Returns `false` without touching anything when `path` already exists.
pub fn create_fresh(path: &Path, dice: &mut dyn Dice) -> GameResult<bool> {
    if path.exists() {
        return Ok(false);
    }
    save(path, &Inventory::new(), &generate_key_code(dice))?;
    Ok(true)
}

fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    write_atomic_with(path, |tmp| tmp.write_all(content.as_bytes()))
}

fn write_atomic_with<F>(path: &Path, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_SAVE_FILE);
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(dir.join(format!(".{}.lock", base)))?;
    lock_file.lock_exclusive()?;
    let mut counter = 0u32;
    let tmp_path = loop {
        let cand = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&cand) {
            Ok(mut tmp) => {
                if let Err(e) = fill(&mut tmp).and_then(|_| tmp.sync_all()) {
                    let _ = std::fs::remove_file(&cand);
                    return Err(e);
                }
                break cand;
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
                continue;
            }
            Err(e) => return Err(e),
        }
    };
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }
    if let Ok(dirf) = File::open(dir) {
        let _ = dirf.sync_all();
    }
    let _ = lock_file.unlock();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dice::RngDice;
    use tempfile::tempdir;

    struct Fixed(usize);

    impl Dice for Fixed {
        fn roll(&mut self, faces: usize) -> usize {
            self.0.min(faces - 1)
        }
    }

    #[test]
    fn key_code_is_six_digits_at_the_edges() {
        assert_eq!(generate_key_code(&mut Fixed(0)), "000000");
        assert_eq!(generate_key_code(&mut Fixed(42)), "000042");
        assert_eq!(generate_key_code(&mut Fixed(999_999)), "999999");
        assert_eq!(generate_key_code(&mut Fixed(usize::MAX)), "999999");
    }

    #[test]
    fn key_code_random_draws_are_numeric() {
        let mut dice = RngDice::seeded(11);
        for _ in 0..500 {
            let code = generate_key_code(&mut dice);
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| b.is_ascii_digit()), "{code}");
        }
    }

    #[test]
    fn encode_writes_header_then_items_in_order() {
        let inv = Inventory::from_items(vec![Item::Coin, Item::Key]);
        assert_eq!(encode(&inv, "012345"), "Key Code: 012345\nCoin\nKey\n");
    }

    #[test]
    fn decode_skips_unknown_lines() {
        let inv = decode("Key Code: 000001\nKey\nSword\n  Coin  \n\ncoin\n");
        assert_eq!(inv.items(), &[Item::Key, Item::Coin]);
    }

    #[test]
    fn decode_header_only_is_empty() {
        assert!(decode("Key Code: 123456\n").is_empty());
        assert!(decode("Key Code: 123456").is_empty());
        assert!(decode("").is_empty());
    }

    #[test]
    fn save_overwrites_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save_game.txt");
        save(&path, &Inventory::from_items(vec![Item::Coin; 4]), "111111").unwrap();
        save(&path, &Inventory::from_items(vec![Item::Key]), "222222").unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Key Code: 222222\nKey\n");
        assert_eq!(read_key_code(&path).as_deref(), Some("222222"));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("save_game.txt");
        let err = save(&path, &Inventory::new(), "000000").unwrap_err();
        assert!(matches!(err, GameError::Save { .. }));
    }

    #[test]
    fn failed_first_save_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save_game.txt");
        let err = write_atomic_with(&path, |_| {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        })
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(!path.exists());
        assert!(matches!(load(&path), Err(GameError::Load { .. })));
        let stray_tmp = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .any(|e| e.file_name().to_string_lossy().contains(".tmp-"));
        assert!(!stray_tmp);
    }

    #[test]
    fn failed_save_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save_game.txt");
        save(&path, &Inventory::from_items(vec![Item::Key]), "123456").unwrap();
        assert!(write_atomic_with(&path, |tmp| {
            tmp.write_all(b"Key Code: 000000\n")?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        })
        .is_err());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Key Code: 123456\nKey\n"
        );
    }

    #[test]
    fn read_key_code_rejects_bad_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save_game.txt");
        std::fs::write(&path, "Key Code: 12ab56\nKey\n").unwrap();
        assert_eq!(read_key_code(&path), None);
        std::fs::write(&path, "Coin\n").unwrap();
        assert_eq!(read_key_code(&path), None);
    }

    #[test]
    fn create_fresh_does_not_clobber() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("save_game.txt");
        assert!(create_fresh(&path, &mut Fixed(7)).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Key Code: 000007\n");
        std::fs::write(&path, "Key Code: 000007\nKey\n").unwrap();
        assert!(!create_fresh(&path, &mut Fixed(9)).unwrap());
        assert!(load(&path).unwrap().has_key());
    }
}
