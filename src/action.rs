use std::{cmp::Ordering, str::FromStr};

use crate::{
    entry::{self, Entry},
    Result, ShelfError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = ShelfError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(ShelfError::UnknownDirection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append an entry; both fields are trimmed and must stay non-empty
    Add { name: String, secret: String },
    Delete { index: usize },
    ClearAll,
    /// Replace the whole list with a JSON export
    Import { json: String },
    /// Case-insensitive A to Z, keeping the relative order of equal names
    SortByName,
    /// Swap with a neighbour; moving past either end does nothing
    Move { index: usize, direction: Direction },
}

impl Action {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Add { .. } => "add",
            Action::Delete { .. } => "delete",
            Action::ClearAll => "clear_all",
            Action::Import { .. } => "import",
            Action::SortByName => "sort_by_name",
            Action::Move { .. } => "move",
        }
    }

    /// Applies the action to `entries`. On error the list is left untouched.
    pub fn apply(self, entries: &mut Vec<Entry>) -> Result<()> {
        match self {
            Action::Add { name, secret } => add(entries, &name, &secret),
            Action::Delete { index } => delete(entries, index),
            Action::ClearAll => {
                entries.clear();
                Ok(())
            }
            Action::Import { json } => import(entries, &json),
            Action::SortByName => {
                sort_by_name(entries);
                Ok(())
            }
            Action::Move { index, direction } => move_entry(entries, index, direction),
        }
    }
}

fn add(entries: &mut Vec<Entry>, name: &str, secret: &str) -> Result<()> {
    let name = name.trim();
    let secret = secret.trim();

    if name.is_empty() {
        return Err(ShelfError::EmptyField("name"));
    }
    if secret.is_empty() {
        return Err(ShelfError::EmptyField("secret"));
    }

    entries.push(Entry::new(name, secret));

    Ok(())
}

fn check_index(entries: &[Entry], index: usize) -> Result<()> {
    if index >= entries.len() {
        return Err(ShelfError::IndexOutOfRange {
            index,
            len: entries.len(),
        });
    }

    Ok(())
}

fn delete(entries: &mut Vec<Entry>, index: usize) -> Result<()> {
    check_index(entries, index)?;
    entries.remove(index);

    Ok(())
}

fn import(entries: &mut Vec<Entry>, json: &str) -> Result<()> {
    *entries = entry::import_json(json)?;

    Ok(())
}

fn compare_ignore_ascii_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

fn sort_by_name(entries: &mut [Entry]) {
    entries.sort_by(|a, b| compare_ignore_ascii_case(&a.name, &b.name));
}

fn move_entry(entries: &mut [Entry], index: usize, direction: Direction) -> Result<()> {
    check_index(entries, index)?;

    match direction {
        Direction::Up if index > 0 => entries.swap(index - 1, index),
        Direction::Down if index + 1 < entries.len() => entries.swap(index, index + 1),
        _ => (),
    }

    Ok(())
}
