// Ordered collections of choices with name and flag uniqueness

use crate::error::{ErrorTag, ReportError, Result};
use crate::reporters::args::flag_to_arg;
use crate::reporters::choice::{Choice, ChoiceConf};
use std::collections::{BTreeSet, HashMap};

/// Anything that can live in a `ChoiceCollection`
pub trait ChoiceEntry: Clone {
    fn entry_name(&self) -> &str;
    fn entry_flags(&self) -> &[String];
}

impl ChoiceEntry for ChoiceConf {
    fn entry_name(&self) -> &str {
        self.name()
    }

    fn entry_flags(&self) -> &[String] {
        self.flags()
    }
}

impl ChoiceEntry for Choice {
    fn entry_name(&self) -> &str {
        self.name()
    }

    fn entry_flags(&self) -> &[String] {
        self.flags()
    }
}

/// Insertion-ordered mapping from choice name to entry.
///
/// Names are unique, and no flag is claimed by two entries. Every mutation
/// validates first, so a rejected call leaves the collection unchanged.
#[derive(Debug, Clone)]
pub struct ChoiceCollection<T: ChoiceEntry> {
    items: Vec<T>,
    /// flag -> position in `items`
    flags: HashMap<String, usize>,
}

/// Choices bound to reporters
pub type Choices = ChoiceCollection<Choice>;
/// Reporter-independent choice configurations
pub type ChoicesConf = ChoiceCollection<ChoiceConf>;

impl<T: ChoiceEntry> Default for ChoiceCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            flags: HashMap::new(),
        }
    }
}

impl<T: ChoiceEntry> ChoiceCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from entries, rejecting any collision
    pub fn from_entries(entries: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut collection = Self::new();
        collection.extend(entries)?;
        Ok(collection)
    }

    /// Add an entry
    pub fn add(&mut self, entry: T) -> Result<()> {
        self.check_insertable(&entry, &[])?;
        self.push(entry);
        Ok(())
    }

    /// Add several entries; all are checked before any is inserted
    pub fn extend(&mut self, entries: impl IntoIterator<Item = T>) -> Result<()> {
        let entries: Vec<T> = entries.into_iter().collect();
        for (index, entry) in entries.iter().enumerate() {
            self.check_insertable(entry, &entries[..index])?;
        }
        for entry in entries {
            self.push(entry);
        }
        Ok(())
    }

    /// Keyed insertion; `key` must equal the entry's name
    pub fn insert(&mut self, key: &str, entry: T) -> Result<()> {
        if key != entry.entry_name() {
            return Err(ReportError::value(
                ErrorTag::ChoicesKeyNameMismatch,
                format!("key '{}' does not match choice name '{}'", key, entry.entry_name()),
            ));
        }
        self.add(entry)
    }

    /// Remove an entry by name
    pub fn remove(&mut self, name: &str) -> Result<T> {
        let position = self
            .items
            .iter()
            .position(|item| item.entry_name() == name)
            .ok_or_else(|| {
                ReportError::key(
                    ErrorTag::ChoicesUnknownName,
                    format!("no choice named '{}'", name),
                )
            })?;
        let removed = self.items.remove(position);
        self.reindex();
        Ok(removed)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|item| item.entry_name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entry claiming `flag`
    pub fn get_by_flag(&self, flag: &str) -> Option<&T> {
        self.flags.get(flag).map(|&index| &self.items[index])
    }

    /// Entry whose flag maps to argument key `arg`
    pub fn get_choice_for_arg(&self, arg: &str) -> Option<&T> {
        self.items
            .iter()
            .find(|item| item.entry_flags().iter().any(|flag| flag_to_arg(flag) == arg))
    }

    pub fn all_choice_flags(&self) -> BTreeSet<String> {
        self.flags.keys().cloned().collect()
    }

    pub fn all_choice_args(&self) -> BTreeSet<String> {
        self.flags.keys().map(|flag| flag_to_arg(flag)).collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(ChoiceEntry::entry_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_insertable(&self, entry: &T, pending: &[T]) -> Result<()> {
        let name = entry.entry_name();
        if self.contains(name) || pending.iter().any(|p| p.entry_name() == name) {
            return Err(ReportError::value(
                ErrorTag::ChoicesDuplicateName,
                format!("a choice named '{}' already exists", name),
            ));
        }
        for flag in entry.entry_flags() {
            let claimed = self.flags.contains_key(flag)
                || pending.iter().any(|p| p.entry_flags().contains(flag));
            if claimed {
                return Err(ReportError::value(
                    ErrorTag::ChoicesDuplicateFlag,
                    format!("flag '{}' of choice '{}' is already claimed", flag, name),
                ));
            }
        }
        Ok(())
    }

    fn push(&mut self, entry: T) {
        let index = self.items.len();
        for flag in entry.entry_flags() {
            self.flags.insert(flag.clone(), index);
        }
        self.items.push(entry);
    }

    fn reindex(&mut self) {
        self.flags = self
            .items
            .iter()
            .enumerate()
            .flat_map(|(index, item)| item.entry_flags().iter().map(move |f| (f.clone(), index)))
            .collect();
    }
}

impl<'a, T: ChoiceEntry> IntoIterator for &'a ChoiceCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
