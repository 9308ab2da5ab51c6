//! State of the overflow picker overlay.
//!
//! Options are listed alphabetically, grouped under the uppercased first
//! letter of their name, with values that have artwork repeated in a
//! featured section on top. Typing narrows the list with fuzzy matching.

use std::collections::HashSet;

use fltr_engine::{Catalog, PickerRequest, PickerResult, ValueKey, ValueKind};
use frizbee::{Options, match_list};

pub const FEATURED_SECTION: &str = "Featured";

/// Names that never show up as picker options.
const EXCLUDED_NAMES: [&str; 2] = ["total", "top30"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct PickerOption {
    key: ValueKey,
    id: String,
    name: String,
    kind: ValueKind,
}

/// A line of the picker list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEntry {
    Section(String),
    Option { key: ValueKey, name: String, chosen: bool },
}

#[derive(Debug, Clone)]
pub struct PickerModel {
    request: PickerRequest,
    options: Vec<PickerOption>,
    featured: Vec<usize>,
    chosen: Vec<ValueKey>,
    query: String,
    cursor: usize,
}

impl PickerModel {
    pub fn new(request: PickerRequest, catalog: &Catalog) -> Self {
        let mut options: Vec<PickerOption> = request
            .values()
            .iter()
            .filter_map(|&key| {
                let node = catalog.value(key)?;
                let name = node.name().trim();
                let excluded = matches!(node.kind(), ValueKind::Button | ValueKind::Total)
                    || EXCLUDED_NAMES.contains(&name.to_ascii_lowercase().as_str())
                    || name.starts_with(|c: char| c.is_ascii_digit());
                (!excluded).then(|| PickerOption {
                    key,
                    id: node.id().to_string(),
                    name: name.to_string(),
                    kind: node.kind(),
                })
            })
            .collect();
        options.sort_by_key(|option| option.name.to_lowercase());

        let featured = request
            .images()
            .iter()
            .filter_map(|image| options.iter().position(|option| option.id == image.id))
            .collect();

        let offered: HashSet<ValueKey> = options.iter().map(|option| option.key).collect();
        let chosen = request
            .preselected()
            .iter()
            .copied()
            .filter(|key| offered.contains(key))
            .collect();

        Self {
            request,
            options,
            featured,
            chosen,
            query: String::new(),
            cursor: 0,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.request.title()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn chosen(&self) -> &[ValueKey] {
        &self.chosen
    }

    #[must_use]
    pub fn chosen_names(&self) -> Vec<&str> {
        self.chosen
            .iter()
            .filter_map(|key| self.option(*key).map(|option| option.name.as_str()))
            .collect()
    }

    fn option(&self, key: ValueKey) -> Option<&PickerOption> {
        self.options.iter().find(|option| option.key == key)
    }

    /// Option indices matching the current query, in alphabetical order.
    fn visible(&self) -> Vec<usize> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            return (0..self.options.len()).collect();
        }
        let haystacks: Vec<&str> = self.options.iter().map(|option| option.name.as_str()).collect();
        let mut matched: Vec<usize> = match_list(trimmed, &haystacks, options_for_query(trimmed))
            .into_iter()
            .filter(|entry| entry.score > 0)
            .map(|entry| entry.index_in_haystack as usize)
            .collect();
        matched.sort_unstable();
        matched
    }

    #[must_use]
    pub fn entries(&self) -> Vec<PickerEntry> {
        let mut entries = Vec::new();
        let entry = |index: usize| {
            let option = &self.options[index];
            PickerEntry::Option {
                key: option.key,
                name: option.name.clone(),
                chosen: self.chosen.contains(&option.key),
            }
        };

        if self.query.trim().is_empty() && !self.featured.is_empty() {
            entries.push(PickerEntry::Section(FEATURED_SECTION.to_string()));
            entries.extend(self.featured.iter().map(|&index| entry(index)));
        }

        let mut section: Option<String> = None;
        for index in self.visible() {
            let letter = section_for(&self.options[index].name);
            if section.as_deref() != Some(letter.as_str()) {
                entries.push(PickerEntry::Section(letter.clone()));
                section = Some(letter);
            }
            entries.push(entry(index));
        }
        entries
    }

    /// Index into [`PickerModel::entries`] of the option under the cursor.
    #[must_use]
    pub fn cursor_entry(&self) -> Option<usize> {
        self.entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| matches!(entry, PickerEntry::Option { .. }))
            .nth(self.cursor)
            .map(|(index, _)| index)
    }

    fn selectable(&self) -> Vec<ValueKey> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                PickerEntry::Option { key, .. } => Some(key),
                PickerEntry::Section(_) => None,
            })
            .collect()
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.selectable().len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.push(ch);
        self.cursor = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.cursor = 0;
    }

    /// Add or remove `key` from the chosen values. New choices go to the
    /// front; choosing a regular value drops any other regular value.
    pub fn toggle(&mut self, key: ValueKey) {
        if let Some(position) = self.chosen.iter().position(|&chosen| chosen == key) {
            self.chosen.remove(position);
            return;
        }
        let Some(kind) = self.option(key).map(|option| option.kind) else {
            return;
        };
        if kind.is_exclusive() {
            let options = &self.options;
            self.chosen.retain(|chosen| {
                options
                    .iter()
                    .find(|option| option.key == *chosen)
                    .is_none_or(|option| !option.kind.is_exclusive())
            });
        }
        self.chosen.insert(0, key);
    }

    pub fn toggle_current(&mut self) {
        if let Some(key) = self.selectable().get(self.cursor).copied() {
            self.toggle(key);
        }
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    /// Caption of the confirm action.
    #[must_use]
    pub fn confirm_label(&self) -> String {
        if self.chosen.is_empty() {
            format!("View All {}", self.title())
        } else {
            format!("Select {}", self.chosen.len())
        }
    }

    pub fn confirm(&self) -> PickerResult {
        self.request.resolve(self.chosen.clone())
    }
}

fn section_for(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Fuzzy matching options tuned for short option lists.
pub(crate) fn options_for_query(query: &str) -> Options {
    let length = query.chars().count();
    let mut allowed_typos: u16 = match length {
        0 | 1 => 0,
        2..=4 => 1,
        5..=7 => 2,
        _ => 3,
    };
    if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
        allowed_typos = allowed_typos.min(max_reasonable);
    }

    Options {
        prefilter: false,
        max_typos: Some(allowed_typos),
        sort: false,
        ..Options::default()
    }
}
