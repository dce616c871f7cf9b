//! render — текстовый вывод настроек, сгруппированных по владельцу.
//!
//! Два режима:
//! - StreamRenderer: порядок потока; заголовок [owner] при каждой смене владельца,
//!   пустая строка перед каждым заголовком, кроме первого. Дубликаты печатаются как есть.
//! - SettingsTree: owner -> (name -> значение), last-write-wins; вывод в
//!   лексикографическом порядке владельцев и имён, после каждой группы — пустая строка.

use log::warn;
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::record::Entry;
use crate::value::SettingValue;

/// Одна строка `name = literal`.
pub fn write_setting<W: Write>(out: &mut W, name: &str, value: &SettingValue) -> io::Result<()> {
    writeln!(out, "{} = {}", name, value)
}

pub fn write_group_header<W: Write>(out: &mut W, owner: &str) -> io::Result<()> {
    writeln!(out, "[{}]", owner)
}

// ------------------------------------------------------------------------------------
// Streaming
// ------------------------------------------------------------------------------------

pub struct StreamRenderer<W: Write> {
    out: W,
    prev_owner: Option<String>,
    groups: usize,
}

impl<W: Write> StreamRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            prev_owner: None,
            groups: 0,
        }
    }

    pub fn push(&mut self, entry: &Entry) -> io::Result<()> {
        if self.prev_owner.as_deref() != Some(entry.owner.as_str()) {
            if self.prev_owner.is_some() {
                writeln!(self.out)?;
            }
            write_group_header(&mut self.out, &entry.owner)?;
            self.prev_owner = Some(entry.owner.clone());
            self.groups += 1;
        }
        write_setting(&mut self.out, &entry.name, &entry.value)
    }

    /// Number of group headers emitted (an owner seen twice non-adjacently counts twice).
    pub fn groups(&self) -> usize {
        self.groups
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

// ------------------------------------------------------------------------------------
// Collecting
// ------------------------------------------------------------------------------------

/// Collected value plus the offset it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedValue {
    pub entry_offset: u64,
    pub value: SettingValue,
}

#[derive(Debug, Default)]
pub struct SettingsTree {
    owners: BTreeMap<String, BTreeMap<String, CollectedValue>>,
    overwritten: usize,
}

impl SettingsTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Вставить запись; более поздняя запись с тем же (owner, name) вытесняет раннюю.
    /// Возвращает вытесненное значение, если оно было.
    pub fn insert(&mut self, entry: Entry) -> Option<CollectedValue> {
        let Entry {
            owner,
            name,
            value,
            entry_offset,
        } = entry;
        let group = self.owners.entry(owner).or_default();
        let prev = group.insert(name, CollectedValue { entry_offset, value });
        if let Some(p) = &prev {
            self.overwritten += 1;
            warn!(
                "config entry at offset 0x{:X} overrides earlier entry at offset 0x{:X}",
                entry_offset, p.entry_offset
            );
        }
        prev
    }

    pub fn get(&self, owner: &str, name: &str) -> Option<&CollectedValue> {
        self.owners.get(owner).and_then(|g| g.get(name))
    }

    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.owners.keys().map(String::as_str)
    }

    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    pub fn len(&self) -> usize {
        self.owners.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn overwritten(&self) -> usize {
        self.overwritten
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (owner, group) in &self.owners {
            write_group_header(out, owner)?;
            for (name, cv) in group {
                write_setting(out, name, &cv.value)?;
            }
            writeln!(out)?;
        }
        out.flush()
    }
}
