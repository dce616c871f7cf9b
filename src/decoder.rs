//! decoder — один полный проход: заголовок -> обход записей -> вывод.
//!
//! Проход либо доходит ровно до declared_size, либо прерывается на первой
//! структурной ошибке. В режиме Sorted при ошибке не выводится ничего; в режиме
//! Stream уже напечатанные строки остаются, остальное не печатается.

use log::info;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use crate::config::RenderMode;
use crate::error::{CfgError, Result};
use crate::header;
use crate::record::{Entry, RecordWalker};
use crate::render::{SettingsTree, StreamRenderer};

/// Summary of a successful decode pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub declared_size: u64,
    pub records: usize,
    /// Distinct owners.
    pub owners: usize,
    /// Records whose (owner, name) pair was already seen earlier in the stream.
    pub duplicates: usize,
}

/// Прочитать и провалидировать все записи, не печатая их.
pub fn collect_entries<R: Read>(mut reader: R, actual_size: u64) -> Result<Vec<Entry>> {
    let declared = header::read_and_validate(&mut reader, actual_size)?;
    RecordWalker::new(reader, declared).collect()
}

/// Decode a container from `reader` whose real length is `actual_size` and write
/// the rendered settings to `out`.
pub fn decode_reader<R: Read, W: Write>(
    mut reader: R,
    actual_size: u64,
    mode: RenderMode,
    out: &mut W,
) -> Result<DecodeStats> {
    let declared = header::read_and_validate(&mut reader, actual_size)?;
    info!("decoding settings container: 0x{:X} bytes, mode={}", declared, mode);

    let mut walker = RecordWalker::new(reader, declared);
    let mut stats = DecodeStats {
        declared_size: declared as u64,
        ..Default::default()
    };

    match mode {
        RenderMode::Stream => {
            let mut renderer = StreamRenderer::new(&mut *out);
            let mut owners: HashSet<String> = HashSet::new();
            let mut seen: HashSet<(String, String)> = HashSet::new();
            while let Some(entry) = walker.next_entry()? {
                renderer.push(&entry)?;
                stats.records += 1;
                if !seen.insert((entry.owner.clone(), entry.name.clone())) {
                    stats.duplicates += 1;
                }
                owners.insert(entry.owner);
            }
            renderer.finish()?;
            stats.owners = owners.len();
        }
        RenderMode::Sorted => {
            let mut tree = SettingsTree::new();
            while let Some(entry) = walker.next_entry()? {
                tree.insert(entry);
                stats.records += 1;
            }
            tree.render(out)?;
            stats.owners = tree.owner_count();
            stats.duplicates = tree.overwritten();
        }
    }

    info!(
        "decoded {} record(s) from {} owner(s), {} duplicate(s)",
        stats.records, stats.owners, stats.duplicates
    );
    Ok(stats)
}

/// In-memory container: the actual size is the slice length.
pub fn decode_bytes<W: Write>(bytes: &[u8], mode: RenderMode, out: &mut W) -> Result<DecodeStats> {
    decode_reader(bytes, bytes.len() as u64, mode, out)
}

/// Открыть файл и декодировать его. `actual_size` берётся из метаданных вызывающим.
/// Файл закрывается при выходе из функции на любом пути.
pub fn decode_file<W: Write>(
    path: &Path,
    actual_size: u64,
    mode: RenderMode,
    out: &mut W,
) -> Result<DecodeStats> {
    let f = File::open(path).map_err(|_| CfgError::SourceUnavailable {
        path: path.to_path_buf(),
    })?;
    decode_reader(BufReader::new(f), actual_size, mode, out)
}
