#![allow(non_snake_case)]

// Формат контейнера
pub mod consts;
pub mod error;
pub mod header;
pub mod record;
pub mod value;

// Сборка вывода и полный проход
pub mod render;
pub mod decoder;

// Ввод/вывод вокруг декодера
pub mod config;
pub mod source;
pub mod cli;

// Удобные реэкспорты
pub use config::{NxCfgConfig, RenderMode};
pub use decoder::{collect_entries, decode_bytes, decode_file, decode_reader, DecodeStats};
pub use error::{CfgError, Result};
pub use record::{Entry, RecordWalker};
pub use value::{SettingType, SettingValue};
