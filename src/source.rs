//! source — путь к файлу настроек и проверки до запуска декодера.
//!
//! resolve_path: $VAR / ${VAR} -> ~ (dirs::home_dir) -> абсолютный путь (лексически, без обращения к ФС).
//! check_preconditions: существует, не каталог, размер > 4 и не больше лимита.

use log::debug;
use std::path::{Component, Path, PathBuf};

use crate::config::NxCfgConfig;
use crate::consts::HDR_SIZE;
use crate::error::{CfgError, Result};

/// Подставить переменные окружения вида `$NAME` и `${NAME}`.
/// Неизвестные переменные и одиночный `$` остаются как есть.
pub fn expand_vars(input: &str) -> String {
    expand_vars_with(input, |name| std::env::var(name).ok())
}

fn expand_vars_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        match (name.is_empty(), lookup(name)) {
            (false, Some(val)) => out.push_str(&val),
            _ => {
                // оставить исходный текст без изменений
                out.push('$');
                out.push_str(&after[..consumed]);
            }
        }
        rest = &after[consumed..];
    }
    out.push_str(rest);
    out
}

/// Раскрыть `~` и `~/...` через домашний каталог пользователя (dirs::home_dir).
/// `~user` не поддерживается и остаётся как есть.
pub fn expand_user(input: &str) -> PathBuf {
    expand_user_with(input, dirs::home_dir())
}

fn expand_user_with(input: &str, home: Option<PathBuf>) -> PathBuf {
    let Some(home) = home.filter(|h| !h.as_os_str().is_empty()) else {
        return PathBuf::from(input);
    };
    if input == "~" {
        return home;
    }
    match input.strip_prefix("~/") {
        Some(tail) => home.join(tail),
        None => PathBuf::from(input),
    }
}

/// Лексическая нормализация: убрать `.` и схлопнуть `..` (не выше корня).
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if !at_root {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Превратить аргумент командной строки в абсолютный путь.
pub fn resolve_path(arg: &str) -> Result<PathBuf> {
    let p = expand_user(&expand_vars(arg));
    let abs = if p.is_absolute() {
        p
    } else {
        std::env::current_dir()?.join(p)
    };
    let abs = normalize(&abs);
    debug!("resolved '{}' -> {}", arg, abs.display());
    Ok(abs)
}

/// Проверки вызывающей стороны. Возвращает фактический размер файла.
pub fn check_preconditions(path: &Path, cfg: &NxCfgConfig) -> Result<u64> {
    let md = std::fs::metadata(path).map_err(|_| CfgError::SourceUnavailable {
        path: path.to_path_buf(),
    })?;
    if md.is_dir() {
        return Err(CfgError::SourceUnavailable {
            path: path.to_path_buf(),
        });
    }

    let size = md.len();
    if size <= HDR_SIZE as u64 {
        return Err(CfgError::FileTooSmall { size });
    }
    let max = cfg.effective_max_file_size();
    if size > max {
        return Err(CfgError::FileTooLarge { size, max });
    }
    Ok(size)
}
