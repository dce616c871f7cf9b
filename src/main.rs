use env_logger::{Builder, Env};

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — warn (stdout остаётся только под настройки).
    // Пример: RUST_LOG=debug ./nxcfg PRODINFO.cfg
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = NxCfg::cli::run() {
        // Одна строка диагностики и код 1.
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
