use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};

    /// Routes records to the browser console at the matching severity.
    pub struct ConsoleLogger;

    pub static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = format!("[{:<5} {}] {}", record.level(), record.target(), record.args());
            let value = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&value),
                Level::Warn => web_sys::console::warn_1(&value),
                Level::Info => web_sys::console::info_1(&value),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
            }
        }

        fn flush(&self) {}
    }
}

#[cfg(target_arch = "wasm32")]
fn install() -> bool {
    log::set_logger(&console::LOGGER).is_ok()
}

/// The terminal logger passes everything; `log::max_level` does the filtering
/// so that later calls can change it.
#[cfg(not(target_arch = "wasm32"))]
fn install() -> bool {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        LevelFilter::Trace,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .is_ok()
}

/// Installs the logger on first use. Later calls only adjust the level.
pub fn init(level: LevelFilter) {
    let installed = install();
    log::set_max_level(level);
    if installed {
        log::debug!("logger installed at {level}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_only_moves_the_level() {
        init(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        init(LevelFilter::Warn);
        assert_eq!(log::max_level(), LevelFilter::Warn);
        log::warn!("still logging after a second init");
    }
}
