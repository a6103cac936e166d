//! 浏览器控制台日志
//!
//! 把 `log` 门面的记录转发到 `console.*`，核心库中的 `log::warn!` 等调用因此可见。

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = debug)]
    fn console_debug(msg: &str);

    #[wasm_bindgen(js_namespace = console, js_name = info)]
    fn console_info(msg: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(msg: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(msg: &str);
}

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("[{}] {}", record.target(), record.args());

        #[cfg(target_arch = "wasm32")]
        match record.level() {
            log::Level::Error => console_error(&msg),
            log::Level::Warn => console_warn(&msg),
            log::Level::Info => console_info(&msg),
            log::Level::Debug | log::Level::Trace => console_debug(&msg),
        }

        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{:<5} {}", record.level(), msg);
    }

    fn flush(&self) {}
}

/// 安装控制台日志，重复调用无副作用
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
