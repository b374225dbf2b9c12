extern crate console_error_panic_hook;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate wasm_bindgen_test;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

pub mod config;
pub mod dom;
pub mod error;
pub mod nav;
pub mod post;
pub mod presenter;
pub mod search;
pub mod slot;
pub mod store;
pub mod theme;
pub mod view;

use wasm_bindgen::prelude::*;

pub use config::FeedConfig;
pub use error::{FeedError, Result};
pub use post::{Author, Media, MediaKind, Post};
pub use presenter::{FeedEvent, FeedPresenter, MediaSelection, Outcome};
pub use slot::{LocalStorageSlot, MemorySlot, PersistenceSlot};
pub use store::PostStore;

pub const POSTS_LOCAL_STORAGE_KEY: &str = "socialfeed_posts";
pub const THEME_LOCAL_STORAGE_KEY: &str = "theme";
pub const ROOT_ELEMENT_SELECTOR: &str = "#social_feed_root";

pub const CURRENT_USER_NAME: &str = "You";
pub const CURRENT_USER_AVATAR: &str = "Y";

/// Most verbose level forwarded to the browser console.
pub const CONSOLE_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

pub const SUGGESTED_PROFILES: [&str; 3] = ["alex", "mira", "sam"];

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(contents: &str);
}

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        console_log(&format!("[{}] {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
pub fn init_logger() {
    static LOGGER: ConsoleLogger = ConsoleLogger;

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(CONSOLE_LOG_LEVEL);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logger() {
    use std::io::Write;

    let _ = env_logger::builder()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .is_test(true)
        .try_init();
}

#[wasm_bindgen]
pub fn bootstrap() -> std::result::Result<(), JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    init_logger();

    dom::FeedPage::mount(FeedConfig::default())?;
    Ok(())
}
