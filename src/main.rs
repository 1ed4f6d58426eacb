#![allow(warnings)]
//! Todo Signals Frontend Entry Point

mod models;
mod filtering;
mod scheduler;
mod debounce;
mod storage;
mod config;
mod store;
mod controller;
mod components;
mod app;

use std::rc::Rc;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use storage::{BrowserStorage, KeyValueStorage, MemoryStorage};

fn main() {
    console_error_panic_hook::set_once();

    let (storage, storage_err) = match BrowserStorage::open() {
        Ok(storage) => (Rc::new(storage) as Rc<dyn KeyValueStorage>, None),
        Err(e) => (Rc::new(MemoryStorage::new()) as Rc<dyn KeyValueStorage>, Some(e)),
    };
    let (config, config_err) = match AppConfig::load(&*storage) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if rolling_logger::init_logger("TodoSignals", config.level_filter(), rolling_logger::DEFAULT_CAPACITY).is_err() {
        web_sys::console::warn_1(&"[APP] Logger already installed".into());
    }
    if let Some(e) = config_err {
        log::warn!("[APP] Ignoring config overrides: {}", e);
    }
    if let Some(e) = storage_err {
        log::warn!("[APP] {}; todos will not survive a reload", e);
    }
    log::info!("[APP] Starting with {:?}", config.store);

    let store_config = config.store;
    mount_to_body(move || view! { <App config=store_config storage=storage /> });
}
