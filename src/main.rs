#![allow(warnings)]
//! Keeplist Frontend Entry Point

mod app;
mod components;
mod context;
mod download;
mod markdown;
mod models;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;
use rolling_logger::LoggerConfig;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = rolling_logger::init_logger(LoggerConfig::new("Keeplist").with_capacity(300)) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }
    let _ = rolling_logger::info("[APP] mounting");
    mount_to_body(App);
}
