//! Lifecycle check for the UI5 version declared in `manifest.json` files.
//!
//! - [`version`]: catalog, quarter resolution, validation and the checker
//! - [`manifest`]: reading and rewriting the version field of a manifest
//! - [`action`]: end-to-end run with GitHub Action outputs and step summary

pub mod action;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod logging;
pub mod manifest;
pub mod report;
pub mod version;
