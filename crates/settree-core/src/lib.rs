//! # settree
//!
//! An automatic multi-level settings tree for configuring computational jobs.
//!
//! A [`Settings`] node maps keys to values, where a value is a scalar, a list, or
//! another node. Missing branches are created when walked through mutably, so deep
//! structures can be built in one statement:
//!
//! ```
//! use settree::{Settings, ig};
//!
//! let mut s = Settings::new();
//! s["input"]["global"]["run_type"] = "energy".into();
//! s.set_path("input.global.print_level", "low").unwrap();
//!
//! assert_eq!(s.get_path("input.global.run_type").unwrap().as_str(), Some("energy"));
//! assert!(s.contains(ig("INPUT")));
//! ```
//!
//! ## Layout
//!
//! - **[`core`]: The store.** Keys, values, plain trees and the [`Settings`] node with its
//!   lookup, merge (`soft_update`, `update`, `merge`) and rendering operations.
//!
//! - **[`io`]: Files.** Reading and writing settings trees as TOML or JSON.
//!
//! - **[`render`]: Consumers.** Turning a settings branch into keyword-block input text.
//!
//! A tree is single-threaded: list leaves are shared between copies through reference
//! counting, so `Settings` is not `Send`. Build one tree per thread and exchange
//! [`PlainMap`]s between them.

pub mod core;
pub mod io;
pub mod render;

pub use crate::core::error::SettingsError;
pub use crate::core::key::{Key, Query, ig};
pub use crate::core::plain::{Plain, PlainMap};
pub use crate::core::settings::Settings;
pub use crate::core::value::{List, Value};
