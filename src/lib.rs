//! taskboard - a three-column task board
//!
//! This library provides the core functionality for the taskboard CLI:
//! tasks move between Todo, In Progress and Completed columns by drag and
//! drop, and every change is written to a JSON snapshot.
//!
//! # Core Concepts
//!
//! - **Store**: the flat task list plus column definitions, persisted whole
//!   after every mutation
//! - **Board**: the per-column view projected from the store
//! - **Drag**: a move described by source and destination positions
//!
//! # Module Organization
//!
//! - `model`: tasks, columns, status and priority
//! - `board`: projection of tasks into ordered columns
//! - `reorder`: drag-and-drop reorder engine
//! - `store`: mutation API with a persistence hook
//! - `dashboard`: store and board kept in step
//! - `validate`: create and edit form validation
//! - `storage`: snapshot persistence (JSON file or in memory)
//! - `lock`: file locking and atomic writes
//! - `config`: configuration loading from `taskboard.toml`
//! - `people`, `seed`: the static assignee directory and example board
//! - `display`, `output`: human and JSON rendering
//! - `cli`: command-line interface using clap
//! - `error`: error types and result aliases

pub mod board;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod lock;
pub mod model;
pub mod output;
pub mod people;
pub mod reorder;
pub mod seed;
pub mod storage;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
