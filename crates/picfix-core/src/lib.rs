//! PicFix Core - Raster editing library
//!
//! This crate provides the editing engine behind PicFix: image decoding and
//! encoding, geometric and color transforms, undoable commands with a
//! two-stack history, and the session that ties them to a viewport.
//!
//! Persistence lives behind the [`EditLog`] trait so the engine never
//! depends on a database.

pub mod color;
pub mod command;
pub mod config;
pub mod decode;
pub mod edit_log;
pub mod encode;
pub mod error;
pub mod history;
pub mod raster;
pub mod session;
pub mod transform;
pub mod viewport;

pub use command::{Command, Document, Edit};
pub use config::EditorConfig;
pub use edit_log::EditLog;
pub use error::EditError;
pub use history::{History, HistoryEvent, HistoryEventKind, Observer};
pub use raster::{Raster, Rect, CHANNELS};
pub use session::{Affordances, SaveReport, Session};
pub use transform::{FlipAxis, RotateDirection};
pub use viewport::{ScrollBar, Viewport, ZoomChange, ZoomState};
