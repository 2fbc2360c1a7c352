// 構造的な意味合いや一貫性を保つために以下のclippy警告は無効化
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

mod errors;

pub mod app;
pub mod control;
pub mod listener;
pub mod model;
pub mod score;
pub mod util;

pub use errors::EngineError;
