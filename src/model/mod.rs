// 得点計算エンジンのデータモデル
mod define;
mod event;
mod ledger;
mod rule;
mod settlement;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use event::*;
pub use ledger::*;
pub use rule::*;
pub use settlement::*;
