use std::{error, fmt};

use crate::model::{GameId, GameStatus};

// エンジンの操作が失敗した場合のエラー
// Validation系は状態を一切変更せずに呼び出し側へ返却する
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Validation(String),            // 呼び出し側が訂正可能な入力不正
    PatternNotFound(usize, usize), // 点数表の欠落 (han, fu) データ不備であり既定値で代替しない
    GameNotPlayable(GameStatus),   // PLAYING以外のゲームへの操作
    GameNotFound(GameId),
    InvariantViolation(String),    // 点数総和の不変条件違反 (内部バグ)
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation error: {}", msg),
            Self::PatternNotFound(han, fu) => {
                write!(f, "score pattern not found: {}han {}fu", han, fu)
            }
            Self::GameNotPlayable(status) => write!(f, "game is not playable: {:?}", status),
            Self::GameNotFound(id) => write!(f, "game not found: {}", id),
            Self::InvariantViolation(msg) => write!(f, "invariant violation: {}", msg),
        }
    }
}

impl error::Error for EngineError {}
