// (han, fu)から支払い点数を求めるモジュール
mod calculator;
mod pattern;

pub use self::{
    calculator::{calc_score, ScoreResult, WinDeclaration},
    pattern::{score_title, ScorePattern, ScorePatternTable, FU_LIST, MAX_HAN},
};
