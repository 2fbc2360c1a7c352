// ゲームの進行・精算・管理を行うモジュール
mod engine;
mod repository;
mod settlement;

pub use self::{
    engine::{DeclarationResult, GameEngine},
    repository::GameRepository,
    settlement::calc_settlement,
};
