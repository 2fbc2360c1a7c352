// コマンドラインから起動するアプリケーション
mod calculator;
mod simulator;

pub use self::{calculator::CalculatorApp, simulator::SimulatorApp};
