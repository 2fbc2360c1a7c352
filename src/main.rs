#![warn(rust_2018_idioms)]

use mahjong_scoring::app::{CalculatorApp, SimulatorApp};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mode = if args.len() > 1 { args[1].as_str() } else { "C" };
    let app_args = &args[2.min(args.len())..];
    match mode {
        "C" => CalculatorApp::new(app_args).run(),
        "S" => SimulatorApp::new(app_args).run(),
        m => mahjong_scoring::error!("unknown mode: {}", m),
    }
}
