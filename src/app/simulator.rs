use std::sync::Arc;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::control::GameEngine;
use crate::listener::{EventPrinter, EventWriter, Listener};
use crate::model::*;
use crate::score::{ScorePatternTable, WinDeclaration, FU_LIST};
use crate::util::misc::*;
use crate::EngineError;

// ランダムな宣言でゲームを自動進行するシミュレーションモード
// 使用方法: $ mahjong-scoring S [-s seed] [-g n_game] [-t] [-q] [-w]
#[derive(Debug)]
pub struct SimulatorApp {
    seed: u64,
    n_game: u32,
    rule: Rule,
    quiet: bool,
    write: bool,
}

impl SimulatorApp {
    pub fn new(args: &[String]) -> Self {
        let mut app = Self {
            seed: 0,
            n_game: 1,
            rule: Rule::default(),
            quiet: false,
            write: false,
        };
        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-s" => app.seed = next_value(&mut it, "-s"),
                "-g" => app.n_game = next_value(&mut it, "-g"),
                "-t" => app.rule.format = GameFormat::Tonpuu,
                "-q" => app.quiet = true,
                "-w" => app.write = true,
                opt => error_exit(format!("unknown option: {}", opt)),
            }
        }
        app
    }

    pub fn run(&mut self) {
        let mut seed = self.seed;
        if seed == 0 {
            seed = unixtime_now();
            crate::info!("Random seed: {}", seed);
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let table = Arc::new(ScorePatternTable::new());

        let mut sum_rank = [0u64; SEAT];
        let mut sum_delta = [0i64; SEAT];
        for _ in 0..self.n_game {
            let settlement = self.simulate_one(&mut rng, table.clone());
            for row in &settlement {
                sum_rank[row.seat] += row.rank as u64;
                sum_delta[row.seat] += (row.final_points - self.rule.initial_points) as i64;
            }
        }

        for s in 0..SEAT {
            println!(
                "seat{} avg_rank: {:.2}, avg_delta_score: {:6}",
                s,
                sum_rank[s] as f32 / self.n_game as f32,
                sum_delta[s] / self.n_game as i64,
            );
        }
    }

    fn simulate_one(
        &self,
        rng: &mut StdRng,
        table: Arc<ScorePatternTable>,
    ) -> [SettlementRow; SEAT] {
        let mut listeners: Vec<Box<dyn Listener>> = vec![];
        if !self.quiet {
            listeners.push(Box::new(EventPrinter));
        }
        if self.write {
            listeners.push(Box::new(EventWriter::new()));
        }

        let mut engine = GameEngine::new(self.rule.clone(), table, listeners)
            .unwrap_or_else(|e| error_exit(e));
        engine.start().unwrap_or_else(|e| error_exit(e));

        loop {
            // 局ごとに0~2人がランダムにリーチ
            for _ in 0..rng.gen_range(0..3) {
                let seat = rng.gen_range(0..SEAT);
                match engine.declare_riichi(seat) {
                    Ok(_) | Err(EngineError::Validation(_)) => {}
                    Err(e) => error_exit(e),
                }
            }

            let result = if rng.gen_bool(0.2) {
                let tenpais: Vec<Seat> = (0..SEAT).filter(|_| rng.gen_bool(0.4)).collect();
                engine.declare_draw(&tenpais)
            } else {
                engine.declare_win(&random_win(rng))
            };
            match result {
                Ok(result) => {
                    if result.ended {
                        return result.settlement.unwrap_or_else(|| {
                            error_exit("game ended without settlement")
                        });
                    }
                }
                Err(EngineError::Validation(_)) => {}
                Err(e) => error_exit(e),
            }
        }
    }
}

fn random_win(rng: &mut StdRng) -> WinDeclaration {
    let han = if rng.gen_bool(0.1) {
        rng.gen_range(5..=13)
    } else {
        rng.gen_range(1..=4)
    };
    let fu = if han >= 5 {
        0
    } else if han == 1 {
        FU_LIST[rng.gen_range(2..FU_LIST.len())] // 1飜では20符・25符は不成立
    } else {
        FU_LIST[rng.gen_range(0..FU_LIST.len())]
    };

    let winner = rng.gen_range(0..SEAT);
    let is_drawn = rng.gen_bool(0.5);
    let loser = if is_drawn {
        None
    } else {
        Some((winner + rng.gen_range(1..SEAT)) % SEAT)
    };
    WinDeclaration {
        winner,
        loser,
        han,
        fu,
        is_drawn,
    }
}
