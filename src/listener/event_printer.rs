use super::*;
use crate::score::score_title;

// イベントを標準出力に表示するListener
#[derive(Debug, Default)]
pub struct EventPrinter;

impl EventPrinter {
    fn print_score_change(&self, scores: &[Point; SEAT], deltas: &[Point; SEAT]) {
        for s in 0..SEAT {
            println!(
                "seat {}: {} -> {} ({:+})",
                s,
                scores[s],
                scores[s] + deltas[s],
                deltas[s],
            );
        }
    }
}

impl Listener for EventPrinter {
    fn notify_event(&mut self, ledger: &GameLedger, event: &Event) {
        match event {
            Event::Begin(e) => {
                println!("[begin] scores: {:?}", e.scores);
            }
            Event::Riichi(e) => {
                println!("[riichi] seat {} (sticks: {})", e.seat, e.riichi_sticks);
            }
            Event::Win(e) => {
                let title = score_title(e.han);
                println!(
                    "[win] round {}: seat {} {}{}{}飜{}符 +{}",
                    ledger.round,
                    e.winner,
                    if e.is_drawn { "tsumo " } else { "ron " },
                    if title.is_empty() { "" } else { title },
                    e.han,
                    e.fu,
                    e.total,
                );
                self.print_score_change(&e.scores, &e.delta_scores);
            }
            Event::Draw(e) => {
                println!("[draw] round {}: tenpais: {:?}", ledger.round, e.tenpais);
                self.print_score_change(&e.scores, &e.delta_scores);
            }
            Event::End(e) => {
                println!("[end] {}", e.reason);
                for row in &e.settlement {
                    println!("{}", row);
                }
            }
        }
    }
}
