use crate::score::{
    calc_score, score_title, ScorePattern, ScorePatternTable, WinDeclaration, FU_LIST, MAX_HAN,
};
use crate::util::misc::*;

// 点数計算モード
// 使用方法: $ mahjong-scoring C 3.30 [-d] [-t] [-b honba] [-k sticks] [-p]
#[derive(Debug, Default)]
pub struct CalculatorApp {
    exp: String,
    dealer: bool,
    tsumo: bool,
    honba: usize,
    sticks: usize,
    table_only: bool,
}

impl CalculatorApp {
    pub fn new(args: &[String]) -> Self {
        let mut app = Self::default();
        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-d" => app.dealer = true,
                "-t" => app.tsumo = true,
                "-b" => app.honba = next_value(&mut it, "-b"),
                "-k" => app.sticks = next_value(&mut it, "-k"),
                "-p" => app.table_only = true,
                opt => {
                    if !opt.starts_with('-') && app.exp.is_empty() {
                        app.exp = opt.to_string();
                    } else {
                        error_exit(format!("unknown option: {}", opt))
                    }
                }
            }
        }
        app
    }

    pub fn run(&mut self) {
        let table = ScorePatternTable::new();
        if self.table_only {
            print_pattern_table(&table);
            return;
        }
        if self.exp.is_empty() {
            error_exit("expression missing (e.g. 3.30)")
        }

        // "han.fu"形式 満貫以上は符を省略可能 (e.g. "6")
        let mut split = self.exp.split('.');
        let han: usize = match split.next().unwrap().parse() {
            Ok(n) => n,
            Err(e) => error_exit(format!("{}: '{}'", e, self.exp)),
        };
        let fu: usize = match split.next() {
            Some(s) => match s.parse() {
                Ok(n) => n,
                Err(e) => error_exit(format!("{}: '{}'", e, self.exp)),
            },
            None => 0,
        };

        let decl = WinDeclaration {
            winner: 0,
            loser: if self.tsumo { None } else { Some(1) },
            han,
            fu,
            is_drawn: self.tsumo,
        };
        let dealer = if self.dealer { 0 } else { 3 };
        match calc_score(&table, &decl, dealer, self.honba, self.sticks) {
            Ok(score) => {
                let title = score_title(han);
                println!(
                    "{}飜{}符{} {} {}",
                    han,
                    fu,
                    if title.is_empty() {
                        "".to_string()
                    } else {
                        format!(" ({})", title)
                    },
                    if self.dealer { "親" } else { "子" },
                    if self.tsumo { "ツモ" } else { "ロン" },
                );
                println!("total: {}", score.total);
                println!("payments: {}", vec_to_string(&score.payments));
                if self.honba > 0 {
                    println!("honba_payment: {}", score.honba_payment);
                }
                if self.sticks > 0 {
                    println!("stick_payment: {}", score.stick_payment);
                }
            }
            Err(e) => error_exit(e),
        }
    }
}

// 全パターンの一覧表示
fn print_pattern_table(table: &ScorePatternTable) {
    println!("          親ロン  子ロン  親ツモ      子ツモ");
    for han in 1..=MAX_HAN {
        if han >= 5 {
            let Ok(p) = table.lookup(han, 0) else {
                continue;
            };
            print_pattern_row(&format!("{:>2}飜      ", han), p, han);
            continue;
        }
        for &fu in &FU_LIST {
            let Ok(p) = table.lookup(han, fu) else {
                continue;
            };
            // 満貫への昇格行は段位の行でまとめて表示
            if (p.han, p.fu) != (han, fu) {
                continue;
            }
            print_pattern_row(&format!("{:>2}飜{:>3}符 ", han, fu), p, han);
        }
    }
}

fn print_pattern_row(label: &str, p: &ScorePattern, han: usize) {
    println!(
        "{}{:6}  {:6}  {:6}all  {:6}/{:6}  {}",
        label,
        p.dealer_ron,
        p.non_dealer_ron,
        p.dealer_tsumo_each,
        p.non_dealer_tsumo_dealer,
        p.non_dealer_tsumo_other,
        score_title(han),
    );
}
