use std::collections::HashMap;

use serde::Serialize;

use crate::model::*;
use crate::EngineError;

// 有効な符の一覧 (20符・25符は2飜以上でのみ成立)
pub const FU_LIST: [usize; 11] = [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110];
pub const MAX_HAN: usize = 13;

// (han, fu)ごとの支払いパターン 満貫以上は符に依存しないのでfu=0の行に集約
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScorePattern {
    pub han: usize,
    pub fu: usize,
    pub dealer_ron: Point,              // 親の和了 直撃の支払い
    pub non_dealer_ron: Point,          // 子の和了 直撃の支払い
    pub dealer_tsumo_each: Point,       // 親ツモ 各家の支払い
    pub non_dealer_tsumo_dealer: Point, // 子ツモ 親の支払い
    pub non_dealer_tsumo_other: Point,  // 子ツモ 子の支払い
}

fn ceil100(n: Point) -> Point {
    (n + 99) / 100 * 100
}

// 基本点 4飜以下は fu × 2^(han+4) を満貫(2000点)で頭打ち
// 5飜以上は固定の段位
fn calc_base_points(han: usize, fu: usize) -> Point {
    match han {
        0..=4 => {
            let base = fu as Point * (1 << (han + 4));
            base.min(2000)
        }
        5 => 2000,       // 満貫
        6..=7 => 3000,   // 跳満
        8..=10 => 4000,  // 倍満
        11..=12 => 6000, // 三倍満
        _ => 8000,       // 数え役満
    }
}

pub fn score_title(han: usize) -> &'static str {
    match han {
        0..=4 => "",
        5 => "満貫",
        6..=7 => "跳満",
        8..=10 => "倍満",
        11..=12 => "三倍満",
        _ => "数え役満",
    }
}

// 満貫への昇格判定 該当する(han, fu)の組は表に行を持たない
#[inline]
fn is_mangan(han: usize, fu: usize) -> bool {
    han >= 5 || (han == 3 && fu >= 70) || (han == 4 && fu >= 40)
}

impl ScorePattern {
    fn from_base(han: usize, fu: usize, base: Point) -> Self {
        Self {
            han,
            fu,
            dealer_ron: ceil100(base * 6),
            non_dealer_ron: ceil100(base * 4),
            dealer_tsumo_each: ceil100(base * 2),
            non_dealer_tsumo_dealer: ceil100(base * 2),
            non_dealer_tsumo_other: ceil100(base),
        }
    }
}

// 起動時に全パターンを構築する点数表 参照のみで変更されない
#[derive(Debug)]
pub struct ScorePatternTable {
    patterns: HashMap<(usize, usize), ScorePattern>,
}

impl ScorePatternTable {
    pub fn new() -> Self {
        let mut patterns = HashMap::new();
        for han in 1..=4 {
            for &fu in &FU_LIST {
                if (fu == 20 || fu == 25) && han < 2 {
                    continue;
                }
                if is_mangan(han, fu) {
                    continue;
                }
                let pattern = ScorePattern::from_base(han, fu, calc_base_points(han, fu));
                patterns.insert((han, fu), pattern);
            }
        }
        for han in 5..=MAX_HAN {
            let pattern = ScorePattern::from_base(han, 0, calc_base_points(han, 0));
            patterns.insert((han, 0), pattern);
        }
        Self { patterns }
    }

    // 満貫以上は符を無視して段位の行を参照
    pub fn lookup(&self, han: usize, fu: usize) -> Result<&ScorePattern, EngineError> {
        let key = if han >= 5 {
            (han, 0)
        } else if is_mangan(han, fu) {
            (5, 0)
        } else {
            (han, fu)
        };
        self.patterns
            .get(&key)
            .ok_or(EngineError::PatternNotFound(han, fu))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for ScorePatternTable {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_table_completeness() {
    let table = ScorePatternTable::new();

    // 1飜:9行, 2飜:11行, 3飜:6行, 4飜:3行, 5~13飜:9行
    assert_eq!(table.len(), 38);

    for han in 1..=MAX_HAN {
        for &fu in &FU_LIST {
            if (fu == 20 || fu == 25) && han < 2 {
                continue;
            }
            let pattern = table.lookup(han, fu).unwrap();
            if is_mangan(han, fu) {
                assert_eq!(pattern.fu, 0);
            } else {
                assert_eq!((pattern.han, pattern.fu), (han, fu));
            }
        }
    }
}

#[test]
fn test_mangan_promotion() {
    let table = ScorePatternTable::new();

    // (3, 70)以上と(4, 40)以上は満貫に昇格
    let mangan = table.lookup(5, 30).unwrap();
    assert_eq!(table.lookup(3, 80).unwrap(), mangan);
    assert_eq!(table.lookup(3, 70).unwrap(), mangan);
    assert_eq!(table.lookup(4, 40).unwrap(), mangan);
    assert_ne!(table.lookup(4, 30).unwrap(), table.lookup(6, 30).unwrap());
}

#[test]
fn test_pattern_values() {
    let table = ScorePatternTable::new();

    let p = table.lookup(3, 30).unwrap();
    assert_eq!(p.dealer_ron, 12000);
    assert_eq!(p.dealer_tsumo_each, 4000);
    assert_eq!(p.non_dealer_ron, 8000);
    assert_eq!(p.non_dealer_tsumo_dealer, 4000);
    assert_eq!(p.non_dealer_tsumo_other, 2000);

    // 満貫未満の行は100点単位への切り上げが入る
    let p = table.lookup(1, 30).unwrap();
    assert_eq!(p.dealer_ron, 5800);
    assert_eq!(p.non_dealer_ron, 3900);
    assert_eq!(p.dealer_tsumo_each, 2000);
    assert_eq!(p.non_dealer_tsumo_dealer, 2000);
    assert_eq!(p.non_dealer_tsumo_other, 1000);

    // 跳満
    let p = table.lookup(7, 40).unwrap();
    assert_eq!(p.dealer_ron, 18000);
    assert_eq!(p.non_dealer_ron, 12000);
}
