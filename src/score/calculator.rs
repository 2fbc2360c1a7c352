use serde::{Deserialize, Serialize};

use super::pattern::{ScorePatternTable, FU_LIST, MAX_HAN};
use crate::model::*;
use crate::EngineError;

// 和了宣言 han/fuは役計算側で確定済みの値を受け取る
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinDeclaration {
    pub winner: Seat,
    pub loser: Option<Seat>, // ロンの場合のみ放銃者をセット
    pub han: usize,
    pub fu: usize,
    pub is_drawn: bool, // ツモ和了
}

impl WinDeclaration {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.winner >= SEAT {
            return Err(EngineError::Validation(format!(
                "invalid winner seat: {}",
                self.winner
            )));
        }
        if self.han < 1 || self.han > MAX_HAN {
            return Err(EngineError::Validation(format!("invalid han: {}", self.han)));
        }
        if self.han < 5 {
            if !FU_LIST.contains(&self.fu) {
                return Err(EngineError::Validation(format!("invalid fu: {}", self.fu)));
            }
            if (self.fu == 20 || self.fu == 25) && self.han < 2 {
                return Err(EngineError::Validation(format!(
                    "fu {} requires at least 2 han",
                    self.fu
                )));
            }
        }
        match (self.is_drawn, self.loser) {
            (true, Some(_)) => {
                return Err(EngineError::Validation(
                    "self-draw win cannot carry a loser seat".to_string(),
                ));
            }
            (false, None) => {
                return Err(EngineError::Validation(
                    "discard win requires a loser seat".to_string(),
                ));
            }
            (false, Some(loser)) => {
                if loser >= SEAT {
                    return Err(EngineError::Validation(format!(
                        "invalid loser seat: {}",
                        loser
                    )));
                }
                if loser == self.winner {
                    return Err(EngineError::Validation(
                        "winner and loser must differ".to_string(),
                    ));
                }
            }
            (true, None) => {}
        }
        Ok(())
    }
}

// 和了の得点計算結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total: Point,            // 和了者の獲得点 (供託込み)
    pub payments: [Point; SEAT], // 各座席の支払額 (正の値, 和了者は0)
    pub honba_payment: Point,    // 本場による加算の総額
    pub stick_payment: Point,    // 供託リーチ棒による加算
}

// 宣言と現在の本場・供託から支払いの内訳を計算 (副作用なし)
pub fn calc_score(
    table: &ScorePatternTable,
    decl: &WinDeclaration,
    dealer: Seat,
    honba_sticks: usize,
    riichi_sticks: usize,
) -> Result<ScoreResult, EngineError> {
    decl.validate()?;
    let pattern = table.lookup(decl.han, decl.fu)?;
    let is_dealer = decl.winner == dealer;
    let honba = honba_sticks as Point;

    let mut payments = [0; SEAT];
    if decl.is_drawn {
        for s in 0..SEAT {
            if s == decl.winner {
                continue;
            }
            payments[s] = if is_dealer {
                pattern.dealer_tsumo_each + honba * HONBA_TSUMO
            } else if s == dealer {
                pattern.non_dealer_tsumo_dealer + honba * HONBA_TSUMO
            } else {
                pattern.non_dealer_tsumo_other + honba * HONBA_TSUMO
            };
        }
    } else if let Some(loser) = decl.loser {
        let base = if is_dealer {
            pattern.dealer_ron
        } else {
            pattern.non_dealer_ron
        };
        payments[loser] = base + honba * HONBA_RON;
    }

    let stick_payment = riichi_sticks as Point * RIICHI_STAKE;
    let total = payments.iter().sum::<Point>() + stick_payment;

    Ok(ScoreResult {
        total,
        payments,
        honba_payment: honba * HONBA_RON,
        stick_payment,
    })
}

#[cfg(test)]
fn tsumo(winner: Seat, han: usize, fu: usize) -> WinDeclaration {
    WinDeclaration {
        winner,
        loser: None,
        han,
        fu,
        is_drawn: true,
    }
}

#[cfg(test)]
fn ron(winner: Seat, loser: Seat, han: usize, fu: usize) -> WinDeclaration {
    WinDeclaration {
        winner,
        loser: Some(loser),
        han,
        fu,
        is_drawn: false,
    }
}

#[test]
fn test_dealer_tsumo() {
    let table = ScorePatternTable::new();
    let result = calc_score(&table, &tsumo(0, 3, 30), 0, 0, 0).unwrap();
    assert_eq!(result.payments, [0, 4000, 4000, 4000]);
    assert_eq!(result.total, 12000);
}

#[test]
fn test_non_dealer_tsumo() {
    let table = ScorePatternTable::new();
    let result = calc_score(&table, &tsumo(1, 3, 30), 0, 0, 0).unwrap();
    assert_eq!(result.payments, [4000, 0, 2000, 2000]);
    assert_eq!(result.total, 8000);
}

#[test]
fn test_non_dealer_ron() {
    let table = ScorePatternTable::new();
    let result = calc_score(&table, &ron(1, 2, 3, 30), 0, 0, 0).unwrap();
    assert_eq!(result.payments, [0, 0, 8000, 0]);
    assert_eq!(result.total, 8000);
}

#[test]
fn test_honba_and_stick_surcharge() {
    let table = ScorePatternTable::new();

    // ロン: 放銃者が本場×300を上乗せ, 供託は和了者の総取り
    let result = calc_score(&table, &ron(1, 2, 3, 30), 0, 2, 1).unwrap();
    assert_eq!(result.payments[2], 8600);
    assert_eq!(result.honba_payment, 600);
    assert_eq!(result.stick_payment, 1000);
    assert_eq!(result.total, 9600);

    // ツモ: 各家が本場×100ずつ負担
    let result = calc_score(&table, &tsumo(0, 3, 30), 0, 2, 1).unwrap();
    assert_eq!(result.payments, [0, 4200, 4200, 4200]);
    assert_eq!(result.total, 13600);
}

#[test]
fn test_win_declaration_validation() {
    let table = ScorePatternTable::new();

    // ツモに放銃者は指定できない
    let mut decl = tsumo(0, 3, 30);
    decl.loser = Some(1);
    assert!(calc_score(&table, &decl, 0, 0, 0).is_err());

    // ロンには放銃者が必須
    let mut decl = ron(1, 2, 3, 30);
    decl.loser = None;
    assert!(calc_score(&table, &decl, 0, 0, 0).is_err());

    // 和了者と放銃者が同一
    assert!(calc_score(&table, &ron(1, 1, 3, 30), 0, 0, 0).is_err());

    // han/fuの範囲外
    assert!(calc_score(&table, &tsumo(0, 0, 30), 0, 0, 0).is_err());
    assert!(calc_score(&table, &tsumo(0, 14, 0), 0, 0, 0).is_err());
    assert!(calc_score(&table, &tsumo(0, 2, 23), 0, 0, 0).is_err());
    assert!(calc_score(&table, &tsumo(0, 1, 20), 0, 0, 0).is_err());
}
