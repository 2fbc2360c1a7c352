use crate::model::*;
use crate::util::misc::rank_by_index_vec;
use crate::EngineError;

// 最終精算 順位付け・基準点との差の丸め・ウマの加算を行う
// 2~4位は1000点単位に丸め(Rust整数除算は0方向への切り捨て),
// 1位は他3人の丸め値の合計の符号反転を引き受けて合計を0に保つ
pub fn calc_settlement(
    ledger: &GameLedger,
    rule: &Rule,
) -> Result<[SettlementRow; SEAT], EngineError> {
    let scores = ledger.scores();
    let ranking = rank_by_index_vec(&scores); // 順位順の座席番号

    let mut raw = [0; SEAT];
    let mut rounded = [0; SEAT];
    for r in 1..SEAT {
        let seat = ranking[r];
        raw[r] = scores[seat] - rule.base_points;
        rounded[r] = raw[r] / 1000;
    }
    raw[0] = scores[ranking[0]] - rule.base_points;
    rounded[0] = -(rounded[1] + rounded[2] + rounded[3]);

    let rows: [SettlementRow; SEAT] = std::array::from_fn(|r| SettlementRow {
        seat: ranking[r],
        final_points: scores[ranking[r]],
        rank: r + 1,
        raw_diff: raw[r],
        rounded_diff: rounded[r],
        uma: rule.uma[r],
        settlement: rounded[r] + rule.uma[r],
    });

    let total: Point = rows.iter().map(|row| row.settlement).sum();
    if total != 0 {
        return Err(EngineError::InvariantViolation(format!(
            "settlement total is {} (expected 0)",
            total
        )));
    }
    Ok(rows)
}

#[cfg(test)]
fn ledger_with_scores(rule: &Rule, scores: [Point; SEAT]) -> GameLedger {
    let mut ledger = GameLedger::new(rule);
    for s in 0..SEAT {
        ledger.seats[s].points = scores[s];
    }
    ledger
}

#[test]
fn test_settlement_zero_sum() {
    let rule = Rule::default();
    let ledger = ledger_with_scores(&rule, [32000, 28000, 22000, 18000]);
    let rows = calc_settlement(&ledger, &rule).unwrap();

    assert_eq!(rows[0].seat, 0);
    assert_eq!(rows[0].settlement, 22 + 20);
    assert_eq!(rows[1].settlement, -2 + 10);
    assert_eq!(rows[2].settlement, -8 - 10);
    assert_eq!(rows[3].settlement, -12 - 20);
    assert_eq!(rows.iter().map(|r| r.settlement).sum::<Point>(), 0);
}

#[test]
fn test_settlement_tiebreak() {
    let rule = Rule::default();
    let ledger = ledger_with_scores(&rule, [25000, 30000, 30000, 15000]);
    let rows = calc_settlement(&ledger, &rule).unwrap();

    // 同点は座席番号の小さい方が上位
    assert_eq!(rows[0].seat, 1);
    assert_eq!(rows[1].seat, 2);
    assert_eq!(rows[2].seat, 0);
    assert_eq!(rows[3].seat, 3);
}

#[test]
fn test_settlement_negative_rounding() {
    let rule = Rule::default();
    // -100の差は0方向への切り捨てで0
    let ledger = ledger_with_scores(&rule, [40100, 29900, 22000, 8000]);
    let rows = calc_settlement(&ledger, &rule).unwrap();

    assert_eq!(rows[1].raw_diff, -100);
    assert_eq!(rows[1].rounded_diff, 0);
    assert_eq!(rows[2].rounded_diff, -8);
    assert_eq!(rows[3].rounded_diff, -22);
    assert_eq!(rows[0].rounded_diff, 30);
    assert_eq!(rows.iter().map(|r| r.settlement).sum::<Point>(), 0);
}

#[test]
fn test_settlement_idempotent() {
    let rule = Rule::default();
    let ledger = ledger_with_scores(&rule, [10000, 20000, 30000, 40000]);
    let first = calc_settlement(&ledger, &rule).unwrap();
    let second = calc_settlement(&ledger, &rule).unwrap();
    assert_eq!(first, second);
}
