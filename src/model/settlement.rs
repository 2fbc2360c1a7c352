use super::*;

// 最終精算の結果 1座席につき1行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRow {
    pub seat: Seat,
    pub final_points: Point, // 終了時の所持点
    pub rank: usize,         // 順位 (1~4, 同点は座席番号の小さい方が上位)
    pub raw_diff: Point,     // 基準点との差
    pub rounded_diff: Point, // 1000点単位に丸めた差 (1位は他3人の合計の符号反転)
    pub uma: Point,
    pub settlement: Point,   // rounded_diff + uma
}

impl fmt::Display for SettlementRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rank {}: seat {} {:6} ({:+})",
            self.rank, self.seat, self.final_points, self.settlement,
        )
    }
}
