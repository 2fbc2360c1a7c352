use super::*;
use crate::EngineError;

// ゲームの進行状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Waiting,  // 開始前
    Playing,  // 進行中
    Finished, // 終了 (精算済み)
}

// 座席ごとの状態 ゲーム中に破棄されることはない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatState {
    pub seat: Seat,
    pub points: Point,               // 所持点
    pub is_riichi: bool,             // リーチ宣言済みフラグ (局終了でリセット)
    pub riichi_round: Option<usize>, // リーチを宣言した局
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLedger {
    pub round: usize,          // 局 (1始まり)
    pub dealer: Seat,          // 親の座席
    pub honba_sticks: usize,   // 本場
    pub riichi_sticks: usize,  // リーチ棒の供託
    pub status: GameStatus,
    pub seats: [SeatState; SEAT],
    pub initial_points: Point, // 整合性チェック用の配給原点
}

impl GameLedger {
    pub fn new(rule: &Rule) -> Self {
        Self {
            round: 1,
            dealer: 0,
            honba_sticks: 0,
            riichi_sticks: 0,
            status: GameStatus::Waiting,
            seats: std::array::from_fn(|s| SeatState {
                seat: s,
                points: rule.initial_points,
                is_riichi: false,
                riichi_round: None,
            }),
            initial_points: rule.initial_points,
        }
    }

    #[inline]
    pub fn is_dealer(&self, seat: Seat) -> bool {
        seat == self.dealer
    }

    pub fn scores(&self) -> [Point; SEAT] {
        let mut scores = [0; SEAT];
        for s in 0..SEAT {
            scores[s] = self.seats[s].points;
        }
        scores
    }

    pub fn apply_deltas(&mut self, deltas: &[Point; SEAT]) {
        for s in 0..SEAT {
            self.seats[s].points += deltas[s];
        }
    }

    pub fn clear_riichi(&mut self) {
        for st in &mut self.seats {
            st.is_riichi = false;
            st.riichi_round = None;
        }
    }

    // 供託中のリーチ棒を含めた点数の総和が常に配給原点の4倍であることを確認
    pub fn check_integrity(&self) -> Result<(), EngineError> {
        let seat_sum: Point = self.seats.iter().map(|st| st.points).sum();
        let total = seat_sum + self.riichi_sticks as Point * RIICHI_STAKE;
        let expected = self.initial_points * SEAT as Point;
        if total != expected {
            return Err(EngineError::InvariantViolation(format!(
                "ledger total is {} (expected {})",
                total, expected
            )));
        }
        Ok(())
    }
}

impl fmt::Display for GameLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "round: {}, dealer: {}, honba_sticks: {}, riichi_sticks: {}, status: {:?}",
            self.round, self.dealer, self.honba_sticks, self.riichi_sticks, self.status,
        )?;
        for st in &self.seats {
            writeln!(
                f,
                "seat {}: {:6}{}",
                st.seat,
                st.points,
                if st.is_riichi { " riichi" } else { "" },
            )?;
        }
        Ok(())
    }
}

#[test]
fn test_ledger_integrity() {
    let rule = Rule::default();
    let mut ledger = GameLedger::new(&rule);
    assert!(ledger.check_integrity().is_ok());

    // リーチ棒は供託に移動するだけなので総和は変化しない
    ledger.seats[2].points -= RIICHI_STAKE;
    ledger.riichi_sticks += 1;
    assert!(ledger.check_integrity().is_ok());

    ledger.seats[0].points += 100;
    assert!(ledger.check_integrity().is_err());
}
