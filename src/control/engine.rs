use std::sync::Arc;

use serde::Serialize;

use super::settlement::calc_settlement;
use crate::listener::Listener;
use crate::model::*;
use crate::score::{calc_score, ScorePatternTable, ScoreResult, WinDeclaration};
use crate::EngineError;

// 宣言1回分の処理結果 ゲームが終了した場合は精算結果も含める
#[derive(Debug, Clone, Serialize)]
pub struct DeclarationResult {
    pub ledger: GameLedger,
    pub score: Option<ScoreResult>,
    pub ended: bool,
    pub end_reason: Option<EndReason>,
    pub settlement: Option<[SettlementRow; SEAT]>,
}

// 1ゲームを進行するエンジン
// 全ての宣言は検証→点数移動→整合性チェック→通知の順で処理される
#[derive(Debug)]
pub struct GameEngine {
    rule: Rule,
    table: Arc<ScorePatternTable>,
    ledger: GameLedger,
    listeners: Vec<Box<dyn Listener>>,
    end_reason: Option<EndReason>,
    settlement: Option<[SettlementRow; SEAT]>,
}

impl GameEngine {
    pub fn new(
        rule: Rule,
        table: Arc<ScorePatternTable>,
        listeners: Vec<Box<dyn Listener>>,
    ) -> Result<Self, EngineError> {
        rule.validate()?;
        let ledger = GameLedger::new(&rule);
        Ok(Self {
            rule,
            table,
            ledger,
            listeners,
            end_reason: None,
            settlement: None,
        })
    }

    #[inline]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn snapshot(&self) -> GameLedger {
        self.ledger.clone()
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.ledger.status != GameStatus::Waiting {
            return Err(EngineError::GameNotPlayable(self.ledger.status));
        }
        self.ledger.status = GameStatus::Playing;
        self.notify(&Event::begin(self.ledger.scores()));
        Ok(())
    }

    // 和了宣言 点数移動と親の移動(連荘含む)までを行う
    pub fn declare_win(&mut self, decl: &WinDeclaration) -> Result<DeclarationResult, EngineError> {
        self.check_playing()?;
        let score = calc_score(
            &self.table,
            decl,
            self.ledger.dealer,
            self.ledger.honba_sticks,
            self.ledger.riichi_sticks,
        )?;

        let mut deltas = [0; SEAT];
        for s in 0..SEAT {
            deltas[s] = -score.payments[s];
        }
        deltas[decl.winner] = score.total;

        let scores_before = self.ledger.scores();
        self.ledger.apply_deltas(&deltas);
        self.ledger.clear_riichi();
        self.ledger.riichi_sticks = 0; // 供託は和了者が総取り
        self.verify_integrity()?;

        self.notify(&Event::win(
            decl.winner,
            decl.loser,
            decl.han,
            decl.fu,
            decl.is_drawn,
            score.total,
            score.honba_payment,
            score.stick_payment,
            scores_before,
            deltas,
        ));

        let renchan = self.ledger.is_dealer(decl.winner);
        let ended = self.rotate_and_check(renchan)?;
        Ok(self.declaration_result(Some(score), ended))
    }

    // 流局宣言 聴牌者のノーテン罰符の受け渡しを行う
    // 供託中のリーチ棒は次局に持ち越す
    pub fn declare_draw(&mut self, tenpai_seats: &[Seat]) -> Result<DeclarationResult, EngineError> {
        self.check_playing()?;
        let mut tenpais = [false; SEAT];
        for &seat in tenpai_seats {
            if seat >= SEAT {
                return Err(EngineError::Validation(format!("invalid seat: {}", seat)));
            }
            if tenpais[seat] {
                return Err(EngineError::Validation(format!("duplicated seat: {}", seat)));
            }
            tenpais[seat] = true;
        }

        let n = tenpai_seats.len();
        let mut deltas = [0; SEAT];
        if n != 0 && n != SEAT {
            let receive = NOTEN_POOL / n as Point;
            let pay = NOTEN_POOL / (SEAT - n) as Point;
            for s in 0..SEAT {
                deltas[s] = if tenpais[s] { receive } else { -pay };
            }
        }

        let scores_before = self.ledger.scores();
        let renchan = tenpais[self.ledger.dealer];
        self.ledger.apply_deltas(&deltas);
        self.ledger.clear_riichi();
        self.verify_integrity()?;

        self.notify(&Event::draw(tenpais, scores_before, deltas));

        let ended = self.rotate_and_check(renchan)?;
        Ok(self.declaration_result(None, ended))
    }

    // リーチ宣言 1000点を供託に移す
    pub fn declare_riichi(&mut self, seat: Seat) -> Result<DeclarationResult, EngineError> {
        self.check_playing()?;
        if seat >= SEAT {
            return Err(EngineError::Validation(format!("invalid seat: {}", seat)));
        }
        if self.ledger.seats[seat].is_riichi {
            return Err(EngineError::Validation(format!(
                "seat {} has already declared riichi",
                seat
            )));
        }
        if self.ledger.seats[seat].points < RIICHI_STAKE {
            return Err(EngineError::Validation(format!(
                "seat {} has insufficient points for riichi: {}",
                seat, self.ledger.seats[seat].points
            )));
        }

        self.ledger.seats[seat].points -= RIICHI_STAKE;
        self.ledger.seats[seat].is_riichi = true;
        self.ledger.seats[seat].riichi_round = Some(self.ledger.round);
        self.ledger.riichi_sticks += 1;
        self.verify_integrity()?;

        self.notify(&Event::riichi(
            seat,
            self.ledger.scores(),
            self.ledger.riichi_sticks,
        ));
        Ok(self.declaration_result(None, false))
    }

    // 局の途中でも指定の理由で精算してゲームを打ち切る
    pub fn force_end(&mut self, reason: EndReason) -> Result<DeclarationResult, EngineError> {
        self.check_playing()?;
        self.finish(reason)?;
        Ok(self.declaration_result(None, true))
    }

    fn check_playing(&self) -> Result<(), EngineError> {
        if self.ledger.status != GameStatus::Playing {
            return Err(EngineError::GameNotPlayable(self.ledger.status));
        }
        Ok(())
    }

    // 連荘なら本場を積み, そうでなければ親を下家に移して次局へ
    // その後に飛び・規定局数の終了判定を行う
    fn rotate_and_check(&mut self, renchan: bool) -> Result<bool, EngineError> {
        if renchan {
            self.ledger.honba_sticks += 1;
        } else {
            self.ledger.dealer = (self.ledger.dealer + 1) % SEAT;
            self.ledger.round += 1;
            self.ledger.honba_sticks = 0;
        }

        if let Some(reason) = self.check_game_end() {
            self.finish(reason)?;
            return Ok(true);
        }
        Ok(false)
    }

    // 飛びは規定局数より優先
    fn check_game_end(&self) -> Option<EndReason> {
        if self.ledger.seats.iter().any(|st| st.points <= 0) {
            return Some(EndReason::Bust);
        }
        if self.ledger.round > self.rule.format.last_round() {
            return Some(EndReason::RoundLimit);
        }
        None
    }

    fn finish(&mut self, reason: EndReason) -> Result<(), EngineError> {
        let settlement = calc_settlement(&self.ledger, &self.rule)?;
        self.ledger.status = GameStatus::Finished;
        self.end_reason = Some(reason);
        self.settlement = Some(settlement);
        self.notify(&Event::end(reason, settlement));
        Ok(())
    }

    fn verify_integrity(&self) -> Result<(), EngineError> {
        if let Err(e) = self.ledger.check_integrity() {
            crate::error!("{}", e);
            return Err(e);
        }
        Ok(())
    }

    fn notify(&mut self, event: &Event) {
        for listener in &mut self.listeners {
            listener.notify_event(&self.ledger, event);
        }
    }

    fn declaration_result(&self, score: Option<ScoreResult>, ended: bool) -> DeclarationResult {
        DeclarationResult {
            ledger: self.ledger.clone(),
            score,
            ended,
            end_reason: self.end_reason,
            settlement: self.settlement,
        }
    }
}

#[cfg(test)]
fn new_engine(rule: Rule) -> GameEngine {
    let mut engine = GameEngine::new(rule, Arc::new(ScorePatternTable::new()), vec![]).unwrap();
    engine.start().unwrap();
    engine
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
fn test_dealer_win_renchan() {
    let mut engine = new_engine(Rule::default());
    let result = engine.declare_win(&tsumo(0, 3, 30)).unwrap();

    // 親の和了は連荘 親と局は変わらず本場を積む
    assert_eq!(result.ledger.dealer, 0);
    assert_eq!(result.ledger.round, 1);
    assert_eq!(result.ledger.honba_sticks, 1);
    assert_eq!(result.ledger.scores(), [37000, 21000, 21000, 21000]);
    assert!(!result.ended);
}

#[test]
fn test_non_dealer_win_rotation() {
    let mut engine = new_engine(Rule::default());
    let result = engine.declare_win(&ron(2, 3, 3, 30)).unwrap();

    assert_eq!(result.ledger.dealer, 1);
    assert_eq!(result.ledger.round, 2);
    assert_eq!(result.ledger.honba_sticks, 0);
    assert_eq!(result.ledger.scores(), [25000, 25000, 33000, 17000]);
}

#[test]
fn test_honba_carries_into_next_win() {
    let mut engine = new_engine(Rule::default());
    engine.declare_win(&tsumo(0, 1, 40)).unwrap(); // 連荘で1本場

    // 1本場のロンは300点加算
    let result = engine.declare_win(&ron(1, 2, 3, 30)).unwrap();
    let score = result.score.unwrap();
    assert_eq!(score.payments[2], 8300);
    assert_eq!(score.honba_payment, 300);
}

#[test]
fn test_riichi_stake_and_payout() {
    let mut engine = new_engine(Rule::default());
    let result = engine.declare_riichi(1).unwrap();
    assert_eq!(result.ledger.seats[1].points, 24000);
    assert_eq!(result.ledger.riichi_sticks, 1);
    assert_eq!(result.ledger.seats[1].riichi_round, Some(1));

    // 供託は和了者が総取りし, リーチ状態はリセットされる
    let result = engine.declare_win(&ron(2, 3, 3, 30)).unwrap();
    let score = result.score.unwrap();
    assert_eq!(score.stick_payment, 1000);
    assert_eq!(score.total, 9000);
    assert_eq!(result.ledger.riichi_sticks, 0);
    assert!(!result.ledger.seats[1].is_riichi);
    result.ledger.check_integrity().unwrap();
}

#[test]
fn test_riichi_validation() {
    let mut engine = new_engine(Rule::default());
    assert!(engine.declare_riichi(4).is_err());

    engine.declare_riichi(0).unwrap();
    assert!(engine.declare_riichi(0).is_err()); // 二重リーチ宣言

    engine.ledger.seats[1].points = 500;
    engine.ledger.seats[2].points += 24500; // 整合性を保つための移動
    assert!(engine.declare_riichi(1).is_err()); // 点数不足
}

#[test]
fn test_draw_splits() {
    // 聴牌1人: 3000点を総取り
    let mut engine = new_engine(Rule::default());
    let result = engine.declare_draw(&[0]).unwrap();
    assert_eq!(result.ledger.scores(), [28000, 24000, 24000, 24000]);

    // 聴牌2人: 1500点ずつ
    let mut engine = new_engine(Rule::default());
    let result = engine.declare_draw(&[1, 3]).unwrap();
    assert_eq!(result.ledger.scores(), [23500, 26500, 23500, 26500]);

    // 聴牌3人: ノーテンの1人が3000点払い
    let mut engine = new_engine(Rule::default());
    let result = engine.declare_draw(&[0, 1, 2]).unwrap();
    assert_eq!(result.ledger.scores(), [26000, 26000, 26000, 22000]);

    // 全員聴牌・全員ノーテンは移動なし
    let mut engine = new_engine(Rule::default());
    let result = engine.declare_draw(&[0, 1, 2, 3]).unwrap();
    assert_eq!(result.ledger.scores(), [25000; SEAT]);
    let result = engine.declare_draw(&[]).unwrap();
    assert_eq!(result.ledger.scores(), [25000; SEAT]);
}

#[test]
fn test_draw_dealer_tenpai_renchan() {
    let mut engine = new_engine(Rule::default());
    let result = engine.declare_draw(&[0, 2]).unwrap();
    assert_eq!(result.ledger.dealer, 0);
    assert_eq!(result.ledger.round, 1);
    assert_eq!(result.ledger.honba_sticks, 1);

    // 親がノーテンなら親流れ
    let result = engine.declare_draw(&[2]).unwrap();
    assert_eq!(result.ledger.dealer, 1);
    assert_eq!(result.ledger.round, 2);
    assert_eq!(result.ledger.honba_sticks, 0);
}

#[test]
fn test_riichi_sticks_carry_over_draw() {
    let mut engine = new_engine(Rule::default());
    engine.declare_riichi(3).unwrap();
    let result = engine.declare_draw(&[1]).unwrap();

    // 流局では供託は持ち越し
    assert_eq!(result.ledger.riichi_sticks, 1);
    assert!(!result.ledger.seats[3].is_riichi);
    result.ledger.check_integrity().unwrap();

    // 次の和了者が持ち越した供託を獲得
    let result = engine.declare_win(&ron(2, 0, 2, 40)).unwrap();
    assert_eq!(result.score.unwrap().stick_payment, 1000);
    assert_eq!(result.ledger.riichi_sticks, 0);
}

#[test]
fn test_draw_validation() {
    let mut engine = new_engine(Rule::default());
    assert!(engine.declare_draw(&[4]).is_err());
    assert!(engine.declare_draw(&[1, 1]).is_err());
}

#[test]
fn test_round_limit_end() {
    let rule = Rule {
        format: GameFormat::Tonpuu,
        ..Rule::default()
    };
    let mut engine = new_engine(rule);

    // 子の和了を4回繰り返して規定局数を消化
    for i in 0..3 {
        let winner = (i + 1) % SEAT;
        let loser = (i + 2) % SEAT;
        let result = engine.declare_win(&ron(winner, loser, 1, 30)).unwrap();
        assert!(!result.ended);
    }
    let result = engine.declare_win(&ron(0, 1, 1, 30)).unwrap();

    assert!(result.ended);
    assert_eq!(result.end_reason, Some(EndReason::RoundLimit));
    assert_eq!(result.ledger.status, GameStatus::Finished);
    let settlement = result.settlement.unwrap();
    assert_eq!(settlement.iter().map(|r| r.settlement).sum::<Point>(), 0);
}

#[test]
fn test_bust_end_priority() {
    let mut engine = new_engine(Rule::default());
    engine.ledger.round = 8; // 最終局
    engine.ledger.seats[2].points = 1000;
    engine.ledger.seats[0].points += 24000;

    // 飛びと規定局数が同時に成立する場合は飛びを報告
    let result = engine.declare_win(&ron(1, 2, 3, 30)).unwrap();
    assert!(result.ended);
    assert_eq!(result.end_reason, Some(EndReason::Bust));
    assert_eq!(result.ledger.seats[2].points, -7000);
}

#[test]
fn test_not_playable() {
    let rule = Rule::default();
    let table = Arc::new(ScorePatternTable::new());
    let mut engine = GameEngine::new(rule, table, vec![]).unwrap();

    // 開始前の宣言は受理しない
    assert!(engine.declare_win(&tsumo(0, 3, 30)).is_err());
    assert!(engine.declare_riichi(0).is_err());

    engine.start().unwrap();
    assert!(engine.start().is_err()); // 二重開始

    let result = engine.force_end(EndReason::Forced).unwrap();
    assert_eq!(result.end_reason, Some(EndReason::Forced));
    assert!(engine.declare_win(&tsumo(0, 3, 30)).is_err());
    assert!(engine.force_end(EndReason::Forced).is_err());
}

#[test]
fn test_force_end_uses_supplied_reason() {
    let mut engine = new_engine(Rule::default());
    engine.declare_win(&ron(1, 2, 3, 30)).unwrap();

    // 呼び出し側が渡した終了理由がそのまま精算結果に反映される
    let result = engine.force_end(EndReason::RoundLimit).unwrap();
    assert!(result.ended);
    assert_eq!(result.end_reason, Some(EndReason::RoundLimit));
    assert_eq!(result.ledger.status, GameStatus::Finished);
    let settlement = result.settlement.unwrap();
    assert_eq!(settlement[0].seat, 1);
    assert_eq!(settlement.iter().map(|r| r.settlement).sum::<Point>(), 0);
}

#[test]
fn test_integrity_through_sequence() {
    let mut engine = new_engine(Rule::default());
    engine.declare_riichi(0).unwrap();
    engine.declare_riichi(1).unwrap();
    engine.declare_draw(&[0]).unwrap();
    engine.declare_riichi(2).unwrap();
    let result = engine.declare_win(&tsumo(3, 5, 0)).unwrap();

    result.ledger.check_integrity().unwrap();
    assert_eq!(result.ledger.riichi_sticks, 0);
    assert_eq!(result.ledger.scores().iter().sum::<Point>(), 100000);
}

#[test]
fn test_snapshot_reflects_state() {
    let mut engine = new_engine(Rule::default());
    engine.declare_win(&ron(1, 2, 3, 30)).unwrap();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot, engine.snapshot());
    assert_eq!(snapshot.scores(), [25000, 33000, 17000, 25000]);
}
