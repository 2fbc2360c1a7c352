use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::engine::{DeclarationResult, GameEngine};
use crate::listener::Listener;
use crate::model::*;
use crate::score::{ScorePatternTable, WinDeclaration};
use crate::EngineError;

// 複数ゲームの同時進行を管理するリポジトリ
// 点数表は全ゲームで共有し, ゲームごとにMutexで直列化する
pub struct GameRepository {
    table: Arc<ScorePatternTable>,
    inner: Mutex<RepoInner>,
}

struct RepoInner {
    next_id: GameId,
    games: HashMap<GameId, Arc<Mutex<GameEngine>>>,
}

impl GameRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(ScorePatternTable::new()),
            inner: Mutex::new(RepoInner {
                next_id: 0,
                games: HashMap::new(),
            }),
        }
    }

    pub fn create_game(
        &self,
        rule: Rule,
        listeners: Vec<Box<dyn Listener>>,
    ) -> Result<GameId, EngineError> {
        let mut engine = GameEngine::new(rule, self.table.clone(), listeners)?;
        engine.start()?;

        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.games.insert(id, Arc::new(Mutex::new(engine)));
        Ok(id)
    }

    // 全体のロックはゲームの取得までに限定する
    fn with_game<T>(
        &self,
        id: GameId,
        f: impl FnOnce(&mut GameEngine) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let game = {
            let inner = self.inner.lock().unwrap();
            inner
                .games
                .get(&id)
                .cloned()
                .ok_or(EngineError::GameNotFound(id))?
        };
        let mut engine = game.lock().unwrap();
        f(&mut engine)
    }

    pub fn declare_win(
        &self,
        id: GameId,
        decl: &WinDeclaration,
    ) -> Result<DeclarationResult, EngineError> {
        self.with_game(id, |engine| engine.declare_win(decl))
    }

    pub fn declare_draw(
        &self,
        id: GameId,
        tenpai_seats: &[Seat],
    ) -> Result<DeclarationResult, EngineError> {
        self.with_game(id, |engine| engine.declare_draw(tenpai_seats))
    }

    pub fn declare_riichi(&self, id: GameId, seat: Seat) -> Result<DeclarationResult, EngineError> {
        self.with_game(id, |engine| engine.declare_riichi(seat))
    }

    pub fn force_end(
        &self,
        id: GameId,
        reason: EndReason,
    ) -> Result<DeclarationResult, EngineError> {
        self.with_game(id, |engine| engine.force_end(reason))
    }

    pub fn snapshot(&self, id: GameId) -> Result<GameLedger, EngineError> {
        self.with_game(id, |engine| Ok(engine.snapshot()))
    }
}

impl Default for GameRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_repository_games_are_isolated() {
    let repo = GameRepository::new();
    let id0 = repo.create_game(Rule::default(), vec![]).unwrap();
    let id1 = repo.create_game(Rule::default(), vec![]).unwrap();
    assert_ne!(id0, id1);

    repo.declare_riichi(id0, 2).unwrap();
    assert_eq!(repo.snapshot(id0).unwrap().riichi_sticks, 1);
    assert_eq!(repo.snapshot(id1).unwrap().riichi_sticks, 0);
}

#[test]
fn test_repository_game_not_found() {
    let repo = GameRepository::new();
    assert!(matches!(
        repo.snapshot(99),
        Err(EngineError::GameNotFound(99))
    ));
    assert!(repo.declare_riichi(99, 0).is_err());
}

#[test]
fn test_repository_full_game() {
    let repo = GameRepository::new();
    let rule = Rule {
        format: GameFormat::Tonpuu,
        ..Rule::default()
    };
    let id = repo.create_game(rule, vec![]).unwrap();

    let result = repo.force_end(id, EndReason::Forced).unwrap();
    assert!(result.ended);
    assert_eq!(result.end_reason, Some(EndReason::Forced));
    assert_eq!(result.ledger.status, GameStatus::Finished);

    // 終了後の宣言はエラー
    assert!(repo.declare_draw(id, &[0]).is_err());
}

#[test]
fn test_repository_concurrent_declarations() {
    let repo = Arc::new(GameRepository::new());
    let id = repo.create_game(Rule::default(), vec![]).unwrap();

    // 同一ゲームへの同時宣言は1件ずつ直列に適用される
    let handles: Vec<_> = (0..SEAT)
        .map(|seat| {
            let repo = repo.clone();
            std::thread::spawn(move || repo.declare_riichi(id, seat).is_ok())
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&ok| ok)
        .count();

    assert_eq!(successes, SEAT);
    let ledger = repo.snapshot(id).unwrap();
    assert_eq!(ledger.riichi_sticks, successes);
    for st in &ledger.seats {
        assert!(st.is_riichi);
        assert_eq!(st.points, 24000);
    }
    ledger.check_integrity().unwrap();
}
