// 型エイリアス
pub type Seat = usize; // 座席 (0~3, ゲーム終了まで不変)
pub type Point = i32; // 得点
pub type GameId = u64; // ゲームインスタンスの識別子

// Number
pub const SEAT: usize = 4; // 座席の数

// 点棒関連の定数
pub const RIICHI_STAKE: Point = 1000; // リーチ宣言時の供託
pub const HONBA_RON: Point = 300; // 本場による加算 (ロン, 総額)
pub const HONBA_TSUMO: Point = 100; // 本場による加算 (ツモ, 1人あたり)
pub const NOTEN_POOL: Point = 3000; // 流局時のノーテン罰符の総額
