use super::*;

// エンジンが通知層(Listener)へ引き渡すイベント
// 描画や配信に必要な情報はすべてイベント自身に含める
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Begin(EventBegin),   // ゲーム開始
    Riichi(EventRiichi), // リーチ宣言
    Win(EventWin),       // 局終了 (和了)
    Draw(EventDraw),     // 局終了 (流局)
    End(EventEnd),       // ゲーム終了 (精算)
}

impl Event {
    #[inline]
    pub fn begin(scores: [Point; SEAT]) -> Self {
        Self::Begin(EventBegin { scores })
    }

    #[inline]
    pub fn riichi(seat: Seat, scores: [Point; SEAT], riichi_sticks: usize) -> Self {
        Self::Riichi(EventRiichi {
            seat,
            scores,
            riichi_sticks,
        })
    }

    #[inline]
    pub fn win(
        winner: Seat,
        loser: Option<Seat>,
        han: usize,
        fu: usize,
        is_drawn: bool,
        total: Point,
        honba_payment: Point,
        stick_payment: Point,
        scores: [Point; SEAT],
        delta_scores: [Point; SEAT],
    ) -> Self {
        Self::Win(EventWin {
            winner,
            loser,
            han,
            fu,
            is_drawn,
            total,
            honba_payment,
            stick_payment,
            scores,
            delta_scores,
        })
    }

    #[inline]
    pub fn draw(
        tenpais: [bool; SEAT],
        scores: [Point; SEAT],
        delta_scores: [Point; SEAT],
    ) -> Self {
        Self::Draw(EventDraw {
            tenpais,
            scores,
            delta_scores,
        })
    }

    #[inline]
    pub fn end(reason: EndReason, settlement: [SettlementRow; SEAT]) -> Self {
        Self::End(EventEnd { reason, settlement })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventBegin {
    pub scores: [Point; SEAT], // 配給原点
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventRiichi {
    pub seat: Seat,
    pub scores: [Point; SEAT],    // 供託支払い後のスコア
    pub riichi_sticks: usize,     // 更新後の供託本数
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventWin {
    pub winner: Seat,
    pub loser: Option<Seat>,         // ロンの場合のみ放銃者
    pub han: usize,
    pub fu: usize,
    pub is_drawn: bool,              // ツモ和了
    pub total: Point,                // 和了者の獲得点 (供託込み)
    pub honba_payment: Point,        // 本場による加算の総額
    pub stick_payment: Point,        // 供託リーチ棒による加算
    pub scores: [Point; SEAT],       // 変化前のスコア
    pub delta_scores: [Point; SEAT], // scores + delta_scores = new_scores
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventDraw {
    pub tenpais: [bool; SEAT],       // 聴牌していた座席
    pub scores: [Point; SEAT],       // 変化前のスコア
    pub delta_scores: [Point; SEAT], // 聴牌人数による点数変動
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventEnd {
    pub reason: EndReason,
    pub settlement: [SettlementRow; SEAT], // 順位順
}

// [EndReason]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Bust,       // 飛び (持ち点0以下)
    RoundLimit, // 規定局数の終了
    Forced,     // 外部からの強制終了
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EndReason::Bust => "飛び",
                EndReason::RoundLimit => "規定局数終了",
                EndReason::Forced => "強制終了",
            }
        )
    }
}
