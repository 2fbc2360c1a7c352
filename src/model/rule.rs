use super::*;
use crate::util::misc::Res;
use crate::EngineError;

// 対戦形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameFormat {
    Tonpuu,  // 東風戦
    Hanchan, // 半荘戦
}

impl GameFormat {
    // プレイ可能な最終局 (この局を超えたらゲーム終了)
    #[inline]
    pub fn last_round(&self) -> usize {
        match self {
            Self::Tonpuu => 4,
            Self::Hanchan => 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub format: GameFormat,
    pub initial_points: Point, // 配給原点 (通常25000)
    pub base_points: Point,    // 精算の基準点 (通常30000)
    pub uma: [Point; SEAT],    // 順位ウマ (1000点単位, 合計0であること)
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            format: GameFormat::Hanchan,
            initial_points: 25000,
            base_points: 30000,
            uma: [20, 10, -10, -20],
        }
    }
}

impl Rule {
    // 設定の検証は読み込み時に1度だけ行う (精算のたびには行わない)
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.initial_points <= 0 {
            return Err(EngineError::Validation(format!(
                "initial_points must be positive: {}",
                self.initial_points
            )));
        }
        if self.base_points <= 0 {
            return Err(EngineError::Validation(format!(
                "base_points must be positive: {}",
                self.base_points
            )));
        }
        let uma_sum: Point = self.uma.iter().sum();
        if uma_sum != 0 {
            return Err(EngineError::Validation(format!(
                "uma must sum to zero: {:?}",
                self.uma
            )));
        }
        Ok(())
    }

    pub fn from_json(data: &str) -> Res<Rule> {
        let rule: Rule = serde_json::from_str(data)?;
        rule.validate()?;
        Ok(rule)
    }
}

#[test]
fn test_rule_validate() {
    assert!(Rule::default().validate().is_ok());

    let mut rule = Rule::default();
    rule.uma = [20, 10, -10, -10];
    assert!(rule.validate().is_err());

    rule = Rule::default();
    rule.initial_points = 0;
    assert!(rule.validate().is_err());
}

#[test]
fn test_rule_from_json() {
    let rule = Rule::from_json(
        r#"{"format":"Tonpuu","initial_points":25000,"base_points":30000,"uma":[15,5,-5,-15]}"#,
    )
    .unwrap();
    assert_eq!(rule.format, GameFormat::Tonpuu);
    assert_eq!(rule.uma, [15, 5, -5, -15]);

    // ウマの合計が0でない設定は読み込み時に弾く
    assert!(Rule::from_json(
        r#"{"format":"Hanchan","initial_points":25000,"base_points":30000,"uma":[20,10,-10,0]}"#,
    )
    .is_err());
}
