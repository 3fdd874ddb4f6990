//! Classification bands behind each sentence of the report.
//!
//! Each cascade is an enum with an ordered constructor so the boundary of
//! every band (inclusive or exclusive) is visible in one place.

/// Position of the stock within its tier ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierBand {
    Top,
    Upper,
    Middle,
    Lower,
}

impl TierBand {
    pub fn from_tier(tier: f64) -> Self {
        match tier {
            t if t == 1.0 => TierBand::Top,
            t if t <= 2.0 => TierBand::Upper,
            t if t <= 3.0 => TierBand::Middle,
            _ => TierBand::Lower,
        }
    }

    pub fn phrase(&self) -> &'static str {
        match self {
            TierBand::Top => "최상위권(1티어)",
            TierBand::Upper => "상위권",
            TierBand::Middle => "중위권",
            TierBand::Lower => "하위권",
        }
    }
}

/// Price trend read from the momentum sub-score (exclusive lower bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendBand {
    StrongUptrend,
    Stable,
    Correction,
}

impl TrendBand {
    pub fn from_momentum(momentum: f64) -> Self {
        match momentum {
            m if m > 80.0 => TrendBand::StrongUptrend,
            m if m > 50.0 => TrendBand::Stable,
            _ => TrendBand::Correction,
        }
    }

    pub fn phrase(&self) -> &'static str {
        match self {
            TrendBand::StrongUptrend => "강한 상승세를 타고 있습니다",
            TrendBand::Stable => "안정적인 흐름을 유지하고 있습니다",
            TrendBand::Correction => "조정이 진행되고 있습니다",
        }
    }
}

/// Fundamental trait competing for the headline of the second sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundamentalTrait {
    Growth,
    Value,
    Stability,
}

impl FundamentalTrait {
    /// Tie-break order: earlier entries win equal scores
    pub const ORDER: [FundamentalTrait; 3] = [
        FundamentalTrait::Growth,
        FundamentalTrait::Value,
        FundamentalTrait::Stability,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FundamentalTrait::Growth => "성장성",
            FundamentalTrait::Value => "밸류에이션",
            FundamentalTrait::Stability => "재무안정성",
        }
    }

    /// Closing clause used when this trait scores in the excellent grade
    pub fn excellence_closing(&self) -> &'static str {
        match self {
            FundamentalTrait::Growth => " 미래 실적 기대감이 주가에 반영되고 있습니다.",
            FundamentalTrait::Value => " 현재 주가는 <strong>저평가 매력</strong>이 높은 구간입니다.",
            FundamentalTrait::Stability => " 불확실한 시장에서도 안정적인 방어력을 기대할 수 있습니다.",
        }
    }
}

/// Pick the highest scoring trait. A later trait must be strictly greater to
/// displace an earlier one, so ties resolve in [`FundamentalTrait::ORDER`].
pub fn best_trait(scores: [(FundamentalTrait, f64); 3]) -> (FundamentalTrait, f64) {
    let mut best = scores[0];
    for candidate in scores.into_iter().skip(1) {
        if candidate.1 > best.1 {
            best = candidate;
        }
    }
    best
}

/// Grade of the winning trait's score (inclusive lower bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitGrade {
    Excellent,
    Balanced,
    Weak,
}

impl TraitGrade {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => TraitGrade::Excellent,
            s if s >= 60.0 => TraitGrade::Balanced,
            _ => TraitGrade::Weak,
        }
    }
}

/// Analyst view derived from the consensus upside (exclusive lower bounds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsensusView {
    Bullish { upside: f64 },
    FairlyValued,
    Overvalued,
    Unavailable,
}

impl ConsensusView {
    pub fn from_upside(upside: Option<f64>) -> Self {
        match upside {
            Some(u) if u > 10.0 => ConsensusView::Bullish { upside: u },
            Some(u) if u > -5.0 => ConsensusView::FairlyValued,
            Some(_) => ConsensusView::Overvalued,
            None => ConsensusView::Unavailable,
        }
    }

    pub fn clause(&self) -> String {
        match self {
            ConsensusView::Bullish { upside } => format!(
                "월가 역시 <strong>긍정적</strong>입니다. 목표 주가는 현재보다 <strong>{:.1}% 높은 수준</strong>이며,",
                round_one_decimal(*upside)
            ),
            ConsensusView::FairlyValued => {
                "월가 컨센서스는 현재 주가를 <strong>적정 수준</strong>으로 평가하고 있으며,".to_string()
            }
            ConsensusView::Overvalued => {
                "월가는 현재 주가가 단기적으로 <strong>고평가</strong>되었다고 판단하고 있으나,".to_string()
            }
            ConsensusView::Unavailable => "시장 전문가들의 컨센서스 데이터는 부족하지만,".to_string(),
        }
    }
}

/// Round to one decimal with ties away from zero, so `75.25` prints as `75.3`.
///
/// `{:.1}` alone resolves exact binary ties to even (`75.2`), which disagrees
/// with the figures shown elsewhere on the site.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// RSI zone (exclusive bounds on both sides)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiZone {
    Oversold,
    Overbought,
    Neutral,
}

impl RsiZone {
    pub fn from_rsi(rsi: f64) -> Self {
        match rsi {
            r if r < 30.0 => RsiZone::Oversold,
            r if r > 70.0 => RsiZone::Overbought,
            _ => RsiZone::Neutral,
        }
    }

    /// Technical clause for this zone, with or without a MACD golden cross.
    /// Starts with a space so it can be appended to the consensus clause.
    pub fn clause(&self, rsi: f64, golden_cross: bool) -> String {
        let rsi = round_one_decimal(rsi);
        match (self, golden_cross) {
            (RsiZone::Oversold, true) => format!(
                " 기술적으로는 <strong>과매도(RSI {:.1})</strong> 상태이며, <strong>MACD 골든크로스</strong>까지 발생하여 <strong>강력한 반등</strong>이 기대됩니다.",
                rsi
            ),
            (RsiZone::Oversold, false) => format!(
                " 기술적으로는 <strong>과매도(RSI {:.1})</strong> 상태라 <strong>반등 가능성</strong>이 높습니다.",
                rsi
            ),
            (RsiZone::Overbought, true) => format!(
                " 기술적으로 <strong>과열(RSI {:.1})</strong> 신호가 있으나, <strong>MACD 골든크로스</strong>가 발생하여 <strong>추세가 지속</strong>될 가능성도 열려 있습니다.",
                rsi
            ),
            (RsiZone::Overbought, false) => format!(
                " 기술적으로 <strong>과열(RSI {:.1})</strong> 신호가 있어 단기적인 숨고르기가 필요할 수 있습니다.",
                rsi
            ),
            (RsiZone::Neutral, true) => {
                " 기술적 지표는 안정적이며, 특히 <strong>MACD 골든크로스</strong>가 발생하여 <strong>상승 모멘텀</strong>이 강화되고 있습니다.".to_string()
            }
            (RsiZone::Neutral, false) => " 기술적 지표들도 특이사항 없이 안정적입니다.".to_string(),
        }
    }
}

/// Closing recommendation from the final score (inclusive lower bounds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    ActivelyConsider,
    Accumulate,
    Cautious,
}

impl Verdict {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 75.0 => Verdict::ActivelyConsider,
            s if s >= 50.0 => Verdict::Accumulate,
            _ => Verdict::Cautious,
        }
    }

    pub fn sentence(&self) -> &'static str {
        match self {
            Verdict::ActivelyConsider => "종합적으로 <strong>투자를 적극 고려해볼 만한 시점</strong>입니다.",
            Verdict::Accumulate => {
                "종합적으로 <strong>지켜볼 만한 종목</strong>이나, 분할 매수로 접근하는 것이 좋습니다."
            }
            Verdict::Cautious => {
                "종합적으로 신규 진입보다는 <strong>관망하며 리스크를 관리</strong>하는 것이 좋습니다."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_bands() {
        assert_eq!(TierBand::from_tier(1.0), TierBand::Top);
        assert_eq!(TierBand::from_tier(2.0), TierBand::Upper);
        assert_eq!(TierBand::from_tier(1.5), TierBand::Upper);
        assert_eq!(TierBand::from_tier(2.5), TierBand::Middle);
        assert_eq!(TierBand::from_tier(3.0), TierBand::Middle);
        assert_eq!(TierBand::from_tier(4.0), TierBand::Lower);
        assert_eq!(TierBand::from_tier(7.0), TierBand::Lower);
        // Negative tiers never appear upstream but must not be labelled top tier
        assert_eq!(TierBand::from_tier(-1.0), TierBand::Upper);
    }

    #[test]
    fn test_trend_boundaries_are_exclusive() {
        assert_eq!(TrendBand::from_momentum(81.0), TrendBand::StrongUptrend);
        assert_eq!(TrendBand::from_momentum(80.0), TrendBand::Stable);
        assert_eq!(TrendBand::from_momentum(50.5), TrendBand::Stable);
        assert_eq!(TrendBand::from_momentum(50.0), TrendBand::Correction);
    }

    #[test]
    fn test_best_trait_first_listed_wins_ties() {
        let (winner, score) = best_trait([
            (FundamentalTrait::Growth, 70.0),
            (FundamentalTrait::Value, 70.0),
            (FundamentalTrait::Stability, 70.0),
        ]);
        assert_eq!(winner, FundamentalTrait::Growth);
        assert_eq!(score, 70.0);

        let (winner, _) = best_trait([
            (FundamentalTrait::Growth, 60.0),
            (FundamentalTrait::Value, 88.0),
            (FundamentalTrait::Stability, 88.0),
        ]);
        assert_eq!(winner, FundamentalTrait::Value);
    }

    #[test]
    fn test_trait_grade_boundaries_are_inclusive() {
        assert_eq!(TraitGrade::from_score(80.0), TraitGrade::Excellent);
        assert_eq!(TraitGrade::from_score(79.9), TraitGrade::Balanced);
        assert_eq!(TraitGrade::from_score(60.0), TraitGrade::Balanced);
        assert_eq!(TraitGrade::from_score(59.9), TraitGrade::Weak);
    }

    #[test]
    fn test_consensus_views() {
        assert!(matches!(
            ConsensusView::from_upside(Some(15.0)),
            ConsensusView::Bullish { .. }
        ));
        assert_eq!(ConsensusView::from_upside(Some(10.0)), ConsensusView::FairlyValued);
        assert_eq!(ConsensusView::from_upside(Some(-4.9)), ConsensusView::FairlyValued);
        assert_eq!(ConsensusView::from_upside(Some(-5.0)), ConsensusView::Overvalued);
        assert_eq!(ConsensusView::from_upside(None), ConsensusView::Unavailable);
    }

    #[test]
    fn test_bullish_clause_formats_one_decimal() {
        let clause = ConsensusView::Bullish { upside: 15.0 }.clause();
        assert!(clause.contains("15.0%"));
    }

    #[test]
    fn test_one_decimal_ties_round_up() {
        assert_eq!(round_one_decimal(75.25), 75.3);
        assert_eq!(round_one_decimal(28.25), 28.3);
        assert_eq!(round_one_decimal(64.24), 64.2);

        let clause = ConsensusView::Bullish { upside: 12.25 }.clause();
        assert!(clause.contains("<strong>12.3% 높은 수준</strong>"));
        assert!(RsiZone::Overbought.clause(75.25, false).contains("과열(RSI 75.3)"));
        assert!(RsiZone::Oversold.clause(28.25, false).contains("과매도(RSI 28.3)"));
    }

    #[test]
    fn test_rsi_zones() {
        assert_eq!(RsiZone::from_rsi(29.9), RsiZone::Oversold);
        assert_eq!(RsiZone::from_rsi(30.0), RsiZone::Neutral);
        assert_eq!(RsiZone::from_rsi(70.0), RsiZone::Neutral);
        assert_eq!(RsiZone::from_rsi(70.1), RsiZone::Overbought);
    }

    #[test]
    fn test_rsi_clause_variants() {
        assert_eq!(
            RsiZone::Oversold.clause(25.0, true),
            " 기술적으로는 <strong>과매도(RSI 25.0)</strong> 상태이며, <strong>MACD 골든크로스</strong>까지 발생하여 <strong>강력한 반등</strong>이 기대됩니다."
        );
        assert_eq!(
            RsiZone::Oversold.clause(25.0, false),
            " 기술적으로는 <strong>과매도(RSI 25.0)</strong> 상태라 <strong>반등 가능성</strong>이 높습니다."
        );
        assert_eq!(
            RsiZone::Overbought.clause(75.25, true),
            " 기술적으로 <strong>과열(RSI 75.3)</strong> 신호가 있으나, <strong>MACD 골든크로스</strong>가 발생하여 <strong>추세가 지속</strong>될 가능성도 열려 있습니다."
        );
        assert_eq!(
            RsiZone::Overbought.clause(75.25, false),
            " 기술적으로 <strong>과열(RSI 75.3)</strong> 신호가 있어 단기적인 숨고르기가 필요할 수 있습니다."
        );
        assert_eq!(
            RsiZone::Neutral.clause(50.0, true),
            " 기술적 지표는 안정적이며, 특히 <strong>MACD 골든크로스</strong>가 발생하여 <strong>상승 모멘텀</strong>이 강화되고 있습니다."
        );
        assert_eq!(
            RsiZone::Neutral.clause(50.0, false),
            " 기술적 지표들도 특이사항 없이 안정적입니다."
        );
    }

    #[test]
    fn test_verdict_boundaries() {
        assert_eq!(Verdict::from_score(75.0), Verdict::ActivelyConsider);
        assert_eq!(Verdict::from_score(74.9), Verdict::Accumulate);
        assert_eq!(Verdict::from_score(50.0), Verdict::Accumulate);
        assert_eq!(Verdict::from_score(49.9), Verdict::Cautious);
    }
}
