//! AI report composer.
//!
//! Turns a [`StockMetrics`] record into the four-sentence Korean paragraph shown
//! on the stock detail page. The output carries inline `<strong>` markup and is
//! inserted into the page as-is.

use crate::bands::{
    best_trait, ConsensusView, FundamentalTrait, RsiZone, TierBand, TraitGrade, TrendBand, Verdict,
};
use crate::types::StockMetrics;

/// Returned verbatim when the record has no usable final score
pub const INSUFFICIENT_DATA_MESSAGE: &str = "데이터가 부족하여 AI 분석을 생성할 수 없습니다.";

/// Compose the AI report paragraph for one stock.
pub fn compose_report(stock: &StockMetrics) -> String {
    let Some(score) = stock.final_score() else {
        return INSUFFICIENT_DATA_MESSAGE.to_string();
    };

    [
        intro_sentence(stock),
        fundamentals_sentence(stock),
        market_pulse_sentence(stock),
        Verdict::from_score(score).sentence().to_string(),
    ]
    .join(" ")
}

fn intro_sentence(stock: &StockMetrics) -> String {
    let tier = TierBand::from_tier(stock.tier());
    let trend = TrendBand::from_momentum(stock.momentum_score());

    format!(
        "<strong>{}({})</strong>의 AI 분석 결과, 현재 <strong>{} 섹터 내 {}</strong>에 위치하며 {}.",
        stock.display_name(),
        stock.ticker(),
        stock.sector(),
        tier.phrase(),
        trend.phrase()
    )
}

fn fundamentals_sentence(stock: &StockMetrics) -> String {
    let (best, score) = best_trait([
        (FundamentalTrait::Growth, stock.growth_score()),
        (FundamentalTrait::Value, stock.value_score()),
        (FundamentalTrait::Stability, stock.stability_score()),
    ]);

    match TraitGrade::from_score(score) {
        TraitGrade::Excellent => format!(
            "특히 <strong>{}({}점)</strong> 부문에서 <strong>매우 우수한 평가</strong>를 받아,{}",
            best.label(),
            score,
            best.excellence_closing()
        ),
        TraitGrade::Balanced => format!(
            "펀더멘털 측면에서는 <strong>{}</strong> 지표가 양호하며 전반적으로 균형 잡힌 모습을 보입니다.",
            best.label()
        ),
        TraitGrade::Weak => {
            "다만 전반적인 펀더멘털 모멘텀은 다소 약한 구간을 지나고 있습니다.".to_string()
        }
    }
}

fn market_pulse_sentence(stock: &StockMetrics) -> String {
    let consensus = ConsensusView::from_upside(stock.upside_percent());
    let rsi = stock.rsi();
    let technical = RsiZone::from_rsi(rsi).clause(rsi, stock.has_macd_golden_cross());

    consensus.clause() + &technical
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Consensus, RsiReading, StatsBar, TargetPrice, TechnicalAnalysis, MACD_GOLDEN_CROSS,
    };

    fn create_test_stock() -> StockMetrics {
        StockMetrics {
            name: Some("애플".to_string()),
            ticker: Some("AAPL".to_string()),
            tier: Some(2.0),
            sector: Some("Technology".to_string()),
            stats_bar: Some(StatsBar {
                fundamentals: Some(70.0),
                value: Some(55.0),
                stability: Some(65.0),
                momentum: Some(60.0),
            }),
            final_score: Some(68.0),
            ..Default::default()
        }
    }

    fn with_prices(mut stock: StockMetrics, current: f64, mean: f64) -> StockMetrics {
        stock.current_price = Some(current);
        stock.consensus = Some(Consensus {
            target_price: Some(TargetPrice { mean: Some(mean) }),
        });
        stock
    }

    fn with_rsi(mut stock: StockMetrics, rsi: f64) -> StockMetrics {
        stock.technical_analysis = Some(TechnicalAnalysis {
            rsi: Some(RsiReading { value: Some(rsi) }),
        });
        stock
    }

    #[test]
    fn test_missing_final_score_returns_fallback() {
        let mut stock = create_test_stock();
        stock.final_score = None;
        assert_eq!(compose_report(&stock), INSUFFICIENT_DATA_MESSAGE);

        stock.final_score = Some(0.0);
        assert_eq!(compose_report(&stock), INSUFFICIENT_DATA_MESSAGE);

        assert_eq!(compose_report(&StockMetrics::default()), INSUFFICIENT_DATA_MESSAGE);
    }

    #[test]
    fn test_full_report_shape() {
        let report = compose_report(&create_test_stock());

        let expected = [
            "<strong>애플(AAPL)</strong>의 AI 분석 결과, 현재 <strong>Technology 섹터 내 상위권</strong>에 위치하며 안정적인 흐름을 유지하고 있습니다.",
            "펀더멘털 측면에서는 <strong>성장성</strong> 지표가 양호하며 전반적으로 균형 잡힌 모습을 보입니다.",
            "시장 전문가들의 컨센서스 데이터는 부족하지만, 기술적 지표들도 특이사항 없이 안정적입니다.",
            "종합적으로 <strong>지켜볼 만한 종목</strong>이나, 분할 매수로 접근하는 것이 좋습니다.",
        ]
        .join(" ");
        assert_eq!(report, expected);
    }

    #[test]
    fn test_name_and_sector_fallbacks() {
        let stock = StockMetrics {
            ticker: Some("ZZZ".to_string()),
            final_score: Some(40.0),
            ..Default::default()
        };

        let report = compose_report(&stock);
        assert!(report.starts_with("<strong>ZZZ(ZZZ)</strong>"));
        assert!(report.contains("기타 섹터 내 중위권"));
        assert!(report.contains("조정이 진행되고 있습니다"));
        assert!(report.contains("관망하며 리스크를 관리"));
    }

    #[test]
    fn test_momentum_boundary() {
        let mut stock = create_test_stock();
        if let Some(stats) = stock.stats_bar.as_mut() {
            stats.momentum = Some(81.0);
        }
        assert!(compose_report(&stock).contains("강한 상승세를 타고 있습니다"));

        if let Some(stats) = stock.stats_bar.as_mut() {
            stats.momentum = Some(80.0);
        }
        let report = compose_report(&stock);
        assert!(report.contains("안정적인 흐름을 유지하고 있습니다"));
        assert!(!report.contains("강한 상승세"));
    }

    #[test]
    fn test_growth_excellence_sentence() {
        let mut stock = create_test_stock();
        stock.stats_bar = Some(StatsBar {
            fundamentals: Some(85.0),
            value: Some(40.0),
            stability: Some(60.0),
            momentum: None,
        });

        let report = compose_report(&stock);
        assert!(report.contains(
            "특히 <strong>성장성(85점)</strong> 부문에서 <strong>매우 우수한 평가</strong>를 받아, 미래 실적 기대감이 주가에 반영되고 있습니다."
        ));
    }

    #[test]
    fn test_value_and_stability_excellence_closings() {
        let mut stock = create_test_stock();
        stock.stats_bar = Some(StatsBar {
            fundamentals: Some(70.0),
            value: Some(92.5),
            stability: Some(80.0),
            momentum: None,
        });
        let report = compose_report(&stock);
        assert!(report.contains("밸류에이션(92.5점)"));
        assert!(report.contains("<strong>저평가 매력</strong>"));

        stock.stats_bar = Some(StatsBar {
            fundamentals: Some(70.0),
            value: Some(80.0),
            stability: Some(90.0),
            momentum: None,
        });
        let report = compose_report(&stock);
        assert!(report.contains("재무안정성(90점)"));
        assert!(report.contains("안정적인 방어력"));
    }

    #[test]
    fn test_weak_fundamentals_sentence() {
        let mut stock = create_test_stock();
        stock.stats_bar = Some(StatsBar {
            fundamentals: Some(40.0),
            value: Some(45.0),
            stability: Some(30.0),
            momentum: Some(20.0),
        });

        let report = compose_report(&stock);
        assert!(report.contains("다만 전반적인 펀더멘털 모멘텀은 다소 약한 구간을 지나고 있습니다."));
        assert!(!report.contains("밸류에이션"));
    }

    #[test]
    fn test_bullish_consensus() {
        let stock = with_prices(create_test_stock(), 100.0, 115.0);
        let report = compose_report(&stock);
        assert!(report.contains("<strong>긍정적</strong>"));
        assert!(report.contains("15.0%"));
    }

    #[test]
    fn test_minus_five_upside_is_overvalued() {
        let stock = with_prices(create_test_stock(), 100.0, 95.0);
        let report = compose_report(&stock);
        assert!(report.contains("<strong>고평가</strong>"));
        assert!(!report.contains("적정 수준"));
    }

    #[test]
    fn test_fairly_valued_consensus() {
        let stock = with_prices(create_test_stock(), 100.0, 104.0);
        assert!(compose_report(&stock).contains("<strong>적정 수준</strong>"));
    }

    #[test]
    fn test_oversold_with_golden_cross() {
        let mut stock = with_rsi(create_test_stock(), 25.0);
        stock.signals = vec![MACD_GOLDEN_CROSS.to_string()];

        let report = compose_report(&stock);
        assert!(report.contains("과매도"));
        assert!(report.contains("골든크로스"));
        assert!(report.contains("RSI 25.0"));
    }

    #[test]
    fn test_overbought_without_golden_cross() {
        let mut stock = with_rsi(create_test_stock(), 78.0);
        stock.signals = vec!["RSI_Overbought".to_string()];

        let report = compose_report(&stock);
        assert!(report.contains("과열(RSI 78.0)"));
        assert!(report.contains("숨고르기"));
        assert!(!report.contains("골든크로스"));
    }

    #[test]
    fn test_conclusion_thresholds() {
        let mut stock = create_test_stock();
        stock.final_score = Some(75.0);
        assert!(compose_report(&stock).ends_with("<strong>투자를 적극 고려해볼 만한 시점</strong>입니다."));

        stock.final_score = Some(49.0);
        assert!(compose_report(&stock).ends_with("<strong>관망하며 리스크를 관리</strong>하는 것이 좋습니다."));
    }
}
