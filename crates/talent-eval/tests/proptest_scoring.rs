//! Property-based tests for the scoring core.
//!
//! Random templates and score sheets check that aggregation stays within the
//! range of the supplied scores and ignores input order. Classification must
//! never move down as the score rises.

use proptest::prelude::*;
use talent_eval::evaluations::{
    aggregate, classify, default_thresholds, Characteristic, CharacteristicId, EvaluationScore,
    Factor, FactorId, LevelThreshold, PerformanceLevel,
};

fn criteria_strategy() -> impl Strategy<Value = Vec<Factor>> {
    prop::collection::vec(prop::collection::vec(0.1f64..5.0, 1..4), 1..5).prop_map(|factors| {
        factors
            .into_iter()
            .enumerate()
            .map(|(f, weights)| Factor {
                id: FactorId::new(format!("f-{f}")),
                name: format!("Factor {f}"),
                characteristics: weights
                    .into_iter()
                    .enumerate()
                    .map(|(c, weight)| Characteristic {
                        id: CharacteristicId::new(format!("c-{f}-{c}")),
                        name: format!("Characteristic {f}.{c}"),
                        weight,
                    })
                    .collect(),
            })
            .collect()
    })
}

fn scored_template() -> impl Strategy<Value = (Vec<Factor>, Vec<EvaluationScore>)> {
    criteria_strategy().prop_flat_map(|criteria| {
        let ids: Vec<CharacteristicId> = criteria
            .iter()
            .flat_map(|factor| factor.characteristics.iter().map(|c| c.id.clone()))
            .collect();
        let count = ids.len();
        prop::collection::vec(1.0f64..=10.0, count).prop_map(move |values| {
            let scores = ids
                .iter()
                .cloned()
                .zip(values)
                .map(|(characteristic_id, score)| EvaluationScore {
                    characteristic_id,
                    score,
                })
                .collect();
            (criteria.clone(), scores)
        })
    })
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
        (lo.min(value), hi.max(value))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn overall_stays_within_supplied_scores((criteria, scores) in scored_template()) {
        let calculated = aggregate(&scores, &criteria);
        let (lo, hi) = bounds(scores.iter().map(|entry| entry.score));
        let overall = calculated.overall;
        prop_assert!(overall >= lo - 1e-9, "overall {} below {}", overall, lo);
        prop_assert!(overall <= hi + 1e-9, "overall {} above {}", overall, hi);
        prop_assert_eq!(calculated.factors.len(), criteria.len());

        for (factor, computed) in criteria.iter().zip(&calculated.factors) {
            let (lo, hi) = bounds(factor.characteristics.iter().filter_map(|characteristic| {
                scores
                    .iter()
                    .find(|entry| entry.characteristic_id == characteristic.id)
                    .map(|entry| entry.score)
            }));
            prop_assert!(
                computed.score >= lo - 1e-9 && computed.score <= hi + 1e-9,
                "factor {} scored {} outside {}..={}",
                factor.id,
                computed.score,
                lo,
                hi
            );
        }
    }

    #[test]
    fn score_order_does_not_change_result(
        (criteria, scores) in scored_template(),
        rotation in 0usize..16,
    ) {
        let expected = aggregate(&scores, &criteria);

        let mut shuffled = scores.clone();
        shuffled.reverse();
        let len = shuffled.len();
        shuffled.rotate_left(rotation % len);

        prop_assert_eq!(aggregate(&shuffled, &criteria), expected);
    }

    #[test]
    fn factor_order_follows_criteria((criteria, scores) in scored_template()) {
        let calculated = aggregate(&scores, &criteria);
        let expected: Vec<&FactorId> = criteria.iter().map(|factor| &factor.id).collect();
        let actual: Vec<&FactorId> =
            calculated.factors.iter().map(|factor| &factor.factor_id).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn classification_is_monotonic(a in 0.0f64..12.0, b in 0.0f64..12.0) {
        let thresholds = default_thresholds();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify(low, &thresholds) <= classify(high, &thresholds));
    }

    #[test]
    fn classification_ignores_threshold_order(score in 0.0f64..12.0, rotation in 0usize..3) {
        let mut thresholds: Vec<LevelThreshold> = default_thresholds();
        let expected = classify(score, &thresholds);
        thresholds.rotate_left(rotation);
        prop_assert_eq!(classify(score, &thresholds), expected);
    }

    #[test]
    fn scores_above_every_threshold_are_indeterminate(score in 10.000_001f64..1_000.0) {
        prop_assert_eq!(classify(score, &default_thresholds()), PerformanceLevel::Indeterminate);
    }
}
