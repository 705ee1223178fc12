use std::collections::HashMap;

use super::super::domain::{
    CalculatedFactorScore, CalculatedScores, CharacteristicId, EvaluationScore, Factor,
};

/// Weighted average per factor plus a global weighted average.
///
/// A characteristic without a matching score counts as `0` and still adds its
/// weight to the denominator. `overall` is taken over every characteristic of
/// every factor, not over the factor averages, so factors carrying more total
/// weight dominate it. Any zero denominator yields `0`.
///
/// When `scores` holds several entries for one characteristic, the first one
/// in input order is used.
pub fn aggregate(scores: &[EvaluationScore], criteria: &[Factor]) -> CalculatedScores {
    let lookup = score_lookup(scores);
    let raw = |id: &CharacteristicId| lookup.get(id).copied().unwrap_or(0.0);

    let mut weighted_total = 0.0;
    let mut weight_total = 0.0;

    let factors = criteria
        .iter()
        .map(|factor| {
            let mut factor_weighted = 0.0;
            let mut factor_weight = 0.0;
            for characteristic in &factor.characteristics {
                factor_weighted += characteristic.weight * raw(&characteristic.id);
                factor_weight += characteristic.weight;
            }
            weighted_total += factor_weighted;
            weight_total += factor_weight;

            CalculatedFactorScore {
                factor_id: factor.id.clone(),
                factor_name: factor.name.clone(),
                score: weighted_mean(factor_weighted, factor_weight),
            }
        })
        .collect();

    CalculatedScores {
        overall: weighted_mean(weighted_total, weight_total),
        factors,
    }
}

fn score_lookup(scores: &[EvaluationScore]) -> HashMap<&CharacteristicId, f64> {
    let mut lookup = HashMap::with_capacity(scores.len());
    for entry in scores {
        lookup.entry(&entry.characteristic_id).or_insert(entry.score);
    }
    lookup
}

fn weighted_mean(weighted: f64, weight: f64) -> f64 {
    if weight == 0.0 {
        0.0
    } else {
        weighted / weight
    }
}
