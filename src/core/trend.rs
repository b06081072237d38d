use crate::domain::model::Advice;

/// How far back the last sample is compared.
const LOOKBACK: usize = 3;

/// Compares the last sample with the one three positions before it.
/// Rising prices mean hold, falling prices mean sell soon.
pub fn trend_advice(samples: &[f64]) -> Advice {
    if samples.len() < LOOKBACK + 1 {
        return Advice::Neutral;
    }

    let last = samples[samples.len() - 1];
    let earlier = samples[samples.len() - 1 - LOOKBACK];

    match last.partial_cmp(&earlier) {
        Some(std::cmp::Ordering::Greater) => Advice::Hold,
        Some(std::cmp::Ordering::Less) => Advice::SellSoon,
        _ => Advice::Neutral,
    }
}
