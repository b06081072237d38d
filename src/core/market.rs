use crate::domain::model::{Crop, MandiQuote, PricePoint};
use crate::utils::error::{KisanError, Result};
use chrono::NaiveDate;
use rand::Rng;
use std::io::Write;

/// Reference mandi price in rupees per quintal.
pub const REFERENCE_PRICE: f64 = 2000.0;
pub const REFERENCE_STATE: &str = "Punjab";
/// Daily increment of the fallback forecast.
pub const FORECAST_STEP: f64 = 10.0;
/// Largest daily move of the simulated series, as a fraction of the base price.
const MAX_DAILY_MOVE: f64 = 0.025;

pub fn base_price(commodity: &str) -> f64 {
    match commodity.parse::<Crop>() {
        Ok(Crop::Wheat) => 2275.0,
        Ok(Crop::Rice) => 2183.0,
        Ok(Crop::Maize) => 2090.0,
        Ok(Crop::Cotton) => 6620.0,
        Ok(Crop::Sugarcane) => 315.0,
        Ok(Crop::Soybean) => 4600.0,
        Ok(Crop::Mustard) => 5650.0,
        Err(_) => REFERENCE_PRICE,
    }
}

pub fn quote(commodity: &str, date: NaiveDate) -> MandiQuote {
    MandiQuote {
        commodity: commodity.to_string(),
        price: REFERENCE_PRICE,
        state: REFERENCE_STATE.to_string(),
        date,
    }
}

/// Simulated daily prices for `days` days ending on `end`.
///
/// A random walk from the commodity's base price, never below one rupee.
/// Fails when the first day would fall outside the calendar range.
pub fn price_series<R: Rng>(
    commodity: &str,
    days: usize,
    end: NaiveDate,
    rng: &mut R,
) -> Result<Vec<PricePoint>> {
    let start = i64::try_from(days.saturating_sub(1))
        .ok()
        .and_then(chrono::Duration::try_days)
        .and_then(|span| end.checked_sub_signed(span))
        .ok_or_else(|| {
            KisanError::invalid_argument(
                "days",
                days,
                "Series would start before the earliest date",
            )
        })?;

    let base = base_price(commodity);
    let max_move = base * MAX_DAILY_MOVE;
    let mut price = base;

    let series = start
        .iter_days()
        .take(days)
        .enumerate()
        .map(|(i, date)| {
            if i > 0 {
                price = (price + rng.gen_range(-max_move..=max_move)).max(1.0);
            }
            PricePoint {
                date,
                price: price.round(),
            }
        })
        .collect();
    Ok(series)
}

/// Straight-line forecast used when no model is available.
pub fn linear_forecast(days: usize) -> Vec<f64> {
    (0..days)
        .map(|i| REFERENCE_PRICE + i as f64 * FORECAST_STEP)
        .collect()
}

pub fn prices_of(series: &[PricePoint]) -> Vec<f64> {
    series.iter().map(|point| point.price).collect()
}

pub fn write_series_csv<W: Write>(series: &[PricePoint], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in series {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush()?;
    Ok(())
}
