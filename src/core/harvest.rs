use crate::domain::model::{Crop, PracticeFactor, YieldEstimate, YieldInputs};
use crate::utils::error::Result;
use crate::utils::validation::require_positive;

/// Flat price used for revenue estimates, in rupees per quintal.
pub const FIXED_PRICE_PER_QUINTAL: f64 = 2000.0;

/// Typical output in quintals per acre.
pub fn base_yield(crop: Crop) -> f64 {
    match crop {
        Crop::Wheat => 18.0,
        Crop::Rice => 22.0,
        Crop::Maize => 25.0,
        Crop::Cotton => 8.0,
        Crop::Sugarcane => 300.0,
        Crop::Soybean => 10.0,
        Crop::Mustard => 7.0,
    }
}

pub fn estimate_yield(inputs: &YieldInputs) -> Result<YieldEstimate> {
    require_positive("area_units", inputs.area_units)?;

    let expected_yield =
        base_yield(inputs.crop) * inputs.area_units * inputs.practice_factor.multiplier();

    Ok(YieldEstimate {
        crop: inputs.crop,
        expected_yield,
        approximate_revenue: expected_yield * FIXED_PRICE_PER_QUINTAL,
    })
}

/// Convenience entry point taking raw user input.
pub fn estimate_yield_from_raw(
    crop: &str,
    area_units: f64,
    practice_factor: f64,
) -> Result<YieldEstimate> {
    let inputs = YieldInputs {
        crop: crop.parse()?,
        area_units,
        practice_factor: PracticeFactor::from_multiplier(practice_factor)?,
    };
    estimate_yield(&inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::KisanError;

    #[test]
    fn test_standard_practice_is_base_times_area() {
        for crop in Crop::ALL {
            let estimate = estimate_yield(&YieldInputs {
                crop,
                area_units: 2.5,
                practice_factor: PracticeFactor::Standard,
            })
            .unwrap();
            assert_eq!(estimate.expected_yield, base_yield(crop) * 2.5);
            assert_eq!(
                estimate.approximate_revenue,
                estimate.expected_yield * FIXED_PRICE_PER_QUINTAL
            );
        }
    }

    #[test]
    fn test_practice_factor_scales_output() {
        let improved = estimate_yield_from_raw("wheat", 10.0, 1.1).unwrap();
        let traditional = estimate_yield_from_raw("wheat", 10.0, 0.9).unwrap();
        assert!((improved.expected_yield - 198.0).abs() < 1e-9);
        assert!((traditional.expected_yield - 162.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_crop_is_invalid_argument() {
        assert!(matches!(
            estimate_yield_from_raw("dragonfruit", 1.0, 1.0),
            Err(KisanError::InvalidArgument { ref field, .. }) if field == "crop"
        ));
    }

    #[test]
    fn test_bad_area_or_factor_rejected() {
        assert!(estimate_yield_from_raw("rice", 0.0, 1.0).is_err());
        assert!(estimate_yield_from_raw("rice", -3.0, 1.0).is_err());
        assert!(estimate_yield_from_raw("rice", 1.0, 1.5).is_err());
    }
}
