use crate::models::{SkuMap, Totals};
use crate::planner::constants::{ceil_units, PROJECTION_HOURS_MAX};

/// Whole units per SKU for `duration_hours` at the given hourly rates.
///
/// Always rounds up so the plan never under-delivers. Hours are clamped to
/// `[0, PROJECTION_HOURS_MAX]`, with NaN treated as zero.
pub fn project_totals(per_hour: &SkuMap<f64>, duration_hours: f64) -> Totals {
    let hours = if duration_hours.is_nan() {
        0.0
    } else {
        duration_hours.clamp(0.0, PROJECTION_HOURS_MAX)
    };
    per_hour.map(|_, &rate| ceil_units(rate * hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sku;

    #[test]
    fn test_rounds_up() {
        let mut rates: SkuMap<f64> = SkuMap::default();
        rates[Sku::Gel30] = 1.1;
        rates[Sku::Bar50] = 0.5;
        let totals = project_totals(&rates, 3.0);
        assert_eq!(totals[Sku::Gel30], 4);
        assert_eq!(totals[Sku::Bar50], 2);
        assert_eq!(totals[Sku::Mix60], 0);
    }

    #[test]
    fn test_float_noise_does_not_add_unit() {
        let mut rates: SkuMap<f64> = SkuMap::default();
        // 0.1 * 30 = 3.0000000000000004
        rates[Sku::Gel50] = 0.1;
        assert_eq!(project_totals(&rates, 30.0)[Sku::Gel50], 3);
    }

    #[test]
    fn test_zero_duration() {
        let rates = SkuMap::from_fn(|_| 2.0);
        let totals = project_totals(&rates, 0.0);
        assert!(totals.iter().all(|(_, &units)| units == 0));
        let totals = project_totals(&rates, f64::NAN);
        assert!(totals.iter().all(|(_, &units)| units == 0));
    }

    #[test]
    fn test_hours_capped_at_projection_limit() {
        let mut rates: SkuMap<f64> = SkuMap::default();
        rates[Sku::Gel30] = 1.0;
        assert_eq!(project_totals(&rates, 1e10)[Sku::Gel30], 720);
        assert_eq!(project_totals(&rates, f64::INFINITY)[Sku::Gel30], 720);
    }
}
