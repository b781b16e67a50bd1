//! Body Mass Index from metric measurements.

pub const MIN_WEIGHT_KG: f64 = 20.0;
pub const MAX_WEIGHT_KG: f64 = 300.0;
pub const MIN_HEIGHT_CM: f64 = 100.0;
pub const MAX_HEIGHT_CM: f64 = 250.0;

/// `weight / height_m²`, rounded to one decimal place.
///
/// Inputs are expected to be range-checked by the caller.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round1(weight_kg / (height_m * height_m))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        assert_eq!(calculate_bmi(70.0, 175.0), 22.9);
        assert_eq!(calculate_bmi(50.0, 180.0), 15.4);
        assert_eq!(calculate_bmi(100.0, 170.0), 34.6);
        assert_eq!(calculate_bmi(20.0, 250.0), 3.2);
        assert_eq!(calculate_bmi(300.0, 100.0), 300.0);
    }

    #[test]
    fn matches_formula_across_valid_ranges() {
        let mut height = MIN_HEIGHT_CM;
        while height <= MAX_HEIGHT_CM {
            let mut weight = MIN_WEIGHT_KG;
            while weight <= MAX_WEIGHT_KG {
                let height_m = height / 100.0;
                let expected = (weight / (height_m * height_m) * 10.0).round() / 10.0;
                let got = calculate_bmi(weight, height);
                assert!(
                    (got - expected).abs() < 1e-9,
                    "w={weight} h={height}: {got} != {expected}"
                );
                // One decimal place.
                assert!(((got * 10.0).round() - got * 10.0).abs() < 1e-6);
                weight += 2.5;
            }
            height += 2.5;
        }
    }
}
