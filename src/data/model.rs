use serde::Serialize;

pub const HEIGHT_RANGE_CM: (f64, f64) = (1.0, 250.0);
pub const WEIGHT_RANGE_KG: (f64, f64) = (1.0, 300.0);

pub const DEFAULT_HEIGHT_CM: f64 = 170.0;
pub const DEFAULT_WEIGHT_KG: f64 = 65.0;

// BMI band mapped onto the gauge.
const GAUGE_MIN_BMI: f64 = 10.0;
const GAUGE_SPAN_BMI: f64 = 30.0;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MeasurementError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// A validated height/weight pair as entered in the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    height_cm: f64,
    weight_kg: f64,
}

impl Measurement {
    pub fn new(height_cm: f64, weight_kg: f64) -> Result<Self, MeasurementError> {
        check_range("height_cm", height_cm, HEIGHT_RANGE_CM)?;
        check_range("weight_kg", weight_kg, WEIGHT_RANGE_KG)?;
        Ok(Self {
            height_cm,
            weight_kg,
        })
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn bmi(&self) -> BmiResult {
        let height_m = self.height_cm / 100.0;
        BmiResult::from_bmi(self.weight_kg / (height_m * height_m))
    }
}

impl Default for Measurement {
    fn default() -> Self {
        Self {
            height_cm: DEFAULT_HEIGHT_CM,
            weight_kg: DEFAULT_WEIGHT_KG,
        }
    }
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), MeasurementError> {
    // NaN fails both comparisons, so it is rejected here as well
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(MeasurementError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn for_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub gauge_position: f64,
    pub category: BmiCategory,
}

impl BmiResult {
    pub fn from_bmi(bmi: f64) -> Self {
        Self {
            bmi,
            gauge_position: gauge_position(bmi),
            category: BmiCategory::for_bmi(bmi),
        }
    }

    /// BMI rounded to one decimal, as shown on the page and sent to the model.
    pub fn display(&self) -> String {
        format!("{:.1}", self.bmi)
    }
}

pub fn gauge_position(bmi: f64) -> f64 {
    ((bmi - GAUGE_MIN_BMI) / GAUGE_SPAN_BMI).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_reference_case() {
        let m = Measurement::new(170.0, 65.0).unwrap();
        let result = m.bmi();

        assert!((result.bmi - 65.0 / 2.89).abs() < 1e-9);
        assert_eq!(result.display(), "22.5");
        assert!((result.gauge_position - 0.41634).abs() < 1e-4);
        assert_eq!(result.category, BmiCategory::Normal);
    }

    #[test]
    fn gauge_is_clamped_and_linear() {
        assert_eq!(gauge_position(10.0), 0.0);
        assert_eq!(gauge_position(40.0), 1.0);
        assert_eq!(gauge_position(25.0), 0.5);
        assert_eq!(gauge_position(5.0), 0.0);
        assert_eq!(gauge_position(100.0), 1.0);
    }

    #[test]
    fn gauge_is_monotonic() {
        let mut last = 0.0;
        for step in 0..=500 {
            let g = gauge_position(step as f64 * 0.2);
            assert!(g >= last, "gauge decreased at bmi {}", step as f64 * 0.2);
            assert!((0.0..=1.0).contains(&g));
            last = g;
        }
    }

    #[test]
    fn bmi_is_positive_and_finite_across_range() {
        for h in [1.0, 1.5, 50.0, 120.0, 170.0, 249.9, 250.0] {
            for w in [1.0, 2.5, 65.0, 150.0, 299.0, 300.0] {
                let r = Measurement::new(h, w).unwrap().bmi();
                assert!(r.bmi.is_finite() && r.bmi > 0.0, "h={} w={}", h, w);
                assert!((r.bmi - w / (h / 100.0).powi(2)).abs() <= r.bmi * 1e-12);
            }
        }
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let m = Measurement::new(182.5, 77.3).unwrap();
        let a = m.bmi();
        let b = m.bmi();
        assert_eq!(a.bmi.to_bits(), b.bmi.to_bits());
        assert_eq!(a.gauge_position.to_bits(), b.gauge_position.to_bits());
    }

    #[test]
    fn rejects_out_of_range_input() {
        assert!(matches!(
            Measurement::new(0.5, 65.0),
            Err(MeasurementError::OutOfRange { field: "height_cm", .. })
        ));
        assert!(matches!(
            Measurement::new(170.0, 300.1),
            Err(MeasurementError::OutOfRange { field: "weight_kg", .. })
        ));
        assert!(Measurement::new(f64::NAN, 65.0).is_err());
        assert!(Measurement::new(170.0, f64::INFINITY).is_err());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(Measurement::new(1.0, 1.0).is_ok());
        assert!(Measurement::new(250.0, 300.0).is_ok());
    }

    #[test]
    fn categories_follow_who_bands() {
        assert_eq!(BmiCategory::for_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::for_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::for_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::for_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn out_of_range_error_names_field() {
        let err = Measurement::new(300.0, 65.0).unwrap_err();
        assert_eq!(err.to_string(), "height_cm must be between 1 and 250, got 300");
    }
}
