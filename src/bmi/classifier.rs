//! Maps a BMI value to a health category with display metadata.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

/// Lower bound inclusive, upper bound exclusive.
pub fn classify(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Healthy
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

impl BmiCategory {
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Healthy => "Healthy",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Background colour token.
    pub fn color(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "#FEE2E2",
            BmiCategory::Healthy => "#DCFCE7",
            BmiCategory::Overweight => "#FEF3C7",
            BmiCategory::Obese => "#FEE2E2",
        }
    }

    /// Accent colour token.
    pub fn text_color(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "#DC2626",
            BmiCategory::Healthy => "#16A34A",
            BmiCategory::Overweight => "#D97706",
            BmiCategory::Obese => "#DC2626",
        }
    }

    pub fn tips(self) -> &'static [&'static str] {
        match self {
            BmiCategory::Underweight => &[
                "Increase calorie intake with nutrient-rich foods",
                "Try strength training 3x/week",
                "Include healthy fats in your diet",
            ],
            BmiCategory::Healthy => &[
                "Maintain balanced diet and 30 mins of activity daily",
                "Stay hydrated throughout the day",
                "Get adequate sleep (7-9 hours)",
            ],
            BmiCategory::Overweight => &[
                "Reduce processed foods and increase cardio",
                "Track portions and maintain food diary",
                "Aim for 150 minutes of moderate exercise weekly",
            ],
            BmiCategory::Obese => &[
                "Start structured weight-loss plan",
                "Combine diet & exercise under medical supervision",
                "Consult healthcare provider for personalized guidance",
            ],
        }
    }
}
