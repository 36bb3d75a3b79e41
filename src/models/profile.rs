use std::fmt;

use strsim::jaro_winkler;

use crate::error::{DietError, Result};
use crate::health::BmiResult;

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Minimum accepted age.
pub const MIN_AGE: u32 = 10;

/// A closed set of options picked from a list.
pub trait Choice: Sized + Copy + 'static {
    /// Field name used in error messages.
    const FIELD: &'static str;

    /// Every option, in display order.
    const ALL: &'static [Self];

    /// Human-readable label, also used in the generation prompt.
    fn label(self) -> &'static str;

    /// Parse from free text (case-insensitive; `-`, `_` and spaces are equivalent).
    fn parse(input: &str) -> Result<Self> {
        let wanted = normalize(input);
        if let Some(found) = Self::ALL.iter().find(|c| normalize(c.label()) == wanted) {
            return Ok(*found);
        }

        let best = Self::ALL
            .iter()
            .map(|c| (c.label(), jaro_winkler(&normalize(c.label()), &wanted)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let options: Vec<&str> = Self::ALL.iter().map(|c| c.label()).collect();
        let mut message = format!(
            "Invalid {} '{}' (expected one of: {})",
            Self::FIELD,
            input.trim(),
            options.join(", ")
        );
        if let Some((label, _)) = best {
            message.push_str(&format!(". Did you mean '{}'?", label));
        }
        Err(DietError::Validation(message))
    }

    /// Position in [`Choice::ALL`], for preselecting menus.
    fn position(self) -> usize
    where
        Self: PartialEq,
    {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Choice for Gender {
    const FIELD: &'static str = "gender";
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female, Gender::Other];

    fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DietIntensity {
    Easy,
    #[default]
    Moderate,
    Hardcore,
}

impl Choice for DietIntensity {
    const FIELD: &'static str = "diet intensity";
    const ALL: &'static [Self] = &[
        DietIntensity::Easy,
        DietIntensity::Moderate,
        DietIntensity::Hardcore,
    ];

    fn label(self) -> &'static str {
        match self {
            DietIntensity::Easy => "easy",
            DietIntensity::Moderate => "moderate",
            DietIntensity::Hardcore => "hardcore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl Choice for ActivityLevel {
    const FIELD: &'static str = "activity level";
    const ALL: &'static [Self] = &[
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very active",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DietType {
    #[default]
    Vegetarian,
    NonVegetarian,
    Vegan,
}

impl Choice for DietType {
    const FIELD: &'static str = "diet type";
    const ALL: &'static [Self] = &[DietType::Vegetarian, DietType::NonVegetarian, DietType::Vegan];

    fn label(self) -> &'static str {
        match self {
            DietType::Vegetarian => "vegetarian",
            DietType::NonVegetarian => "non-vegetarian",
            DietType::Vegan => "vegan",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(Gender, DietIntensity, ActivityLevel, DietType);

/// A validated set of user inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Weight in kg.
    pub weight: f64,
    /// Height in cm.
    pub height: f64,
    pub diet_intensity: DietIntensity,
    pub activity_level: ActivityLevel,
    pub diet_type: DietType,
}

impl UserProfile {
    pub fn bmi(&self) -> BmiResult {
        BmiResult::from_measurements(self.weight, self.height)
    }
}

/// Raw, unvalidated form contents.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub height: String,
    pub diet_intensity: String,
    pub activity_level: String,
    pub diet_type: String,
}

impl ProfileForm {
    /// Form prefilled from an existing profile, used when editing.
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            age: profile.age.to_string(),
            gender: profile.gender.label().to_string(),
            weight: profile.weight.to_string(),
            height: profile.height.to_string(),
            diet_intensity: profile.diet_intensity.label().to_string(),
            activity_level: profile.activity_level.label().to_string(),
            diet_type: profile.diet_type.label().to_string(),
        }
    }
}

/// Validate raw form strings into a [`UserProfile`].
///
/// Checks run in form order and the first failure is returned.
pub fn validate_profile(form: &ProfileForm) -> Result<UserProfile> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(DietError::validation("Please enter your name"));
    }

    let age = parse_age(&form.age)
        .ok_or_else(|| DietError::validation("Please enter a valid age (10+)"))?;

    let gender = Gender::parse(&form.gender)?;

    let weight = parse_positive_decimal(&form.weight)
        .ok_or_else(|| DietError::validation("Please enter a valid weight"))?;
    let height = parse_positive_decimal(&form.height)
        .ok_or_else(|| DietError::validation("Please enter a valid height"))?;

    Ok(UserProfile {
        name: name.to_string(),
        age,
        gender,
        weight,
        height,
        diet_intensity: DietIntensity::parse(&form.diet_intensity)?,
        activity_level: ActivityLevel::parse(&form.activity_level)?,
        diet_type: DietType::parse(&form.diet_type)?,
    })
}

fn parse_age(input: &str) -> Option<u32> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse::<u32>().ok().filter(|age| *age >= MIN_AGE)
}

/// Digits with at most one decimal point, strictly positive and finite.
fn parse_positive_decimal(input: &str) -> Option<f64> {
    let input = input.trim();
    let digits = input.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = input.chars().filter(|c| *c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != input.chars().count() {
        return None;
    }
    input
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> ProfileForm {
        ProfileForm {
            name: "Asha".to_string(),
            age: "29".to_string(),
            gender: "female".to_string(),
            weight: "65.5".to_string(),
            height: "170".to_string(),
            diet_intensity: "moderate".to_string(),
            activity_level: "very active".to_string(),
            diet_type: "vegan".to_string(),
        }
    }

    #[test]
    fn test_parse_positive_decimal() {
        assert_eq!(parse_positive_decimal("65.5"), Some(65.5));
        assert_eq!(parse_positive_decimal("170"), Some(170.0));
        assert_eq!(parse_positive_decimal("-5"), None);
        assert_eq!(parse_positive_decimal("abc"), None);
        assert_eq!(parse_positive_decimal("1.2.3"), None);
        assert_eq!(parse_positive_decimal("0"), None);
        assert_eq!(parse_positive_decimal("1e3"), None);
        assert_eq!(parse_positive_decimal(""), None);
    }

    #[test]
    fn test_overflowing_decimal_is_rejected() {
        let huge = "9".repeat(400);
        assert_eq!(parse_positive_decimal(&huge), None);
        assert_eq!(parse_positive_decimal(&format!("{}.5", huge)), None);
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("10"), Some(10));
        assert_eq!(parse_age("9"), None);
        assert_eq!(parse_age("+12"), None);
        assert_eq!(parse_age("99999999999999"), None);
    }

    #[test]
    fn test_choice_parse_variants() {
        assert_eq!(ActivityLevel::parse("Very-Active").unwrap(), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::parse("very_active").unwrap(), ActivityLevel::VeryActive);
        assert_eq!(DietType::parse("NON VEGETARIAN").unwrap(), DietType::NonVegetarian);
    }

    #[test]
    fn test_choice_suggestion() {
        let err = DietType::parse("vegann").unwrap_err().to_string();
        assert!(err.contains("Did you mean 'vegan'"), "{}", err);

        let err = Gender::parse("xyz").unwrap_err().to_string();
        assert!(!err.contains("Did you mean"), "{}", err);
    }

    #[test]
    fn test_form_roundtrip() {
        let profile = validate_profile(&sample_form()).unwrap();
        let again = validate_profile(&ProfileForm::from_profile(&profile)).unwrap();
        assert_eq!(profile, again);
    }

    #[test]
    fn test_name_is_trimmed() {
        let mut form = sample_form();
        form.name = "  Asha  ".to_string();
        assert_eq!(validate_profile(&form).unwrap().name, "Asha");
    }
}
