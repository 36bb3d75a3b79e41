/// Prefix of the text that stands in for a plan when generation fails.
pub const ERROR_PREFIX: &str = "Error generating diet:";

/// Free-form plan text as returned by the generator.
///
/// When generation fails the text is an error message instead, so the rest of
/// the flow (display, extraction, export) keeps working on it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DietPlan {
    text: String,
}

impl DietPlan {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Plan standing in for a failed generation.
    pub fn from_error(error: impl std::fmt::Display) -> Self {
        Self::new(format!("{} {}", ERROR_PREFIX, error))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.text.starts_with(ERROR_PREFIX)
    }

    /// True when there is nothing worth exporting.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Non-blank lines, each one a paragraph in the exported report.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.text.lines().filter(|line| !line.trim().is_empty())
    }
}

impl From<String> for DietPlan {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_plan() {
        let plan = DietPlan::from_error("connection refused");
        assert!(plan.is_error());
        assert_eq!(plan.text(), "Error generating diet: connection refused");
    }

    #[test]
    fn test_paragraphs_skip_blank_lines() {
        let plan = DietPlan::new("Day 1:\n\n  \nBreakfast\nOats");
        let paragraphs: Vec<&str> = plan.paragraphs().collect();
        assert_eq!(paragraphs, vec!["Day 1:", "Breakfast", "Oats"]);
    }

    #[test]
    fn test_blank() {
        assert!(DietPlan::new(" \n\t").is_blank());
        assert!(!DietPlan::new("x").is_blank());
    }
}
