use serde::Serialize;

/// Placeholder for a nutrient field that was never found.
pub const NOT_AVAILABLE: &str = "N/A";

/// Nutrient fields recovered for one meal.
///
/// Values are kept as the text found after the label (e.g. "350 kcal").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealNutrition {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    pub fiber: String,
    pub micronutrients: Vec<String>,
}

impl Default for MealNutrition {
    fn default() -> Self {
        Self {
            calories: NOT_AVAILABLE.to_string(),
            protein: NOT_AVAILABLE.to_string(),
            carbs: NOT_AVAILABLE.to_string(),
            fat: NOT_AVAILABLE.to_string(),
            fiber: NOT_AVAILABLE.to_string(),
            micronutrients: Vec::new(),
        }
    }
}

impl MealNutrition {
    /// The five macro fields as (label, value) pairs, in display order.
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("Calories", self.calories.as_str()),
            ("Protein", self.protein.as_str()),
            ("Carbs", self.carbs.as_str()),
            ("Fat", self.fat.as_str()),
            ("Fiber", self.fiber.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealEntry {
    pub meal: String,
    #[serde(flatten)]
    pub nutrition: MealNutrition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    pub day: String,
    pub meals: Vec<MealEntry>,
}

/// Day → meal → nutrients, in the order the plan first mentions them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct NutritionTable {
    days: Vec<DayEntry>,
}

impl NutritionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn days(&self) -> &[DayEntry] {
        &self.days
    }

    pub fn day(&self, label: &str) -> Option<&DayEntry> {
        self.days.iter().find(|d| d.day == label)
    }

    pub fn meal(&self, day: &str, meal: &str) -> Option<&MealNutrition> {
        self.day(day)?
            .meals
            .iter()
            .find(|m| m.meal == meal)
            .map(|m| &m.nutrition)
    }

    /// Start a day with no meals. A day seen again is cleared but keeps its
    /// original position.
    pub fn begin_day(&mut self, label: &str) {
        match self.days.iter_mut().find(|d| d.day == label) {
            Some(existing) => existing.meals.clear(),
            None => self.days.push(DayEntry {
                day: label.to_string(),
                meals: Vec::new(),
            }),
        }
    }

    /// Record a meal for a day, replacing any earlier record for the same meal.
    pub fn set_meal(&mut self, day: &str, meal: &str, nutrition: MealNutrition) {
        if self.day(day).is_none() {
            self.begin_day(day);
        }
        let Some(entry) = self.days.iter_mut().find(|d| d.day == day) else {
            return;
        };
        match entry.meals.iter_mut().find(|m| m.meal == meal) {
            Some(existing) => existing.nutrition = nutrition,
            None => entry.meals.push(MealEntry {
                meal: meal.to_string(),
                nutrition,
            }),
        }
    }

    /// Total number of meal records across all days.
    pub fn meal_count(&self) -> usize {
        self.days.iter().map(|d| d.meals.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fields_are_na() {
        let n = MealNutrition::default();
        assert!(n.fields().iter().all(|(_, v)| *v == NOT_AVAILABLE));
        assert!(n.micronutrients.is_empty());
    }

    #[test]
    fn test_begin_day_clears_but_keeps_position() {
        let mut table = NutritionTable::new();
        table.set_meal("Day 1", "Lunch", MealNutrition::default());
        table.begin_day("Day 2");
        table.begin_day("Day 1");

        assert_eq!(table.days()[0].day, "Day 1");
        assert!(table.days()[0].meals.is_empty());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_set_meal_replaces() {
        let mut table = NutritionTable::new();
        table.set_meal("Day 1", "Snack", MealNutrition::default());
        let updated = MealNutrition {
            calories: "150".to_string(),
            ..MealNutrition::default()
        };
        table.set_meal("Day 1", "Snack", updated);

        assert_eq!(table.meal_count(), 1);
        assert_eq!(table.meal("Day 1", "Snack").unwrap().calories, "150");
    }
}
