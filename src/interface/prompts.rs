use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};

use crate::error::Result;
use crate::models::{
    validate_profile, ActivityLevel, Choice, DietIntensity, DietType, Gender, ProfileForm,
    UserProfile,
};
use crate::report::{DestinationPicker, REPORT_EXTENSION};

/// Actions offered by the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    GenerateDiet,
    ShowBmiChart,
    ShowMacroChart,
    SavePdf,
    ViewPlan,
    ViewNutrition,
    SaveNutritionCsv,
    EditProfile,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 9] = [
        MenuAction::GenerateDiet,
        MenuAction::ShowBmiChart,
        MenuAction::ShowMacroChart,
        MenuAction::SavePdf,
        MenuAction::ViewPlan,
        MenuAction::ViewNutrition,
        MenuAction::SaveNutritionCsv,
        MenuAction::EditProfile,
        MenuAction::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::GenerateDiet => "Generate Diet",
            MenuAction::ShowBmiChart => "Show BMI Chart",
            MenuAction::ShowMacroChart => "Show Macro Chart",
            MenuAction::SavePdf => "Save PDF",
            MenuAction::ViewPlan => "View Diet Plan",
            MenuAction::ViewNutrition => "View Nutrition Details",
            MenuAction::SaveNutritionCsv => "Save Nutrition CSV",
            MenuAction::EditProfile => "Edit Profile",
            MenuAction::Quit => "Quit",
        }
    }
}

/// Prompt for the next menu action.
pub fn prompt_action() -> Result<MenuAction> {
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
    let selection = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(MenuAction::ALL[selection])
}

fn prompt_text(prompt: &str, current: &str) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if !current.is_empty() {
        input = input.default(current.to_string());
    }
    Ok(input.interact_text()?)
}

fn prompt_choice<C: Choice + PartialEq>(prompt: &str, current: C) -> Result<C> {
    let labels: Vec<&str> = C::ALL.iter().map(|c| c.label()).collect();
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(current.position())
        .interact()?;
    Ok(C::ALL[selection])
}

/// Fill in the form once, prefilled from `prefill`. The raw strings are
/// returned unvalidated.
pub fn prompt_profile_form(prefill: &ProfileForm) -> Result<ProfileForm> {
    let name = prompt_text("Name", &prefill.name)?;
    let age = prompt_text("Age", &prefill.age)?;
    let gender: Gender = prompt_choice("Gender", preselect(&prefill.gender))?;
    let weight = prompt_text("Weight (kg)", &prefill.weight)?;
    let height = prompt_text("Height (cm)", &prefill.height)?;
    let intensity: DietIntensity =
        prompt_choice("Diet Intensity", preselect(&prefill.diet_intensity))?;
    let activity: ActivityLevel =
        prompt_choice("Activity Level", preselect(&prefill.activity_level))?;
    let diet_type: DietType = prompt_choice("Diet Type", preselect(&prefill.diet_type))?;

    Ok(ProfileForm {
        name,
        age,
        gender: gender.label().to_string(),
        weight,
        height,
        diet_intensity: intensity.label().to_string(),
        activity_level: activity.label().to_string(),
        diet_type: diet_type.label().to_string(),
    })
}

fn preselect<C: Choice + Default>(raw: &str) -> C {
    C::parse(raw).unwrap_or_default()
}

/// Prompt until the form validates or the user gives up.
///
/// After a failed attempt the form is shown again with the previous answers.
pub fn collect_profile(current: Option<&UserProfile>) -> Result<Option<UserProfile>> {
    let mut form = current.map(ProfileForm::from_profile).unwrap_or_default();
    loop {
        form = prompt_profile_form(&form)?;
        match validate_profile(&form) {
            Ok(profile) => return Ok(Some(profile)),
            Err(e) => {
                println!("Input Error: {}", e);
                if !prompt_yes_no("Try again?", true)? {
                    return Ok(None);
                }
            }
        }
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Asks for a path on the terminal; an empty answer cancels.
pub struct PathPrompt {
    prompt: String,
}

impl PathPrompt {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Prompt for a destination for the PDF report, suggesting a file name.
    pub fn for_report(name: &str) -> Self {
        Self::new(format!(
            "Save Diet Plan as (e.g. {}, empty to cancel)",
            suggested_report_name(name)
        ))
    }

    pub fn ask(&self) -> Result<Option<PathBuf>> {
        let answer: String = Input::new()
            .with_prompt(&self.prompt)
            .allow_empty(true)
            .interact_text()?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(answer)))
    }
}

fn suggested_report_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("diet_plan_{}.{}", stem, REPORT_EXTENSION)
}

impl DestinationPicker for PathPrompt {
    fn pick_destination(&mut self) -> Result<Option<PathBuf>> {
        self.ask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_labels_unique() {
        let mut labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), MenuAction::ALL.len());
    }

    #[test]
    fn test_suggested_report_name() {
        assert_eq!(suggested_report_name("Anita K."), "diet_plan_anita_k_.pdf");
        assert!(PathPrompt::for_report("Anita K.").prompt.contains("diet_plan_anita_k_.pdf"));
    }
}
