pub mod prompts;
pub mod render;

pub use prompts::{
    collect_profile, prompt_action, prompt_profile_form, prompt_yes_no, MenuAction, PathPrompt,
};
pub use render::{
    display_bmi, display_chart_saved, display_export_outcome, display_macros, display_nutrition,
    display_plan,
};
