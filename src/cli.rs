use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::health::{DEFAULT_CALORIES, DEFAULT_CARBS_PCT, DEFAULT_FAT_PCT, DEFAULT_PROTEIN_PCT};
use crate::models::ProfileForm;

/// Diet Buddy: personalised diet plans, BMI and macro charts, PDF reports.
#[derive(Parser, Debug)]
#[command(name = "diet-buddy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a JSON config file (defaults to diet_buddy.json when present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fill in a profile and work with it from a menu.
    Interactive,

    /// Generate a 7-day plan for a profile and print it.
    Generate {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Also save the plan text to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also export a PDF report to this file.
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Also save the nutrition table as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Print BMI and its classification.
    Bmi {
        /// Weight in kg.
        #[arg(long)]
        weight: f64,

        /// Height in cm.
        #[arg(long)]
        height: f64,

        /// Render the BMI chart to this PNG file.
        #[arg(long)]
        chart: Option<PathBuf>,
    },

    /// Print gram targets for a calorie budget and macro split.
    Macros {
        #[arg(long, default_value_t = DEFAULT_CALORIES)]
        calories: f64,

        /// Percent of calories from carbohydrates.
        #[arg(long, default_value_t = DEFAULT_CARBS_PCT)]
        carbs: f64,

        /// Percent of calories from protein.
        #[arg(long, default_value_t = DEFAULT_PROTEIN_PCT)]
        protein: f64,

        /// Percent of calories from fat.
        #[arg(long, default_value_t = DEFAULT_FAT_PCT)]
        fat: f64,

        /// Render the macro chart to this PNG file.
        #[arg(long)]
        chart: Option<PathBuf>,
    },

    /// Pull per-meal nutrition out of a saved plan.
    Extract {
        /// Plan text file.
        #[arg(short, long)]
        input: PathBuf,

        /// Save the table as CSV instead of printing it.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the table as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Interactive
    }
}

/// Profile fields as given on the command line. Validated like the form.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub age: String,

    #[arg(long, default_value = "male")]
    pub gender: String,

    /// Weight in kg.
    #[arg(long)]
    pub weight: String,

    /// Height in cm.
    #[arg(long)]
    pub height: String,

    /// easy, moderate or hardcore.
    #[arg(long, default_value = "moderate")]
    pub intensity: String,

    /// sedentary, light, moderate, active or "very active".
    #[arg(long, default_value = "moderate")]
    pub activity: String,

    /// vegetarian, non-vegetarian or vegan.
    #[arg(long = "diet-type", default_value = "vegetarian")]
    pub diet_type: String,
}

impl From<ProfileArgs> for ProfileForm {
    fn from(args: ProfileArgs) -> Self {
        ProfileForm {
            name: args.name,
            age: args.age,
            gender: args.gender,
            weight: args.weight,
            height: args.height,
            diet_intensity: args.intensity,
            activity_level: args.activity,
            diet_type: args.diet_type,
        }
    }
}
