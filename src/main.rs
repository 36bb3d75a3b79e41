use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use diet_buddy_rs::charts::{build_bmi_chart, build_macro_chart, render_png, Chart};
use diet_buddy_rs::cli::{Cli, Command, ProfileArgs};
use diet_buddy_rs::config::{AppConfig, API_KEY_ENV};
use diet_buddy_rs::error::{DietError, Result};
use diet_buddy_rs::generator::GeminiClient;
use diet_buddy_rs::health::MacroSplit;
use diet_buddy_rs::interface::{
    collect_profile, display_bmi, display_chart_saved, display_export_outcome, display_macros,
    display_nutrition, display_plan, prompt_action, MenuAction, PathPrompt,
};
use diet_buddy_rs::models::{validate_profile, UserProfile};
use diet_buddy_rs::nutrition::{extract, EMPTY_TABLE_MESSAGE};
use diet_buddy_rs::report::export_report;
use diet_buddy_rs::state::{load_plan, save_nutrition_csv, save_plan, AppState};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout only carries plan text and tables.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("diet_buddy_rs={level},diet_buddy={level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let cache_dir = config.ensure_cache_dir()?;

    match cli.command.unwrap_or_default() {
        Command::Interactive => cmd_interactive(&config, &cache_dir).await,
        Command::Generate {
            profile,
            output,
            pdf,
            csv,
        } => cmd_generate(&config, profile, output, pdf, csv).await,
        Command::Bmi {
            weight,
            height,
            chart,
        } => cmd_bmi(weight, height, chart.as_deref()),
        Command::Macros {
            calories,
            carbs,
            protein,
            fat,
            chart,
        } => cmd_macros(
            MacroSplit::new(calories, carbs, protein, fat)?,
            chart.as_deref(),
        ),
        Command::Extract { input, csv, json } => cmd_extract(&input, csv.as_deref(), json),
    }
}

/// Fill in a profile, then loop over the action menu until Quit.
async fn cmd_interactive(config: &AppConfig, cache_dir: &Path) -> Result<()> {
    let client = Arc::new(GeminiClient::new(config)?);
    let mut state = AppState::new();

    println!("Diet Buddy - AI Nutrition Assistant");
    if config.require_api_key().is_err() {
        println!("Note: {} is not set; diet generation will fail until it is.", API_KEY_ENV);
    }
    println!();

    match collect_profile(None)? {
        Some(profile) => state.set_profile(profile),
        None => {
            println!("No profile entered.");
            return Ok(());
        }
    }

    loop {
        println!();
        match prompt_action()? {
            MenuAction::GenerateDiet => {
                let Some(profile) = state.profile().cloned() else {
                    println!("Please fill in your profile first");
                    continue;
                };
                if generate_with_spinner(&mut state, &client, profile).await {
                    display_plan(state.plan());
                    display_nutrition(state.nutrition());
                }
            }
            MenuAction::ShowBmiChart => {
                let Some(chart) = state.bmi_chart() else {
                    println!("Please fill in your profile first");
                    continue;
                };
                display_bmi(&chart.result);
                show_chart(Chart::from(chart), cache_dir);
            }
            MenuAction::ShowMacroChart => {
                let chart = state.macro_chart();
                display_macros(&chart);
                show_chart(Chart::from(chart), cache_dir);
            }
            MenuAction::SavePdf => save_pdf(&state),
            MenuAction::ViewPlan => display_plan(state.plan()),
            MenuAction::ViewNutrition => display_nutrition(state.nutrition()),
            MenuAction::SaveNutritionCsv => save_nutrition(&state)?,
            MenuAction::EditProfile => {
                if let Some(profile) = collect_profile(state.profile())? {
                    state.set_profile(profile);
                    println!("Profile updated.");
                }
            }
            MenuAction::Quit => break,
        }
    }

    Ok(())
}

/// Generate one plan for the given profile and print it, with optional file outputs.
async fn cmd_generate(
    config: &AppConfig,
    args: ProfileArgs,
    output: Option<PathBuf>,
    pdf: Option<PathBuf>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let profile = validate_profile(&args.into())?;
    let client = Arc::new(GeminiClient::new(config)?);
    let mut state = AppState::new();
    state.set_profile(profile.clone());

    if !generate_with_spinner(&mut state, &client, profile.clone()).await {
        return Ok(());
    }
    let Some(plan) = state.plan() else {
        return Ok(());
    };

    display_plan(Some(plan));
    display_nutrition(state.nutrition());

    if plan.is_error() {
        warn!("Plan generation failed; skipping file outputs");
        return Ok(());
    }

    if let Some(path) = output {
        save_plan(&path, plan)?;
        println!("Plan saved to {}", path.display());
    }

    if let Some(path) = csv {
        save_nutrition_csv(&path, state.nutrition())?;
        println!("Nutrition table saved to {}", path.display());
    }

    if let Some(path) = pdf {
        let bmi_chart = build_bmi_chart(profile.weight, profile.height);
        let mut destination = Some(path);
        let mut picker = move || -> Result<Option<PathBuf>> { Ok(destination.take()) };
        let outcome = export_report(
            &profile,
            plan,
            &bmi_chart,
            &state.macro_chart(),
            &mut picker,
        )?;
        display_export_outcome(&outcome);
    }

    Ok(())
}

fn cmd_bmi(weight: f64, height: f64, chart_path: Option<&Path>) -> Result<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(DietError::validation("Please enter a valid weight"));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(DietError::validation("Please enter a valid height"));
    }

    let chart = build_bmi_chart(weight, height);
    display_bmi(&chart.result);

    if let Some(path) = chart_path {
        render_png(&Chart::from(chart), path)?;
        display_chart_saved(path);
    }
    Ok(())
}

fn cmd_macros(split: MacroSplit, chart_path: Option<&Path>) -> Result<()> {
    let chart = build_macro_chart(&split);
    display_macros(&chart);

    if let Some(path) = chart_path {
        render_png(&Chart::from(chart), path)?;
        display_chart_saved(path);
    }
    Ok(())
}

/// Run the extractor over a saved plan.
fn cmd_extract(input: &Path, csv: Option<&Path>, json: bool) -> Result<()> {
    let plan = load_plan(input)?;
    let table = extract(plan.text());
    info!(days = table.len(), meals = table.meal_count(), "Extracted nutrition");

    if let Some(path) = csv {
        save_nutrition_csv(path, &table)?;
        println!("Nutrition table saved to {}", path.display());
    } else if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        display_nutrition(&table);
    }
    Ok(())
}

/// Run one generation request behind a spinner. Ctrl-C abandons it.
///
/// Returns whether a plan was applied to the state.
async fn generate_with_spinner(
    state: &mut AppState,
    client: &Arc<GeminiClient>,
    profile: UserProfile,
) -> bool {
    let pending = state.start_generation(Arc::clone(client), profile);
    let spinner = spinner("Generating diet plan... (Ctrl-C to cancel)");

    let finished = tokio::select! {
        result = pending.wait() => result,
        _ = tokio::signal::ctrl_c() => None,
    };
    spinner.finish_and_clear();

    match finished {
        Some((id, plan)) => state.apply_plan(id, plan),
        None => {
            state.cancel_generation();
            println!("Generation canceled.");
            false
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Render a chart into the cache directory and print where it went.
fn show_chart(chart: Chart, cache_dir: &Path) {
    let path = cache_dir.join(chart.file_name());
    match render_png(&chart, &path) {
        Ok(()) => display_chart_saved(&path),
        Err(e) => println!("Failed to show {}: {}", chart.title(), e),
    }
}

fn save_pdf(state: &AppState) {
    let (Some(profile), Some(plan), Some(bmi_chart)) =
        (state.profile(), state.plan(), state.bmi_chart())
    else {
        println!("Please generate a diet plan first");
        return;
    };

    let mut picker = PathPrompt::for_report(&profile.name);
    match export_report(profile, plan, &bmi_chart, &state.macro_chart(), &mut picker) {
        Ok(outcome) => display_export_outcome(&outcome),
        Err(e) => println!("Failed to generate PDF: {}", e),
    }
}

fn save_nutrition(state: &AppState) -> Result<()> {
    if state.nutrition().is_empty() {
        println!("{}", EMPTY_TABLE_MESSAGE);
        return Ok(());
    }

    let prompt = PathPrompt::new("Save nutrition CSV as (empty to cancel)");
    let Some(path) = prompt.ask()? else {
        println!("Export canceled.");
        return Ok(());
    };

    match save_nutrition_csv(&path, state.nutrition()) {
        Ok(()) => println!("Nutrition table saved to {}", path.display()),
        Err(e) => println!("Failed to save CSV: {}", e),
    }
    Ok(())
}
