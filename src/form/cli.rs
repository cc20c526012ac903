use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use colored::Colorize;

use crate::app::{EventOutcome, FormApp, FormEvent};
use crate::config::Config;
use crate::form::{
    self, find_option, parse_leading_int, validate_start_date, CheckboxGroup, ChoiceOption,
    FieldId, FormControls, GENDER_OPTIONS, NOTICE_PERIOD_OPTIONS,
};
use crate::submit::Submitter;
use crate::view::{FormView, ViewState, SUBMITTING_LABEL};

/// Flags for a non-interactive submission.
#[derive(Debug, clap::Args)]
pub(crate) struct SubmitArgs {
    /// Applicant's full name
    #[arg(long)]
    full_name: String,

    /// Gender (value or label, see `apply-form options`)
    #[arg(long)]
    gender: String,

    /// Spoken language(s)
    #[arg(long)]
    language: String,

    #[arg(long)]
    email: String,

    /// Years of experience
    #[arg(long)]
    experience_years: String,

    /// Industry experience (repeatable)
    #[arg(long = "industry")]
    industries: Vec<String>,

    /// Computer skill (repeatable)
    #[arg(long = "skill")]
    skills: Vec<String>,

    /// Driver's license class
    #[arg(long)]
    driver_license: Option<String>,

    /// Personality trait: patient, assertive or casual (repeatable)
    #[arg(long = "personality")]
    personality: Vec<String>,

    /// Available start date (YYYY-MM-DD)
    #[arg(long)]
    start_date: String,

    /// Notice period (value or label, see `apply-form options`)
    #[arg(long)]
    notice_period: String,

    /// Resume / CV file
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Print the JSON payload instead of sending it
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

/// Interactive flow: prompt for every field, then submit.
pub(crate) fn run_application_flow(
    rt: &tokio::runtime::Runtime,
    config: &Config,
) -> Result<ExitCode> {
    let mut app = FormApp::from_config(config);

    println!();
    println!("{}", "Job Application".bright_cyan().bold());
    println!(
        "  {}",
        "Fields marked * are required. Press Enter to skip optional ones.".bright_black()
    );
    println!();

    prompt_required_text(rt, &mut app, FieldId::FullName)?;
    prompt_select(rt, &mut app, FieldId::Gender, GENDER_OPTIONS)?;
    prompt_required_text(rt, &mut app, FieldId::Language)?;
    prompt_required_text(rt, &mut app, FieldId::Email)?;
    prompt_experience_years(rt, &mut app)?;
    prompt_checkboxes(&mut app, CheckboxGroup::IndustryExperience)?;
    prompt_checkboxes(&mut app, CheckboxGroup::ComputerSkills)?;

    let license = prompt_line(&format!("{}: ", FieldId::DriverLicense.label()))?;
    app.controls_mut()
        .set_value(FieldId::DriverLicense, license.trim());

    prompt_checkboxes(&mut app, CheckboxGroup::Personality)?;
    prompt_start_date(rt, &mut app)?;
    prompt_select(rt, &mut app, FieldId::NoticePeriod, NOTICE_PERIOD_OPTIONS)?;
    prompt_resume(rt, &mut app)?;

    loop {
        println!();
        if !prompt_yes_no("Submit application? [Y/n]: ", true)? {
            println!("{}", "Cancelled. Nothing was sent.".bright_yellow());
            return Ok(ExitCode::SUCCESS);
        }

        println!("{}", SUBMITTING_LABEL.bright_cyan());
        let outcome = rt.block_on(app.handle(FormEvent::Submit))?;
        render_message(&app.view().snapshot());

        match outcome {
            EventOutcome::Submitted(Ok(())) => return Ok(ExitCode::SUCCESS),
            EventOutcome::Submitted(Err(err)) if err.is_oversize() => {
                println!("{}", "Pick a smaller file before trying again.".bright_yellow());
                prompt_resume(rt, &mut app)?;
            }
            _ => {
                println!("{}", "Your answers are kept; you can try again.".bright_black());
            }
        }
    }
}

/// Quick submit from flags.
pub(crate) fn run_quick_submit(
    rt: &tokio::runtime::Runtime,
    config: &Config,
    args: SubmitArgs,
) -> Result<ExitCode> {
    let dry_run = args.dry_run;
    let resume = args.resume.clone();
    let view = FormView::starting_today(config.form.success_hide_after());
    let controls = controls_from_args(args, view.start_date_min())?;

    let mut app = FormApp::new(controls, view, Submitter::from_config(config));
    if resume.is_some() {
        rt.block_on(app.handle(FormEvent::ResumeSelected(resume)))?;
    }

    if dry_run {
        let payload = rt
            .block_on(form::collect(app.controls()))
            .context("Failed to build application payload")?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", SUBMITTING_LABEL.bright_cyan());
    let outcome = rt.block_on(app.handle(FormEvent::Submit))?;
    render_message(&app.view().snapshot());

    Ok(match outcome {
        EventOutcome::Submitted(Ok(())) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn controls_from_args(args: SubmitArgs, start_date_min: NaiveDate) -> Result<FormControls> {
    let mut controls = FormControls::new();
    controls.set_value(FieldId::FullName, args.full_name.trim());
    controls.set_value(
        FieldId::Gender,
        select_value(GENDER_OPTIONS, &args.gender, FieldId::Gender)?,
    );
    controls.set_value(FieldId::Language, args.language.trim());
    controls.set_value(FieldId::Email, args.email.trim());
    controls.set_value(FieldId::ExperienceYears, args.experience_years.trim());
    controls.set_value(
        FieldId::DriverLicense,
        args.driver_license.as_deref().unwrap_or_default().trim(),
    );
    controls.set_value(FieldId::StartDate, args.start_date.trim());
    controls.set_value(
        FieldId::NoticePeriod,
        select_value(NOTICE_PERIOD_OPTIONS, &args.notice_period, FieldId::NoticePeriod)?,
    );

    for (group, values) in [
        (CheckboxGroup::IndustryExperience, &args.industries),
        (CheckboxGroup::ComputerSkills, &args.skills),
    ] {
        for value in values {
            let option = find_option(group.options(), value).with_context(|| {
                format!(
                    "Unknown {} '{}' (see `apply-form options`)",
                    group.label().to_lowercase(),
                    value
                )
            })?;
            controls.set_checked(group, option.value, true);
        }
    }

    // Unknown personality traits are dropped, matching the collector.
    for value in &args.personality {
        let value = value.trim().to_ascii_lowercase();
        if !controls.set_checked(CheckboxGroup::Personality, &value, true) {
            tracing::debug!(%value, "Ignoring unknown personality flag");
        }
    }

    let missing = controls.missing_required();
    if !missing.is_empty() {
        let names = missing
            .iter()
            .map(|f| f.label())
            .collect::<Vec<_>>()
            .join(", ");
        bail!("Missing required fields: {names}");
    }

    match parse_leading_int(&controls.experience_years) {
        Some(years) if years >= 0 => {}
        _ => bail!(
            "Invalid {} '{}'. Expected a whole number of years",
            FieldId::ExperienceYears.label(),
            controls.experience_years
        ),
    }

    if let Err(reason) = validate_start_date(&controls.start_date, start_date_min) {
        bail!("Invalid {}: {}", FieldId::StartDate.label(), reason);
    }

    Ok(controls)
}

fn select_value(options: &'static [ChoiceOption], input: &str, field: FieldId) -> Result<String> {
    match find_option(options, input) {
        Some(option) => Ok(option.value.to_string()),
        None => {
            let valid = options.iter().map(|o| o.value).collect::<Vec<_>>().join(", ");
            bail!("Invalid {} '{}'. Expected one of: {}", field.label(), input, valid)
        }
    }
}

/// Print every select and checkbox catalog.
pub(crate) fn print_options() {
    println!("{}", "Form options".bright_cyan().bold());
    for (title, options) in [
        (FieldId::Gender.label(), GENDER_OPTIONS),
        (FieldId::NoticePeriod.label(), NOTICE_PERIOD_OPTIONS),
    ] {
        print_catalog(title, options);
    }
    for group in CheckboxGroup::ALL {
        print_catalog(group.label(), group.options());
    }
}

fn print_catalog(title: &str, options: &[ChoiceOption]) {
    println!();
    println!("{}", title.bright_white().bold());
    for option in options {
        println!("  {:<28} {}", option.value.bright_yellow(), option.label);
    }
}

pub(crate) fn render_message(state: &ViewState) {
    let message = &state.message;
    if !message.visible {
        return;
    }
    println!();
    if message.success_visible {
        println!(
            "{}",
            "✓ Application submitted. Thank you, we will be in touch!".bright_green()
        );
    }
    if message.error_visible {
        println!("{} {}", "✗".bright_red(), message.error_text.bright_red());
    }
}

fn prompt_required_text(
    rt: &tokio::runtime::Runtime,
    app: &mut FormApp,
    field: FieldId,
) -> Result<()> {
    loop {
        let input = prompt_line(&format!("{} *: ", field.label()))?;
        app.controls_mut().set_value(field, input.trim());
        if !blur_flags_field(rt, app, field)? {
            return Ok(());
        }
        println!("{}", format!("{} is required.", field.label()).bright_yellow());
    }
}

fn prompt_experience_years(rt: &tokio::runtime::Runtime, app: &mut FormApp) -> Result<()> {
    let field = FieldId::ExperienceYears;
    loop {
        let input = prompt_line(&format!("{} *: ", field.label()))?;
        app.controls_mut().set_value(field, input.trim());
        if blur_flags_field(rt, app, field)? {
            println!("{}", format!("{} is required.", field.label()).bright_yellow());
            continue;
        }
        match parse_leading_int(&input) {
            Some(years) if years >= 0 => return Ok(()),
            _ => println!("{}", "Please enter a whole number of years.".bright_yellow()),
        }
    }
}

fn prompt_start_date(rt: &tokio::runtime::Runtime, app: &mut FormApp) -> Result<()> {
    let field = FieldId::StartDate;
    let min = app.view().start_date_min();
    loop {
        let input = prompt_line(&format!(
            "{} * (YYYY-MM-DD, from {}): ",
            field.label(),
            min.format("%Y-%m-%d")
        ))?;
        app.controls_mut().set_value(field, input.trim());
        if blur_flags_field(rt, app, field)? {
            println!("{}", format!("{} is required.", field.label()).bright_yellow());
            continue;
        }
        match validate_start_date(&input, min) {
            Ok(_) => return Ok(()),
            Err(reason) => println!("{}", reason.bright_yellow()),
        }
    }
}

fn prompt_select(
    rt: &tokio::runtime::Runtime,
    app: &mut FormApp,
    field: FieldId,
    options: &[ChoiceOption],
) -> Result<()> {
    let labels = options.iter().map(|o| o.label.to_string()).collect::<Vec<_>>();
    let index = prompt_choice(&format!("{} *:", field.label()), &labels)?;
    app.controls_mut().set_value(field, options[index].value);
    blur_flags_field(rt, app, field)?;
    Ok(())
}

fn prompt_checkboxes(app: &mut FormApp, group: CheckboxGroup) -> Result<()> {
    let options = group.options();
    loop {
        println!("{}", format!("{}:", group.label()).bright_white());
        for (i, option) in options.iter().enumerate() {
            println!("  {} {}", format!("{:>2}.", i + 1).bright_black(), option.label);
        }
        let input = prompt_line(&format!(
            "{} ",
            "Numbers separated by commas (Enter for none):".bright_yellow()
        ))?;

        match parse_selection(&input, options.len()) {
            Some(indices) => {
                for index in indices {
                    app.controls_mut()
                        .set_checked(group, options[index].value, true);
                }
                return Ok(());
            }
            None => println!("{}", "Invalid choice. Try again.".bright_red()),
        }
    }
}

fn prompt_resume(rt: &tokio::runtime::Runtime, app: &mut FormApp) -> Result<()> {
    loop {
        let input = prompt_line(&format!(
            "{} ",
            "Resume / CV file path (Enter to skip):".bright_white()
        ))?;
        let trimmed = input.trim();
        let path = (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));

        match rt.block_on(app.handle(FormEvent::ResumeSelected(path))) {
            Ok(_) => {
                let label = app.view().snapshot().resume_label;
                if label.selected {
                    println!("  {}", label.text.bright_green());
                }
                return Ok(());
            }
            Err(err) => println!("{}", format!("{err:#}").bright_red()),
        }
    }
}

/// Dispatch the blur event for `field`; true when the view flagged it as missing.
fn blur_flags_field(
    rt: &tokio::runtime::Runtime,
    app: &mut FormApp,
    field: FieldId,
) -> Result<bool> {
    rt.block_on(app.handle(FormEvent::FieldBlurred(field)))?;
    Ok(app.view().snapshot().highlighted.contains(&field))
}

/// Parse `"1, 3"` into zero-based indices. Empty input selects nothing.
fn parse_selection(input: &str, len: usize) -> Option<Vec<usize>> {
    let mut indices = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let n = part.parse::<usize>().ok()?;
        if n == 0 || n > len {
            return None;
        }
        if !indices.contains(&(n - 1)) {
            indices.push(n - 1);
        }
    }
    Some(indices)
}

fn prompt_choice(prompt: &str, options: &[String]) -> Result<usize> {
    loop {
        println!("{}", prompt.bright_white());
        for (i, opt) in options.iter().enumerate() {
            println!("  {} {}", format!("{:>2}.", i + 1).bright_black(), opt);
        }
        let input = prompt_line(&format!("{} ", "Enter a number:".bright_yellow()))?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            println!("{}", "Please enter a number.".bright_yellow());
            continue;
        }
        if let Ok(n) = trimmed.parse::<usize>() {
            if n >= 1 && n <= options.len() {
                return Ok(n - 1);
            }
        }
        println!("{}", "Invalid choice. Try again.".bright_red());
        println!();
    }
}

fn prompt_yes_no(prompt: &str, default_yes: bool) -> Result<bool> {
    loop {
        let input = prompt_line(prompt)?.trim().to_ascii_lowercase();
        if input.is_empty() {
            return Ok(default_yes);
        }
        match input.as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("{}", "Please answer y or n.".bright_yellow()),
        }
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    let read = io::stdin().read_line(&mut input)?;
    if read == 0 {
        bail!("Input closed before the application was complete");
    }
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
