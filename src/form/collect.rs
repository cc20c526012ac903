//! Form collector: reads the current controls into an `ApplicationPayload`.

use super::{Checkbox, CheckboxGroup, FormControls};
use crate::payload::{ApplicationAnswers, ApplicationPayload, Personality};
use crate::resume::ResumeError;

/// Values of the checked boxes matching `predicate`, in form order, without duplicates.
pub(crate) fn checked_values<P>(checkboxes: &[Checkbox], predicate: P) -> Vec<String>
where
    P: Fn(&Checkbox) -> bool,
{
    let mut values: Vec<String> = Vec::new();
    for checkbox in checkboxes.iter().filter(|c| c.checked && predicate(*c)) {
        if !values.contains(&checkbox.value) {
            values.push(checkbox.value.clone());
        }
    }
    values
}

fn checked_in(controls: &FormControls, group: CheckboxGroup) -> Vec<String> {
    checked_values(&controls.checkboxes, |c| c.group == group)
}

/// Integer prefix of `value`, the way a lenient number parser reads it.
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit. Returns `None` when no digit is found or the number overflows.
pub(crate) fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Build the payload for the current form.
///
/// The resume, if any, is read and encoded here; a read failure aborts collection.
pub(crate) async fn collect(controls: &FormControls) -> Result<ApplicationPayload, ResumeError> {
    let personality_values = checked_in(controls, CheckboxGroup::Personality);
    let personality = Personality::from_checked(personality_values.iter().map(String::as_str));

    let resume_base64 = match &controls.resume {
        Some(file) => file.to_base64().await?,
        None => String::new(),
    };

    Ok(ApplicationPayload {
        full_name: controls.full_name.clone(),
        gender: controls.gender.clone(),
        language: controls.language.clone(),
        email: controls.email.clone(),
        experience_years: parse_leading_int(&controls.experience_years),
        industry_experience: checked_in(controls, CheckboxGroup::IndustryExperience),
        computer_skills: checked_in(controls, CheckboxGroup::ComputerSkills),
        driver_license: controls.driver_license.clone().unwrap_or_default(),
        resume_base64,
        application_answers: ApplicationAnswers {
            available_start: controls.start_date.clone(),
            notice_period: controls.notice_period.clone(),
        },
        personality,
    })
}
