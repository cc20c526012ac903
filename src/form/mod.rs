//! Application form controls.
//!
//! `FormControls` mirrors what an applicant can edit: free text fields, two
//! selects, three checkbox groups and the resume input. It holds raw control
//! state only; turning it into a payload is the collector's job.

use chrono::NaiveDate;

use crate::resume::ResumeFile;

pub(crate) mod cli;
mod collect;

pub(crate) use collect::{collect, parse_leading_int};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum FieldId {
    FullName,
    Gender,
    Language,
    Email,
    ExperienceYears,
    DriverLicense,
    StartDate,
    NoticePeriod,
}

impl FieldId {
    pub(crate) fn label(self) -> &'static str {
        match self {
            FieldId::FullName => "Full name",
            FieldId::Gender => "Gender",
            FieldId::Language => "Spoken language(s)",
            FieldId::Email => "Email",
            FieldId::ExperienceYears => "Years of experience",
            FieldId::DriverLicense => "Driver's license",
            FieldId::StartDate => "Available start date",
            FieldId::NoticePeriod => "Notice period",
        }
    }

    pub(crate) fn is_required(self) -> bool {
        !matches!(self, FieldId::DriverLicense)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CheckboxGroup {
    IndustryExperience,
    ComputerSkills,
    Personality,
}

impl CheckboxGroup {
    pub(crate) const ALL: [CheckboxGroup; 3] = [
        CheckboxGroup::IndustryExperience,
        CheckboxGroup::ComputerSkills,
        CheckboxGroup::Personality,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            CheckboxGroup::IndustryExperience => "Industry experience",
            CheckboxGroup::ComputerSkills => "Computer skills",
            CheckboxGroup::Personality => "Personality",
        }
    }

    pub(crate) fn options(self) -> &'static [ChoiceOption] {
        match self {
            CheckboxGroup::IndustryExperience => INDUSTRY_OPTIONS,
            CheckboxGroup::ComputerSkills => COMPUTER_SKILL_OPTIONS,
            CheckboxGroup::Personality => PERSONALITY_OPTIONS,
        }
    }
}

/// A value/label pair shared by selects and checkbox groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChoiceOption {
    pub(crate) value: &'static str,
    pub(crate) label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { value, label }
}

pub(crate) const GENDER_OPTIONS: &[ChoiceOption] = &[
    opt("male", "Male"),
    opt("female", "Female"),
    opt("other", "Other"),
    opt("prefer_not_to_say", "Prefer not to say"),
];

pub(crate) const NOTICE_PERIOD_OPTIONS: &[ChoiceOption] = &[
    opt("immediately", "Immediately"),
    opt("1_week", "1 week"),
    opt("2_weeks", "2 weeks"),
    opt("1_month", "1 month"),
    opt("more_than_1_month", "More than 1 month"),
];

pub(crate) const INDUSTRY_OPTIONS: &[ChoiceOption] = &[
    opt("residential_construction", "Residential construction"),
    opt("commercial_construction", "Commercial construction"),
    opt("renovation", "Renovation & remodeling"),
    opt("civil_engineering", "Civil engineering"),
    opt("real_estate", "Real estate"),
    opt("property_management", "Property management"),
];

pub(crate) const COMPUTER_SKILL_OPTIONS: &[ChoiceOption] = &[
    opt("microsoft_office", "Microsoft Office"),
    opt("excel", "Excel (advanced)"),
    opt("google_workspace", "Google Workspace"),
    opt("autocad", "AutoCAD"),
    opt("procore", "Procore"),
    opt("quickbooks", "QuickBooks"),
    opt("crm", "CRM software"),
];

pub(crate) const PERSONALITY_OPTIONS: &[ChoiceOption] = &[
    opt("patient", "Patient"),
    opt("assertive", "Assertive"),
    opt("casual", "Casual"),
];

/// Find a catalog entry by value or label, case-insensitively.
pub(crate) fn find_option(
    options: &'static [ChoiceOption],
    needle: &str,
) -> Option<&'static ChoiceOption> {
    let needle = needle.trim();
    options
        .iter()
        .find(|o| o.value.eq_ignore_ascii_case(needle) || o.label.eq_ignore_ascii_case(needle))
}

/// One checkbox control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Checkbox {
    pub(crate) group: CheckboxGroup,
    pub(crate) value: String,
    pub(crate) checked: bool,
}

/// Current state of every control on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormControls {
    pub(crate) full_name: String,
    pub(crate) gender: String,
    pub(crate) language: String,
    pub(crate) email: String,
    /// Raw number-input text
    pub(crate) experience_years: String,
    pub(crate) driver_license: Option<String>,
    /// `YYYY-MM-DD`, as a date input reports it
    pub(crate) start_date: String,
    pub(crate) notice_period: String,
    pub(crate) checkboxes: Vec<Checkbox>,
    pub(crate) resume: Option<ResumeFile>,
}

impl FormControls {
    /// A blank form: empty text, every catalog checkbox unchecked, no file.
    pub(crate) fn new() -> Self {
        let checkboxes = CheckboxGroup::ALL
            .iter()
            .flat_map(|group| {
                group.options().iter().map(move |o| Checkbox {
                    group: *group,
                    value: o.value.to_string(),
                    checked: false,
                })
            })
            .collect();

        Self {
            full_name: String::new(),
            gender: String::new(),
            language: String::new(),
            email: String::new(),
            experience_years: String::new(),
            driver_license: None,
            start_date: String::new(),
            notice_period: String::new(),
            checkboxes,
            resume: None,
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// Check or uncheck the box with `value` in `group`. Returns false if no such box exists.
    pub(crate) fn set_checked(&mut self, group: CheckboxGroup, value: &str, checked: bool) -> bool {
        match self
            .checkboxes
            .iter_mut()
            .find(|c| c.group == group && c.value == value)
        {
            Some(checkbox) => {
                checkbox.checked = checked;
                true
            }
            None => false,
        }
    }

    pub(crate) fn value_of(&self, field: FieldId) -> &str {
        match field {
            FieldId::FullName => &self.full_name,
            FieldId::Gender => &self.gender,
            FieldId::Language => &self.language,
            FieldId::Email => &self.email,
            FieldId::ExperienceYears => &self.experience_years,
            FieldId::DriverLicense => self.driver_license.as_deref().unwrap_or_default(),
            FieldId::StartDate => &self.start_date,
            FieldId::NoticePeriod => &self.notice_period,
        }
    }

    pub(crate) fn set_value(&mut self, field: FieldId, value: impl Into<String>) {
        let value = value.into();
        match field {
            FieldId::FullName => self.full_name = value,
            FieldId::Gender => self.gender = value,
            FieldId::Language => self.language = value,
            FieldId::Email => self.email = value,
            FieldId::ExperienceYears => self.experience_years = value,
            FieldId::DriverLicense => {
                self.driver_license = (!value.is_empty()).then_some(value);
            }
            FieldId::StartDate => self.start_date = value,
            FieldId::NoticePeriod => self.notice_period = value,
        }
    }

    /// Required fields that are still empty. Whitespace counts as a value.
    pub(crate) fn missing_required(&self) -> Vec<FieldId> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| self.value_of(*field).is_empty())
            .collect()
    }
}

impl Default for FormControls {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) const REQUIRED_FIELDS: [FieldId; 7] = [
    FieldId::FullName,
    FieldId::Gender,
    FieldId::Language,
    FieldId::Email,
    FieldId::ExperienceYears,
    FieldId::StartDate,
    FieldId::NoticePeriod,
];

/// Accept a `YYYY-MM-DD` start date that is not before `min`.
pub(crate) fn validate_start_date(value: &str, min: NaiveDate) -> Result<NaiveDate, String> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| "Use the YYYY-MM-DD format".to_string())?;
    if date < min {
        return Err(format!("Start date must be on or after {}", min.format("%Y-%m-%d")));
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_form_has_all_catalog_boxes_unchecked() {
        let form = FormControls::new();
        let expected =
            INDUSTRY_OPTIONS.len() + COMPUTER_SKILL_OPTIONS.len() + PERSONALITY_OPTIONS.len();
        assert_eq!(form.checkboxes.len(), expected);
        assert!(form.checkboxes.iter().all(|c| !c.checked));
        assert!(form.resume.is_none());
        assert_eq!(form.missing_required().len(), REQUIRED_FIELDS.len());
    }

    #[test]
    fn test_set_checked_unknown_box() {
        let mut form = FormControls::new();
        assert!(form.set_checked(CheckboxGroup::ComputerSkills, "excel", true));
        assert!(!form.set_checked(CheckboxGroup::ComputerSkills, "cobol", true));
        assert!(!form.set_checked(CheckboxGroup::Personality, "excel", true));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = FormControls::new();
        form.set_value(FieldId::FullName, "Ada");
        form.set_value(FieldId::DriverLicense, "B");
        form.set_checked(CheckboxGroup::Personality, "casual", true);

        form.reset();
        assert_eq!(form, FormControls::new());
    }

    #[test]
    fn test_driver_license_empty_means_absent() {
        let mut form = FormControls::new();
        form.set_value(FieldId::DriverLicense, "");
        assert_eq!(form.driver_license, None);
        assert_eq!(form.value_of(FieldId::DriverLicense), "");
    }

    #[test]
    fn test_missing_required_ignores_optional_fields() {
        let mut form = FormControls::new();
        for field in REQUIRED_FIELDS {
            form.set_value(field, "x");
        }
        form.set_value(FieldId::Email, "");
        form.set_value(FieldId::Language, "   ");
        assert_eq!(form.missing_required(), vec![FieldId::Email]);
    }

    #[test]
    fn test_find_option_by_value_or_label() {
        assert_eq!(find_option(GENDER_OPTIONS, "Female").unwrap().value, "female");
        assert_eq!(find_option(NOTICE_PERIOD_OPTIONS, "2_WEEKS").unwrap().value, "2_weeks");
        assert!(find_option(GENDER_OPTIONS, "robot").is_none());
    }

    #[test]
    fn test_validate_start_date() {
        let min = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(validate_start_date("2026-10-19", min).is_ok());
        assert!(validate_start_date("2026-12-01", min).is_ok());
        assert!(validate_start_date("2026-10-18", min).is_err());
        assert!(validate_start_date("19/10/2026", min).is_err());
    }
}
