//! Application payload
//!
//! Data structure posted to the webhook for one application.

use serde::Serialize;

/// One application, built fresh from the form on every submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationPayload {
    pub full_name: String,
    pub gender: String,
    pub language: String,
    pub email: String,
    /// `None` when the field does not start with an integer (serialized as `null`)
    pub experience_years: Option<i64>,
    pub industry_experience: Vec<String>,
    pub computer_skills: Vec<String>,
    pub driver_license: String,
    /// Base64 body of the resume data URL, empty when no file was attached
    pub resume_base64: String,
    pub application_answers: ApplicationAnswers,
    pub personality: Personality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationAnswers {
    pub available_start: String,
    pub notice_period: String,
}

/// Fixed-shape personality record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Personality {
    pub patient: bool,
    pub assertive: bool,
    pub casual: bool,
}

impl Personality {
    /// Build from checked personality values. Unknown values are skipped.
    pub fn from_checked<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut personality = Personality::default();
        for value in values {
            if !personality.set(value) {
                tracing::debug!(value, "Ignoring unknown personality value");
            }
        }
        personality
    }

    /// Flip the named flag on. Returns false for an unknown name.
    fn set(&mut self, name: &str) -> bool {
        match name {
            "patient" => self.patient = true,
            "assertive" => self.assertive = true,
            "casual" => self.casual = true,
            _ => return false,
        }
        true
    }
}
