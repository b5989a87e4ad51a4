// ── Registration form ──
//
// Holds the three text inputs and turns them into a `NewWebsite`.
// Validation happens before any remote call: an empty url disables
// submission, a malformed email is rejected with the fields kept so the
// user can fix them. A submission that passes validation clears the form.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::model::NewWebsite;

/// Local part, `@`, then a bracketed IPv4 literal or a dotted domain
/// with an alphabetic TLD of at least two letters.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern compiles")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Which input has focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Url,
    Title,
    Email,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Url => Self::Title,
            Self::Title => Self::Email,
            Self::Email => Self::Url,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Url => Self::Email,
            Self::Title => Self::Url,
            Self::Email => Self::Title,
        }
    }
}

/// The registration inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub url: String,
    pub title: String,
    pub email: String,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Url => &self.url,
            FormField::Title => &self.title,
            FormField::Email => &self.email,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Url => &mut self.url,
            FormField::Title => &mut self.title,
            FormField::Email => &mut self.email,
        }
    }

    /// The submit control is enabled iff the url is non-empty.
    pub fn can_submit(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Check the inputs without touching them.
    pub fn validate(&self) -> Result<NewWebsite, CoreError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(CoreError::EmptyUrl);
        }

        let email = non_empty(&self.email);
        if let Some(email) = email {
            if !is_valid_email(email) {
                return Err(CoreError::InvalidEmail);
            }
        }

        Ok(NewWebsite {
            url: url.to_owned(),
            title: non_empty(&self.title).map(str::to_owned),
            email: email.map(str::to_owned),
        })
    }

    /// Validate and, on success, clear the form.
    ///
    /// Rejected input is left in place.
    pub fn take_submission(&mut self) -> Result<NewWebsite, CoreError> {
        let submission = self.validate()?;
        self.clear();
        Ok(submission)
    }

    pub fn clear(&mut self) {
        self.url.clear();
        self.title.clear();
        self.email.clear();
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
