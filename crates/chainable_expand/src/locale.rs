//! Locale resolution for diagnostics.
//!
//! Diagnostics come in two languages: Simplified Chinese is preferred when the
//! environment asks for it, English otherwise. The environment is read through
//! [`LocaleEnvironment`] on every resolution and never cached.

use std::env;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two diagnostic locales.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Locale {
    /// Fallback locale.
    #[default]
    English,
    /// Localized target locale.
    Chinese,
}

impl Locale {
    /// Returns the two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Chinese => "zh",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Read-only access to the locale hints of a process.
pub trait LocaleEnvironment {
    /// Preferred languages, most preferred first.
    fn preferred_languages(&self) -> Vec<String>;

    /// Value of the language variable, if set.
    fn language_variable(&self) -> Option<String>;
}

/// The real process environment.
///
/// `LANGUAGE` supplies the colon-separated preference list and `LANG` the
/// language variable.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl LocaleEnvironment for ProcessEnvironment {
    fn preferred_languages(&self) -> Vec<String> {
        env::var("LANGUAGE")
            .map(|value| {
                value
                    .split(':')
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn language_variable(&self) -> Option<String> {
        env::var("LANG").ok()
    }
}

/// A fixed environment, for hosts that know their locale hints up front.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticEnvironment {
    /// Preferred languages, most preferred first.
    pub preferred: Vec<String>,
    /// Language variable.
    pub language: Option<String>,
}

impl StaticEnvironment {
    /// Creates an environment with no hints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the preferred language list.
    #[must_use]
    pub fn with_preferred<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the language variable.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

impl LocaleEnvironment for StaticEnvironment {
    fn preferred_languages(&self) -> Vec<String> {
        self.preferred.clone()
    }

    fn language_variable(&self) -> Option<String> {
        self.language.clone()
    }
}

/// Chooses between `target` and English from the environment.
///
/// `target` wins when the first preferred language starts with its code, or
/// else when the language variable contains the code anywhere. Both checks
/// ignore ASCII case.
#[must_use]
pub fn resolve_locale(env: &impl LocaleEnvironment, target: Locale) -> Locale {
    let code = target.code();

    let first_matches = env
        .preferred_languages()
        .first()
        .and_then(|first| first.get(..code.len()))
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(code));
    if first_matches {
        return target;
    }

    let variable_matches = env
        .language_variable()
        .is_some_and(|value| value.to_ascii_lowercase().contains(code));
    if variable_matches {
        target
    } else {
        Locale::English
    }
}
