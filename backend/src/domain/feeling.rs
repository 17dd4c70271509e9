//! Closed set of moods a journal entry can be tagged with.

use std::fmt;
use std::str::FromStr;

/// Error returned when a feeling label is not one of [`Feeling::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported feeling: {0}")]
pub struct UnsupportedFeeling(pub String);

/// Mood selected by the author.
///
/// Parsing is case-insensitive and ignores surrounding whitespace. The
/// canonical spelling is the capitalised label used by the journaling client.
///
/// # Examples
/// ```
/// use unbothered_backend::domain::Feeling;
///
/// let feeling: Feeling = " grateful ".parse().expect("known feeling");
/// assert_eq!(feeling, Feeling::Grateful);
/// assert_eq!(feeling.to_string(), "Grateful");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feeling {
    Happy,
    Sad,
    Angry,
    Anxious,
    Tired,
    Grateful,
    Stressed,
    Motivated,
    Miserable,
}

impl Feeling {
    /// Every supported feeling, in the order the client lists them.
    pub const ALL: [Feeling; 9] = [
        Feeling::Happy,
        Feeling::Sad,
        Feeling::Angry,
        Feeling::Anxious,
        Feeling::Tired,
        Feeling::Grateful,
        Feeling::Stressed,
        Feeling::Motivated,
        Feeling::Miserable,
    ];

    /// Canonical label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Feeling::Happy => "Happy",
            Feeling::Sad => "Sad",
            Feeling::Angry => "Angry",
            Feeling::Anxious => "Anxious",
            Feeling::Tired => "Tired",
            Feeling::Grateful => "Grateful",
            Feeling::Stressed => "Stressed",
            Feeling::Motivated => "Motivated",
            Feeling::Miserable => "Miserable",
        }
    }
}

impl FromStr for Feeling {
    type Err = UnsupportedFeeling;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Feeling::ALL
            .into_iter()
            .find(|feeling| feeling.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnsupportedFeeling(needle.to_owned()))
    }
}

impl fmt::Display for Feeling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Feeling {
    type Error = UnsupportedFeeling;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Feeling> for String {
    fn from(value: Feeling) -> Self {
        value.as_str().to_owned()
    }
}
