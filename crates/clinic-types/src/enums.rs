//! Clinic enumeration types.
//!
//! This module provides enum representations for coded patient fields.

/// Patient gender marker.
///
/// Recorded as a single-letter code (`M`, `F`, `O`) in both the state
/// document and the CSV mirror.
///
/// # Examples
///
/// ```
/// use clinic_types::Gender;
///
/// let gender = Gender::from_code('F');
/// assert_eq!(gender, Some(Gender::Female));
/// assert_eq!(Gender::Female.as_code(), 'F');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gender {
    /// Male.
    #[cfg_attr(feature = "serde", serde(rename = "M"))]
    Male,
    /// Female.
    #[cfg_attr(feature = "serde", serde(rename = "F"))]
    Female,
    /// Other or undisclosed.
    #[cfg_attr(feature = "serde", serde(rename = "O"))]
    Other,
}

impl Gender {
    /// Code letter for male.
    pub const MALE_CODE: char = 'M';
    /// Code letter for female.
    pub const FEMALE_CODE: char = 'F';
    /// Code letter for other/undisclosed.
    pub const OTHER_CODE: char = 'O';

    /// Creates a Gender from its code letter, case-insensitively.
    ///
    /// Returns `None` if the letter doesn't match a known code.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            Self::MALE_CODE => Some(Self::Male),
            Self::FEMALE_CODE => Some(Self::Female),
            Self::OTHER_CODE => Some(Self::Other),
            _ => None,
        }
    }

    /// Parses a Gender from text such as a CSV field or menu answer.
    ///
    /// Accepts exactly one code letter after trimming; returns `None`
    /// for anything else.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_code(code),
            _ => None,
        }
    }

    /// Returns the code letter for this gender.
    pub fn as_code(self) -> char {
        match self {
            Self::Male => Self::MALE_CODE,
            Self::Female => Self::FEMALE_CODE,
            Self::Other => Self::OTHER_CODE,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}
