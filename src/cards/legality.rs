use std::fmt;

use crate::utilities::string_manipulators::title_case;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Legality {
    Legal,
    NotLegal,
    Restricted,
    Banned,
    Other(String),
}

impl Legality {
    pub fn is_legal(&self) -> bool {
        matches!(self, Legality::Legal)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Legality::Legal => "legal",
            Legality::NotLegal => "not_legal",
            Legality::Restricted => "restricted",
            Legality::Banned => "banned",
            Legality::Other(raw) => raw,
        }
    }
}

impl From<&str> for Legality {
    fn from(value: &str) -> Self {
        match value {
            "legal" => Legality::Legal,
            "not_legal" => Legality::NotLegal,
            "restricted" => Legality::Restricted,
            "banned" => Legality::Banned,
            other => Legality::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Legality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", title_case(self.as_str()))
    }
}
