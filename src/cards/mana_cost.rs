use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "W" => Some(Color::White),
            "U" => Some(Color::Blue),
            "B" => Some(Color::Black),
            "R" => Some(Color::Red),
            "G" => Some(Color::Green),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }
}

/// One bracketed token of a mana cost, rendered as an icon by the screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManaSymbol {
    Generic(u32),
    Variable(char),
    Colored(Color),
    Colorless,
    Snow,
    Hybrid(Color, Color),
    /// `{2/W}`: two generic or one coloured.
    TwoHybrid(Color),
    Phyrexian(Color),
    Other(String),
}

impl ManaSymbol {
    fn classify(code: &str) -> Self {
        let upper = code.to_uppercase();
        if upper.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(amount) = upper.parse() {
                return ManaSymbol::Generic(amount);
            }
        }
        if let Some(color) = Color::from_code(&upper) {
            return ManaSymbol::Colored(color);
        }
        match upper.as_str() {
            "X" | "Y" | "Z" => return ManaSymbol::Variable(upper.chars().next().unwrap_or('X')),
            "C" => return ManaSymbol::Colorless,
            "S" => return ManaSymbol::Snow,
            _ => {}
        }

        let parts: Vec<&str> = upper.split('/').collect();
        match parts.as_slice() {
            [left, "P"] => Color::from_code(left)
                .map(ManaSymbol::Phyrexian)
                .unwrap_or_else(|| ManaSymbol::Other(code.to_string())),
            ["2", right] => Color::from_code(right)
                .map(ManaSymbol::TwoHybrid)
                .unwrap_or_else(|| ManaSymbol::Other(code.to_string())),
            [left, right] => match (Color::from_code(left), Color::from_code(right)) {
                (Some(l), Some(r)) => ManaSymbol::Hybrid(l, r),
                _ => ManaSymbol::Other(code.to_string()),
            },
            _ => ManaSymbol::Other(code.to_string()),
        }
    }

    /// Contribution of this symbol to the mana value.
    pub fn mana_value(&self) -> u32 {
        match self {
            ManaSymbol::Generic(amount) => *amount,
            ManaSymbol::Variable(_) => 0,
            ManaSymbol::TwoHybrid(_) => 2,
            ManaSymbol::Other(_) => 0,
            _ => 1,
        }
    }

    pub fn colors(&self) -> Vec<Color> {
        match self {
            ManaSymbol::Colored(c) | ManaSymbol::TwoHybrid(c) | ManaSymbol::Phyrexian(c) => {
                vec![*c]
            }
            ManaSymbol::Hybrid(l, r) => vec![*l, *r],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for ManaSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManaSymbol::Generic(amount) => write!(f, "{{{}}}", amount),
            ManaSymbol::Variable(v) => write!(f, "{{{}}}", v),
            ManaSymbol::Colored(c) => write!(f, "{{{}}}", c.code()),
            ManaSymbol::Colorless => write!(f, "{{C}}"),
            ManaSymbol::Snow => write!(f, "{{S}}"),
            ManaSymbol::Hybrid(l, r) => write!(f, "{{{}/{}}}", l.code(), r.code()),
            ManaSymbol::TwoHybrid(c) => write!(f, "{{2/{}}}", c.code()),
            ManaSymbol::Phyrexian(c) => write!(f, "{{{}/P}}", c.code()),
            ManaSymbol::Other(raw) => write!(f, "{{{}}}", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManaCostError {
    #[error("unclosed '{{' at position {0}")]
    Unclosed(usize),
    #[error("unexpected '{found}' at position {position}")]
    Unexpected { found: char, position: usize },
    #[error("empty symbol at position {0}")]
    EmptySymbol(usize),
}

/// A parsed mana cost. Double-faced cards carry one cost per face, written as
/// `{1}{U} // {2}{B}` in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManaCost {
    pub faces: Vec<Vec<ManaSymbol>>,
}

impl ManaCost {
    pub fn parse(raw: &str) -> Result<Self, ManaCostError> {
        let mut faces = vec![Vec::new()];
        let mut chars = raw.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            match c {
                '{' => {
                    let mut code = String::new();
                    let mut closed = false;
                    for (inner_position, inner) in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(ManaCostError::Unexpected {
                                    found: '{',
                                    position: inner_position,
                                })
                            }
                            other => code.push(other),
                        }
                    }
                    if !closed {
                        return Err(ManaCostError::Unclosed(position));
                    }
                    let code = code.trim();
                    if code.is_empty() {
                        return Err(ManaCostError::EmptySymbol(position));
                    }
                    if let Some(face) = faces.last_mut() {
                        face.push(ManaSymbol::classify(code));
                    }
                }
                '/' if matches!(chars.peek(), Some((_, '/'))) => {
                    chars.next();
                    faces.push(Vec::new());
                }
                c if c.is_whitespace() => {}
                found => return Err(ManaCostError::Unexpected { found, position }),
            }
        }

        if faces.len() == 1 && faces[0].is_empty() {
            faces.clear();
        }
        Ok(ManaCost { faces })
    }

    pub fn symbols(&self) -> impl Iterator<Item = &ManaSymbol> {
        self.faces.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols().next().is_none()
    }

    /// Mana value of the first face, the way the game counts it on the stack.
    pub fn mana_value(&self) -> u32 {
        self.faces
            .first()
            .map(|face| face.iter().map(ManaSymbol::mana_value).sum())
            .unwrap_or(0)
    }

    pub fn colors(&self) -> Vec<Color> {
        let mut colors: Vec<Color> = Vec::new();
        for color in self.symbols().flat_map(ManaSymbol::colors) {
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
        colors
    }
}

impl fmt::Display for ManaCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self
            .faces
            .iter()
            .map(|face| face.iter().map(|s| s.to_string()).collect::<String>())
            .collect();
        write!(f, "{}", faces.join(" // "))
    }
}
