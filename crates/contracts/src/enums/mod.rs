use serde::{Deserialize, Serialize};

/// Cup size of a sold item (S / M / L)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Size {
    S,
    M,
    L,
}

impl Size {
    /// Fixed column order used by the size pivots (S, M, L)
    pub const ALL: [Size; 3] = [Size::S, Size::M, Size::L];

    /// Parse an export cell. Accepts single letters and spelled-out names,
    /// case-insensitive. Unknown values return None and are imputed later.
    pub fn parse(s: &str) -> Option<Size> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "small" => Some(Size::S),
            "m" | "medium" => Some(Size::M),
            "l" | "large" => Some(Size::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_letters_and_names() {
        assert_eq!(Size::parse("S"), Some(Size::S));
        assert_eq!(Size::parse(" m "), Some(Size::M));
        assert_eq!(Size::parse("Large"), Some(Size::L));
        assert_eq!(Size::parse("MEDIUM"), Some(Size::M));
    }

    #[test]
    fn test_parse_unknown_is_none() {
        assert_eq!(Size::parse(""), None);
        assert_eq!(Size::parse("XL"), None);
        assert_eq!(Size::parse("42"), None);
    }
}
