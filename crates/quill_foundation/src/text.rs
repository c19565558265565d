//! Rich text.
//!
//! Script authors write colours with legacy `&` codes (`&cDanger &lBold`).
//! [`FormattedText::from_legacy`] turns that into styled spans; the
//! [`fmt::Display`] impl writes the legacy form back out.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the sixteen legacy colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl Color {
    const ALL: [Color; 16] = [
        Color::Black,
        Color::DarkBlue,
        Color::DarkGreen,
        Color::DarkAqua,
        Color::DarkRed,
        Color::DarkPurple,
        Color::Gold,
        Color::Gray,
        Color::DarkGray,
        Color::Blue,
        Color::Green,
        Color::Aqua,
        Color::Red,
        Color::LightPurple,
        Color::Yellow,
        Color::White,
    ];

    /// Returns the colour for a legacy code character (`0`-`9`, `a`-`f`).
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        let index = code.to_ascii_lowercase().to_digit(16)?;
        Self::ALL.get(index as usize).copied()
    }

    /// Returns the legacy code character for this colour.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
        }
    }
}

/// A run of text sharing one colour and style set.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextSpan {
    /// The text of this run.
    pub text: String,
    /// Colour, if one was set.
    pub color: Option<Color>,
    /// Bold (`&l`).
    pub bold: bool,
    /// Italic (`&o`).
    pub italic: bool,
    /// Underlined (`&n`).
    pub underlined: bool,
    /// Strikethrough (`&m`).
    pub strikethrough: bool,
    /// Obfuscated (`&k`).
    pub obfuscated: bool,
}

impl TextSpan {
    fn styled_like(&self) -> Self {
        Self {
            text: String::new(),
            ..self.clone()
        }
    }
}

/// Rich text made of styled spans.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormattedText {
    spans: Vec<TextSpan>,
}

impl FormattedText {
    /// Creates unstyled text.
    #[must_use]
    pub fn plain_text(text: &str) -> Self {
        Self {
            spans: vec![TextSpan {
                text: text.to_string(),
                ..TextSpan::default()
            }],
        }
    }

    /// Parses legacy colour codes. Both `&` and `§` introduce a code; an
    /// unrecognised code is kept as literal text.
    #[must_use]
    pub fn from_legacy(input: &str) -> Self {
        let mut spans = Vec::new();
        let mut current = TextSpan::default();
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '&' || c == '§' {
                if let Some(&code) = chars.peek() {
                    let mut next = current.styled_like();
                    let recognised = if let Some(color) = Color::from_code(code) {
                        // A colour code resets styles.
                        next = TextSpan {
                            color: Some(color),
                            ..TextSpan::default()
                        };
                        true
                    } else {
                        match code.to_ascii_lowercase() {
                            'k' => next.obfuscated = true,
                            'l' => next.bold = true,
                            'm' => next.strikethrough = true,
                            'n' => next.underlined = true,
                            'o' => next.italic = true,
                            'r' => next = TextSpan::default(),
                            _ => {}
                        }
                        matches!(code.to_ascii_lowercase(), 'k' | 'l' | 'm' | 'n' | 'o' | 'r')
                    };
                    if recognised {
                        chars.next();
                        if !current.text.is_empty() {
                            spans.push(current);
                        }
                        current = next;
                        continue;
                    }
                }
            }
            current.text.push(c);
        }
        if !current.text.is_empty() || spans.is_empty() {
            spans.push(current);
        }
        Self { spans }
    }

    /// Returns the styled spans.
    #[must_use]
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    /// Returns the text with all styling removed.
    #[must_use]
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

impl fmt::Display for FormattedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous: Option<&TextSpan> = None;
        for span in &self.spans {
            let same_style = previous.is_some_and(|p| p.styled_like() == span.styled_like());
            if !same_style {
                let styled = span.color.is_some()
                    || span.bold
                    || span.italic
                    || span.underlined
                    || span.strikethrough
                    || span.obfuscated;
                if let Some(color) = span.color {
                    write!(f, "&{}", color.code())?;
                } else if previous.is_some() || styled {
                    write!(f, "&r")?;
                }
                for (on, code) in [
                    (span.obfuscated, 'k'),
                    (span.bold, 'l'),
                    (span.strikethrough, 'm'),
                    (span.underlined, 'n'),
                    (span.italic, 'o'),
                ] {
                    if on {
                        write!(f, "&{code}")?;
                    }
                }
            }
            write!(f, "{}", span.text)?;
            previous = Some(span);
        }
        Ok(())
    }
}
