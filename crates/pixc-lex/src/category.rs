//! Character categories forming the DFA's input alphabet.
//!
//! The DFA never looks at raw characters; every input character is first
//! mapped to one of these categories. Hex letters (`a`-`f`, `A`-`F`) are a
//! category of their own because colour literals need them, so identifier
//! and comment states must accept both `Letter` and `HexLetter`.

/// Input alphabet of the lexer DFA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `0`-`9`
    Digit,
    /// `a`-`f`, `A`-`F`
    HexLetter,
    /// Any other ASCII letter
    Letter,
    Plus,
    Minus,
    Star,
    Slash,
    /// `( ) { } [ ] , : ;`
    Punctuation,
    /// Space, tab, carriage return
    Whitespace,
    Newline,
    Equals,
    Less,
    Greater,
    Exclamation,
    Hash,
    Dot,
    Underscore,
    /// Anything not covered above
    Other,
}

impl Category {
    /// Every category, for building transitions that accept the whole
    /// alphabet (comment interiors).
    pub const ALL: [Category; 18] = [
        Category::Digit,
        Category::HexLetter,
        Category::Letter,
        Category::Plus,
        Category::Minus,
        Category::Star,
        Category::Slash,
        Category::Punctuation,
        Category::Whitespace,
        Category::Newline,
        Category::Equals,
        Category::Less,
        Category::Greater,
        Category::Exclamation,
        Category::Hash,
        Category::Dot,
        Category::Underscore,
        Category::Other,
    ];
}

/// Maps a character to its DFA input category.
pub fn categorize(c: char) -> Category {
    match c {
        '0'..='9' => Category::Digit,
        'a'..='f' | 'A'..='F' => Category::HexLetter,
        c if c.is_ascii_alphabetic() => Category::Letter,
        '+' => Category::Plus,
        '-' => Category::Minus,
        '*' => Category::Star,
        '/' => Category::Slash,
        '(' | ')' | '{' | '}' | '[' | ']' | ',' | ':' | ';' => Category::Punctuation,
        ' ' | '\t' | '\r' => Category::Whitespace,
        '\n' => Category::Newline,
        '=' => Category::Equals,
        '<' => Category::Less,
        '>' => Category::Greater,
        '!' => Category::Exclamation,
        '#' => Category::Hash,
        '.' => Category::Dot,
        '_' => Category::Underscore,
        _ => Category::Other,
    }
}
