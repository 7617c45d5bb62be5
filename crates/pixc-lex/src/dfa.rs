//! The DFA driving the lexer.
//!
//! The automaton is pure data: a transition table from `(State, Category)`
//! to the next state, plus the set of accepting states. The lexer walks it
//! with longest-match backtracking and asks [`classify`] to turn an
//! accepting state and its lexeme into a token kind.
//!
//! State names follow the lexeme shapes they recognise rather than the
//! numbered states of a textbook table, but the machine is the same ~28
//! state automaton: operators (with `->` as its own accepting path),
//! comments folding into whitespace, `__`-prefixed built-in names kept
//! apart from ordinary identifiers, integer/float splitting on the dot,
//! and `#` followed by exactly six hex digits for colour literals.

use rustc_hash::FxHashMap;

use crate::category::Category;
use crate::token::{special_from_lexeme, word_from_lexeme, TokenKind};

/// States of the lexer DFA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Start,
    /// `-`, possibly the first half of `->`
    Minus,
    /// `->`
    Arrow,
    Plus,
    Star,
    /// `/`, possibly opening a comment
    Slash,
    /// Inside `//...`; a newline folds the comment into whitespace
    LineComment,
    /// Inside `/* ... */`
    BlockComment,
    /// Inside a block comment, just after a `*`
    BlockCommentStar,
    /// One or more whitespace characters (and closed comments)
    Whitespace,
    /// `=`, possibly the first half of `==`
    Assign,
    /// `<` or `>`, possibly followed by `=`
    Angle,
    /// `!`; only valid when completed to `!=`
    Bang,
    /// `==`, `<=`, `>=` or `!=`
    RelEquals,
    /// A single punctuation character
    Punct,
    /// `_`; continues into an ordinary identifier or a second underscore
    Underscore,
    /// `__`; must continue into a built-in name
    DoubleUnderscore,
    /// `__` followed by at least one letter
    SpecialIdent,
    Ident,
    Int,
    /// Integer followed by `.`, waiting for the fractional digits
    IntDot,
    Float,
    /// `#`, waiting for six hex digits
    Hash,
    Hex1,
    Hex2,
    Hex3,
    Hex4,
    Hex5,
    Colour,
}

/// The transition table.
///
/// Stored as a hash map keyed on `(state, category)`, mirroring the shape
/// of the grammar: a missing entry is the "no transition" outcome that
/// triggers the lexer's rollback.
pub struct Dfa {
    transitions: FxHashMap<(State, Category), State>,
}

impl Dfa {
    /// Builds the transition table.
    pub fn new() -> Self {
        use Category as C;
        use State as S;

        let mut t = FxHashMap::default();
        let mut edge = |from: State, cat: Category, to: State| {
            t.insert((from, cat), to);
        };

        // Operators; `->` is its own accepting state.
        edge(S::Start, C::Minus, S::Minus);
        edge(S::Minus, C::Greater, S::Arrow);
        edge(S::Start, C::Plus, S::Plus);
        edge(S::Start, C::Star, S::Star);
        edge(S::Start, C::Slash, S::Slash);

        // Whitespace.
        edge(S::Start, C::Whitespace, S::Whitespace);
        edge(S::Start, C::Newline, S::Whitespace);
        edge(S::Whitespace, C::Whitespace, S::Whitespace);
        edge(S::Whitespace, C::Newline, S::Whitespace);

        // Line comments absorb everything up to and including the newline,
        // then continue as whitespace.
        edge(S::Slash, C::Slash, S::LineComment);
        for cat in C::ALL {
            edge(S::LineComment, cat, S::LineComment);
        }
        edge(S::LineComment, C::Newline, S::Whitespace);

        // Block comments; the closing `*/` also folds into whitespace.
        edge(S::Slash, C::Star, S::BlockComment);
        for cat in C::ALL {
            edge(S::BlockComment, cat, S::BlockComment);
        }
        edge(S::BlockComment, C::Star, S::BlockCommentStar);
        for cat in C::ALL {
            edge(S::BlockCommentStar, cat, S::BlockComment);
        }
        edge(S::BlockCommentStar, C::Star, S::BlockCommentStar);
        edge(S::BlockCommentStar, C::Slash, S::Whitespace);

        // Assignment and relational operators.
        edge(S::Start, C::Equals, S::Assign);
        edge(S::Start, C::Less, S::Angle);
        edge(S::Start, C::Greater, S::Angle);
        edge(S::Start, C::Exclamation, S::Bang);
        edge(S::Assign, C::Equals, S::RelEquals);
        edge(S::Angle, C::Equals, S::RelEquals);
        edge(S::Bang, C::Equals, S::RelEquals);

        // Punctuation is always a single character.
        edge(S::Start, C::Punctuation, S::Punct);

        // Reserved `__` names. The prefix must be followed by a letter and
        // the body may mix letters and underscores (`__write_box`).
        edge(S::Start, C::Underscore, S::Underscore);
        edge(S::Underscore, C::Underscore, S::DoubleUnderscore);
        edge(S::DoubleUnderscore, C::Letter, S::SpecialIdent);
        edge(S::DoubleUnderscore, C::HexLetter, S::SpecialIdent);
        edge(S::SpecialIdent, C::Letter, S::SpecialIdent);
        edge(S::SpecialIdent, C::HexLetter, S::SpecialIdent);
        edge(S::SpecialIdent, C::Underscore, S::SpecialIdent);

        // Ordinary identifiers. A single leading underscore continues into
        // an identifier as well.
        edge(S::Start, C::Letter, S::Ident);
        edge(S::Start, C::HexLetter, S::Ident);
        edge(S::Underscore, C::Letter, S::Ident);
        edge(S::Underscore, C::HexLetter, S::Ident);
        edge(S::Underscore, C::Digit, S::Ident);
        edge(S::Ident, C::Letter, S::Ident);
        edge(S::Ident, C::HexLetter, S::Ident);
        edge(S::Ident, C::Digit, S::Ident);
        edge(S::Ident, C::Underscore, S::Ident);

        // Integer and float literals. The dot alone is not accepting; the
        // lexer rolls back to the integer if no digit follows.
        edge(S::Start, C::Digit, S::Int);
        edge(S::Int, C::Digit, S::Int);
        edge(S::Int, C::Dot, S::IntDot);
        edge(S::IntDot, C::Digit, S::Float);
        edge(S::Float, C::Digit, S::Float);

        // Colour literals: `#` then exactly six hex digits.
        edge(S::Start, C::Hash, S::Hash);
        for (from, to) in [
            (S::Hash, S::Hex1),
            (S::Hex1, S::Hex2),
            (S::Hex2, S::Hex3),
            (S::Hex3, S::Hex4),
            (S::Hex4, S::Hex5),
            (S::Hex5, S::Colour),
        ] {
            edge(from, C::HexLetter, to);
            edge(from, C::Digit, to);
        }

        Self { transitions: t }
    }

    /// Looks up the next state, or `None` when no transition exists.
    pub fn transition(&self, state: State, category: Category) -> Option<State> {
        self.transitions.get(&(state, category)).copied()
    }

    /// Whether a state may end a token.
    pub fn is_accepting(&self, state: State) -> bool {
        matches!(
            state,
            State::Minus
                | State::Arrow
                | State::Plus
                | State::Star
                | State::Slash
                | State::LineComment
                | State::Whitespace
                | State::Assign
                | State::Angle
                | State::RelEquals
                | State::Punct
                | State::SpecialIdent
                | State::Ident
                | State::Int
                | State::Float
                | State::Colour
        )
    }
}

impl Default for Dfa {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps an accepting state and its lexeme to a token kind.
///
/// Identifier-shaped states consult the keyword, word-operator, boolean
/// and type-name tables; `__`-shaped states consult the built-in table.
/// `None` means the lexeme landed in a reserved but unknown name.
pub fn classify(state: State, lexeme: &str) -> Option<TokenKind> {
    match state {
        State::Minus | State::Plus => Some(TokenKind::AdditiveOp),
        State::Star | State::Slash => Some(TokenKind::MultiplicativeOp),
        State::Arrow => Some(TokenKind::Arrow),
        State::LineComment | State::Whitespace => Some(TokenKind::Skip),
        State::Assign => Some(TokenKind::Assign),
        State::Angle | State::RelEquals => Some(TokenKind::RelationalOp),
        State::Punct => punctuation_kind(lexeme),
        State::SpecialIdent => special_from_lexeme(lexeme),
        State::Ident => Some(word_from_lexeme(lexeme)),
        State::Int => Some(TokenKind::IntLiteral),
        State::Float => Some(TokenKind::FloatLiteral),
        State::Colour => Some(TokenKind::ColourLiteral),
        _ => None,
    }
}

fn punctuation_kind(lexeme: &str) -> Option<TokenKind> {
    match lexeme {
        "(" => Some(TokenKind::LParen),
        ")" => Some(TokenKind::RParen),
        "{" => Some(TokenKind::LBrace),
        "}" => Some(TokenKind::RBrace),
        "[" => Some(TokenKind::LBracket),
        "]" => Some(TokenKind::RBracket),
        "," => Some(TokenKind::Comma),
        ":" => Some(TokenKind::Colon),
        ";" => Some(TokenKind::Semicolon),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(dfa: &Dfa, input: &str) -> Option<State> {
        let mut state = State::Start;
        for c in input.chars() {
            state = dfa.transition(state, crate::category::categorize(c))?;
        }
        Some(state)
    }

    #[test]
    fn test_arrow_path() {
        let dfa = Dfa::new();
        assert_eq!(walk(&dfa, "-"), Some(State::Minus));
        assert_eq!(walk(&dfa, "->"), Some(State::Arrow));
        assert!(dfa.is_accepting(State::Arrow));
    }

    #[test]
    fn test_bang_alone_is_not_accepting() {
        let dfa = Dfa::new();
        assert_eq!(walk(&dfa, "!"), Some(State::Bang));
        assert!(!dfa.is_accepting(State::Bang));
        assert_eq!(walk(&dfa, "!="), Some(State::RelEquals));
    }

    #[test]
    fn test_line_comment_folds_into_whitespace() {
        let dfa = Dfa::new();
        assert_eq!(walk(&dfa, "// hi there\n"), Some(State::Whitespace));
        assert_eq!(walk(&dfa, "// no newline"), Some(State::LineComment));
        assert!(dfa.is_accepting(State::LineComment));
    }

    #[test]
    fn test_block_comment_paths() {
        let dfa = Dfa::new();
        assert_eq!(walk(&dfa, "/* x */"), Some(State::Whitespace));
        assert_eq!(walk(&dfa, "/* ** */"), Some(State::Whitespace));
        assert_eq!(walk(&dfa, "/* open"), Some(State::BlockComment));
        assert!(!dfa.is_accepting(State::BlockComment));
    }

    #[test]
    fn test_special_ident_path() {
        let dfa = Dfa::new();
        assert_eq!(walk(&dfa, "__write_box"), Some(State::SpecialIdent));
        assert_eq!(walk(&dfa, "__delay"), Some(State::SpecialIdent));
        // `_x` is an ordinary identifier, `__` alone is not accepting.
        assert_eq!(walk(&dfa, "_x"), Some(State::Ident));
        assert_eq!(walk(&dfa, "__"), Some(State::DoubleUnderscore));
        assert!(!dfa.is_accepting(State::DoubleUnderscore));
    }

    #[test]
    fn test_numeric_paths() {
        let dfa = Dfa::new();
        assert_eq!(walk(&dfa, "42"), Some(State::Int));
        assert_eq!(walk(&dfa, "42."), Some(State::IntDot));
        assert!(!dfa.is_accepting(State::IntDot));
        assert_eq!(walk(&dfa, "42.5"), Some(State::Float));
    }

    #[test]
    fn test_colour_path_accepts_digits_and_hex() {
        let dfa = Dfa::new();
        assert_eq!(walk(&dfa, "#00ff2a"), Some(State::Colour));
        assert_eq!(walk(&dfa, "#123456"), Some(State::Colour));
        assert_eq!(walk(&dfa, "#12345"), Some(State::Hex5));
        assert!(!dfa.is_accepting(State::Hex5));
        // A seventh hex digit has nowhere to go.
        assert_eq!(
            dfa.transition(State::Colour, Category::HexLetter),
            None
        );
    }

    #[test]
    fn test_classification_of_word_shapes() {
        assert_eq!(classify(State::Ident, "let"), Some(TokenKind::Let));
        assert_eq!(classify(State::Ident, "true"), Some(TokenKind::BoolLiteral));
        assert_eq!(classify(State::Ident, "color"), Some(TokenKind::Type));
        assert_eq!(classify(State::Ident, "and"), Some(TokenKind::MultiplicativeOp));
        assert_eq!(classify(State::Ident, "or"), Some(TokenKind::AdditiveOp));
        assert_eq!(classify(State::Ident, "not"), Some(TokenKind::NotOp));
        assert_eq!(classify(State::Ident, "shade"), Some(TokenKind::Identifier));
        assert_eq!(classify(State::SpecialIdent, "__print"), Some(TokenKind::Print));
        assert_eq!(classify(State::SpecialIdent, "__frobnicate"), None);
    }
}
