//! Token kind → highlight style classes.

use super::TokenKind;

/// Style class for a token kind, `None` for kinds that render unstyled.
///
/// Fixed table, matched exhaustively. An unmapped kind is a deliberate
/// no-style outcome, never an error.
pub fn style_class(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Text => Some("text-token"),
        TokenKind::Number => Some("number-token"),
        TokenKind::MoneySymbol => Some("money-symbol-token"),
        TokenKind::Operator => Some("operator-token"),
        TokenKind::Comment => Some("comment-token"),
        TokenKind::VariableDefinition => Some("variable-definition-token"),
        TokenKind::VariableUse => Some("variable-use-token"),
        TokenKind::DateTime | TokenKind::Month => None,
    }
}
