//! Pratt expression parser for operator precedence.
//!
//! Boolean operators and value operators live on separate levels: a
//! predicate (comparison, BETWEEN, IN, LIKE, IS) sits between them and
//! applies once, so the two loops never share an operator.

use crate::ast::{BinaryOp, ComparisonQuantifier, SetOperator, UnaryOp};
use crate::lexer::{Keyword, TokenKind};

/// Operand binding power of `NOT`: binds tighter than AND and OR.
pub const NOT_BP: u8 = 5;

/// Operand binding power of unary `+` and `-`.
pub const UNARY_BP: u8 = 13;

/// Left binding power of the `AT TIME ZONE` postfix.
pub const AT_TIME_ZONE_BP: u8 = 15;

/// Returns the binding power of a boolean infix operator.
///
/// Returns `(left_bp, right_bp)`; both operators are left associative.
#[must_use]
pub const fn boolean_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Logical OR (lowest precedence)
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),
        // Logical AND
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),
        _ => None,
    }
}

/// Returns the infix binding power of a value operator.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// Returns `None` if the token is not a value infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // String concatenation
        TokenKind::Concat => Some((7, 8)),
        // Addition, subtraction
        TokenKind::Plus | TokenKind::Minus => Some((9, 10)),
        // Multiplication, division, modulo
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((11, 12)),
        _ => None,
    }
}

/// Converts a token to an arithmetic, concatenation or boolean operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Concat => Some(BinaryOp::Concat),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        _ => comparison_op(kind),
    }
}

/// Converts a token to a comparison operator.
#[must_use]
pub const fn comparison_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        _ => None,
    }
}

/// Converts a token to a value-level unary operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Minus => Some(UnaryOp::Minus),
        _ => None,
    }
}

/// Converts a token to the quantifier of a subquery comparison.
#[must_use]
pub const fn comparison_quantifier(kind: &TokenKind) -> Option<ComparisonQuantifier> {
    match kind {
        TokenKind::Keyword(Keyword::All) => Some(ComparisonQuantifier::All),
        TokenKind::Keyword(Keyword::Any) => Some(ComparisonQuantifier::Any),
        TokenKind::Keyword(Keyword::Some) => Some(ComparisonQuantifier::Some),
        _ => None,
    }
}

/// Returns the binding power and operator of a set operation.
///
/// INTERSECT binds tighter than UNION and EXCEPT; all are left associative.
#[must_use]
pub const fn set_operation_binding_power(kind: &TokenKind) -> Option<((u8, u8), SetOperator)> {
    match kind {
        TokenKind::Keyword(Keyword::Union) => Some(((1, 2), SetOperator::Union)),
        TokenKind::Keyword(Keyword::Except) => Some(((1, 2), SetOperator::Except)),
        TokenKind::Keyword(Keyword::Intersect) => Some(((3, 4), SetOperator::Intersect)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        let (or_l, _) = boolean_binding_power(&TokenKind::Keyword(Keyword::Or)).unwrap();
        let (and_l, _) = boolean_binding_power(&TokenKind::Keyword(Keyword::And)).unwrap();
        let (concat_l, _) = infix_binding_power(&TokenKind::Concat).unwrap();
        let (add_l, _) = infix_binding_power(&TokenKind::Plus).unwrap();
        let (mul_l, _) = infix_binding_power(&TokenKind::Star).unwrap();

        assert!(or_l < and_l);
        assert!(and_l < NOT_BP);
        assert!(concat_l < add_l);
        assert!(add_l < mul_l);
        assert!(mul_l < UNARY_BP);
        assert!(UNARY_BP < AT_TIME_ZONE_BP);
    }

    #[test]
    fn test_left_associativity() {
        for kind in [TokenKind::Minus, TokenKind::Slash, TokenKind::Concat] {
            let (l_bp, r_bp) = infix_binding_power(&kind).unwrap();
            assert!(l_bp < r_bp);
        }
    }

    #[test]
    fn test_value_and_boolean_operators_are_disjoint() {
        assert!(infix_binding_power(&TokenKind::Keyword(Keyword::And)).is_none());
        assert!(boolean_binding_power(&TokenKind::Plus).is_none());
        assert!(infix_binding_power(&TokenKind::Eq).is_none());
    }

    #[test]
    fn test_token_to_binary_op() {
        assert_eq!(token_to_binary_op(&TokenKind::Plus), Some(BinaryOp::Add));
        assert_eq!(token_to_binary_op(&TokenKind::Concat), Some(BinaryOp::Concat));
        assert_eq!(token_to_binary_op(&TokenKind::NotEq), Some(BinaryOp::NotEq));
        assert_eq!(token_to_binary_op(&TokenKind::Comma), None);
    }

    #[test]
    fn test_set_operations() {
        let (union, op) = set_operation_binding_power(&TokenKind::Keyword(Keyword::Union)).unwrap();
        assert_eq!(op, SetOperator::Union);
        let (intersect, _) =
            set_operation_binding_power(&TokenKind::Keyword(Keyword::Intersect)).unwrap();
        assert!(union.0 < intersect.0);
    }
}
