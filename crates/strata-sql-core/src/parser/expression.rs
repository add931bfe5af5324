//! Expression grammar.
//!
//! Four levels, loosest first: boolean (`NOT`, `AND`, `OR`), predicate
//! (comparison, BETWEEN, IN, LIKE, IS), value (arithmetic, concatenation,
//! `AT TIME ZONE`) and primary (literals, calls, special forms, subscript
//! and dereference chains).

use super::options::DecimalLiteralTreatment;
use super::parser::{PResult, Parser};
use super::pratt::{
    boolean_binding_power, comparison_op, comparison_quantifier, infix_binding_power,
    token_to_binary_op, token_to_unary_op, AT_TIME_ZONE_BP, NOT_BP, UNARY_BP,
};
use crate::ast::{
    CurrentTimeFunction, Expr, FrameBound, FrameUnits, FunctionArgs, FunctionCall, IntervalField,
    IntervalLiteral, IntervalSign, Literal, NormalForm, QualifiedName, Query, QueryBody,
    SetQuantifier, UnaryOp, WhenClause, Window, WindowFrame,
};
use crate::lexer::{Keyword, TokenKind};

const fn interval_field(keyword: Option<Keyword>) -> Option<IntervalField> {
    match keyword {
        Some(Keyword::Year) => Some(IntervalField::Year),
        Some(Keyword::Month) => Some(IntervalField::Month),
        Some(Keyword::Day) => Some(IntervalField::Day),
        Some(Keyword::Hour) => Some(IntervalField::Hour),
        Some(Keyword::Minute) => Some(IntervalField::Minute),
        Some(Keyword::Second) => Some(IntervalField::Second),
        _ => None,
    }
}

const fn normal_form(keyword: Option<Keyword>) -> Option<NormalForm> {
    match keyword {
        Some(Keyword::Nfd) => Some(NormalForm::Nfd),
        Some(Keyword::Nfc) => Some(NormalForm::Nfc),
        Some(Keyword::Nfkd) => Some(NormalForm::Nfkd),
        Some(Keyword::Nfkc) => Some(NormalForm::Nfkc),
        _ => None,
    }
}

/// What a parenthesis opens when it may hold either a query or expressions.
pub(super) enum Parenthesized {
    Query(Box<Query>),
    Exprs(Vec<Expr>),
}

impl Parser {
    /// Parses a full expression.
    pub(super) fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_boolean(0)
    }

    /// Parses `expr (, expr)*`.
    pub(super) fn parse_expr_list(&mut self) -> PResult<Vec<Expr>> {
        let mut exprs = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma) {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    /// Parses an optional `DISTINCT` or `ALL`.
    pub(super) fn parse_set_quantifier(&mut self) -> Option<SetQuantifier> {
        if self.eat_keyword(Keyword::Distinct) {
            Some(SetQuantifier::Distinct)
        } else if self.eat_keyword(Keyword::All) {
            Some(SetQuantifier::All)
        } else {
            None
        }
    }

    /// Parses a string literal.
    pub(super) fn parse_string(&mut self) -> PResult<String> {
        if let TokenKind::String(value) = &self.peek().kind {
            let value = value.clone();
            self.advance();
            Ok(value)
        } else {
            Err(self.expected("<string>"))
        }
    }

    /// Parses an integer literal.
    pub(super) fn parse_integer(&mut self) -> PResult<i64> {
        if let TokenKind::Integer(value) = self.peek().kind {
            self.advance();
            Ok(value)
        } else {
            Err(self.expected("<integer>"))
        }
    }

    // ===== Boolean and predicate levels =====

    fn parse_boolean(&mut self, min_bp: u8) -> PResult<Expr> {
        let lhs = if self.at_keyword(Keyword::Not) {
            self.advance();
            let operand = self.recurse(|p| p.parse_boolean(NOT_BP))?;
            Expr::unary(UnaryOp::Not, operand)
        } else {
            self.parse_predicated()?
        };
        self.parse_boolean_from(lhs, min_bp)
    }

    fn parse_boolean_from(&mut self, mut lhs: Expr, min_bp: u8) -> PResult<Expr> {
        loop {
            let kind = &self.peek().kind;
            let (Some((l_bp, r_bp)), Some(op)) =
                (boolean_binding_power(kind), token_to_binary_op(kind))
            else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.parse_boolean(r_bp)?;
            lhs = lhs.binary(op, rhs);
        }

        Ok(lhs)
    }

    /// A value expression followed by at most one predicate.
    fn parse_predicated(&mut self) -> PResult<Expr> {
        let value = self.parse_value(0)?;
        self.parse_predicate_from(value)
    }

    fn parse_predicate_from(&mut self, value: Expr) -> PResult<Expr> {
        if let Some(op) = comparison_op(&self.peek().kind) {
            self.advance();
            if let Some(quantifier) = comparison_quantifier(&self.peek().kind) {
                if self.nth_is(1, &TokenKind::LeftParen) {
                    self.advance();
                    let subquery = self.parse_parenthesized_query()?;
                    return Ok(Expr::QuantifiedComparison {
                        left: Box::new(value),
                        op,
                        quantifier,
                        subquery: Box::new(subquery),
                    });
                }
            }
            let right = self.parse_value(0)?;
            return Ok(value.binary(op, right));
        }

        let negated = self.at_keyword(Keyword::Not)
            && matches!(
                self.peek_nth(1).as_keyword(),
                Some(Keyword::Between | Keyword::In | Keyword::Like)
            );
        if negated {
            self.advance();
        }

        let expr = Box::new(value);
        match self.peek().as_keyword() {
            Some(Keyword::Between) => {
                self.advance();
                let low = self.parse_value(0)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_value(0)?;
                Ok(Expr::Between {
                    expr,
                    negated,
                    low: Box::new(low),
                    high: Box::new(high),
                })
            }
            Some(Keyword::In) => {
                self.advance();
                self.parse_in_predicate(expr, negated)
            }
            Some(Keyword::Like) => {
                self.advance();
                let pattern = self.parse_value(0)?;
                let escape = if self.eat_keyword(Keyword::Escape) {
                    Some(Box::new(self.parse_value(0)?))
                } else {
                    None
                };
                Ok(Expr::Like {
                    expr,
                    negated,
                    pattern: Box::new(pattern),
                    escape,
                })
            }
            Some(Keyword::Is) => {
                self.advance();
                let negated = self.eat_keyword(Keyword::Not);
                if self.eat_keyword(Keyword::Null) {
                    return Ok(Expr::IsNull { expr, negated });
                }
                self.expect_keywords(&[Keyword::Distinct, Keyword::From])?;
                let right = self.parse_value(0)?;
                Ok(Expr::IsDistinctFrom {
                    left: expr,
                    negated,
                    right: Box::new(right),
                })
            }
            _ => Ok(*expr),
        }
    }

    /// `IN ( expr, ... )` or `IN ( query )`, after the `IN`.
    fn parse_in_predicate(&mut self, expr: Box<Expr>, negated: bool) -> PResult<Expr> {
        self.expect(&TokenKind::LeftParen)?;
        match self.parse_parenthesized_content(false)? {
            Parenthesized::Exprs(list) => Ok(Expr::InList {
                expr,
                negated,
                list,
            }),
            Parenthesized::Query(subquery) => Ok(Expr::InSubquery {
                expr,
                negated,
                subquery,
            }),
        }
    }

    // ===== Value level =====

    fn parse_value(&mut self, min_bp: u8) -> PResult<Expr> {
        let lhs = if let Some(op) = token_to_unary_op(&self.peek().kind) {
            self.advance();
            let operand = self.recurse(|p| p.parse_value(UNARY_BP))?;
            Expr::unary(op, operand)
        } else {
            self.parse_primary()?
        };
        self.parse_value_from(lhs, min_bp)
    }

    fn parse_value_from(&mut self, mut lhs: Expr, min_bp: u8) -> PResult<Expr> {
        loop {
            if self.at_keyword(Keyword::At) {
                if AT_TIME_ZONE_BP < min_bp {
                    break;
                }
                self.advance();
                self.expect_keywords(&[Keyword::Time, Keyword::Zone])?;
                let zone = self.parse_time_zone()?;
                lhs = Expr::AtTimeZone {
                    expr: Box::new(lhs),
                    zone: Box::new(zone),
                };
                continue;
            }

            let kind = &self.peek().kind;
            let (Some((l_bp, r_bp)), Some(op)) =
                (infix_binding_power(kind), token_to_binary_op(kind))
            else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.parse_value(r_bp)?;
            lhs = lhs.binary(op, rhs);
        }

        Ok(lhs)
    }

    fn parse_time_zone(&mut self) -> PResult<Expr> {
        if self.at_keyword(Keyword::Interval) {
            let interval = self.parse_interval()?;
            return Ok(Expr::Literal(Literal::Interval(interval)));
        }
        self.note(Keyword::Interval.quoted());
        Ok(Expr::string(self.parse_string()?))
    }

    // ===== Primary level =====

    /// Parses a primary expression and its subscript / dereference chain.
    fn parse_primary(&mut self) -> PResult<Expr> {
        self.recurse(|p| {
            let base = p.parse_primary_base()?;
            p.parse_postfix_from(base)
        })
    }

    fn parse_postfix_from(&mut self, mut expr: Expr) -> PResult<Expr> {
        loop {
            if self.at(&TokenKind::LeftBracket) {
                self.advance();
                let index = self.parse_value(0)?;
                self.expect(&TokenKind::RightBracket)?;
                expr = Expr::Subscript {
                    base: Box::new(expr),
                    index: Box::new(index),
                };
            } else if self.at(&TokenKind::Dot) && self.nth_is_identifier(1) {
                self.advance();
                let field = self.parse_identifier()?;
                expr = Expr::Dereference {
                    base: Box::new(expr),
                    field,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    /// Completes an expression whose leading value has already been parsed.
    fn continue_from_value(&mut self, value: Expr) -> PResult<Expr> {
        let predicated = self.parse_predicate_from(value)?;
        self.parse_boolean_from(predicated, 0)
    }

    /// Completes an expression whose leading primary has already been parsed.
    pub(super) fn continue_from_primary(&mut self, primary: Expr) -> PResult<Expr> {
        let primary = self.parse_postfix_from(primary)?;
        let value = self.parse_value_from(primary, 0)?;
        self.continue_from_value(value)
    }

    fn parse_primary_base(&mut self) -> PResult<Expr> {
        let kind = self.peek().kind.clone();
        let literal = match kind {
            TokenKind::Integer(value) => Literal::Long(value),
            TokenKind::Decimal(text) => self.decimal_literal(text)?,
            TokenKind::Double(value) => Literal::Double(value),
            TokenKind::String(value) => Literal::String(value),
            TokenKind::Binary(bytes) => Literal::Binary(bytes),
            TokenKind::Question => {
                self.advance();
                return Ok(Expr::Parameter {
                    position: self.next_parameter(),
                });
            }
            TokenKind::LeftParen => return self.parse_parenthesized_expression(),
            TokenKind::Keyword(keyword) => return self.parse_keyword_expression(keyword),
            _ if self.at_identifier() => return self.parse_identifier_expression(),
            _ => return Err(self.expected("<expression>")),
        };
        self.advance();
        Ok(Expr::Literal(literal))
    }

    fn decimal_literal(&self, text: String) -> PResult<Literal> {
        match self.options().decimal_literal {
            DecimalLiteralTreatment::AsDecimal => Ok(Literal::Decimal(text)),
            DecimalLiteralTreatment::AsDouble => text
                .parse::<f64>()
                .map(Literal::Double)
                .map_err(|_| self.fail(format!("Invalid decimal literal: {text}"))),
            DecimalLiteralTreatment::Reject => {
                Err(self.fail(format!("Unexpected decimal literal: {text}")))
            }
        }
    }

    /// Primary expressions introduced by a keyword.
    fn parse_keyword_expression(&mut self, keyword: Keyword) -> PResult<Expr> {
        match keyword {
            Keyword::Null => {
                self.advance();
                Ok(Expr::null())
            }
            Keyword::True | Keyword::False => {
                self.advance();
                Ok(Expr::boolean(keyword == Keyword::True))
            }
            Keyword::Case => self.parse_case(),
            Keyword::Cast | Keyword::TryCast => self.parse_cast(),
            Keyword::Exists => {
                self.advance();
                let query = self.parse_parenthesized_query()?;
                Ok(Expr::Exists(Box::new(query)))
            }
            Keyword::Extract => self.parse_extract(),
            Keyword::Normalize => self.parse_normalize(),
            Keyword::CurrentDate => self.parse_current_time(CurrentTimeFunction::Date),
            Keyword::CurrentTime => self.parse_current_time(CurrentTimeFunction::Time),
            Keyword::CurrentTimestamp => self.parse_current_time(CurrentTimeFunction::Timestamp),
            Keyword::Localtime => self.parse_current_time(CurrentTimeFunction::LocalTime),
            Keyword::Localtimestamp => {
                self.parse_current_time(CurrentTimeFunction::LocalTimestamp)
            }
            Keyword::Interval if self.at_interval_literal() => {
                let interval = self.parse_interval()?;
                Ok(Expr::Literal(Literal::Interval(interval)))
            }
            Keyword::Array if self.nth_is(1, &TokenKind::LeftBracket) => {
                self.advance();
                self.advance();
                let elements = if self.at(&TokenKind::RightBracket) {
                    Vec::new()
                } else {
                    self.parse_expr_list()?
                };
                self.expect(&TokenKind::RightBracket)?;
                Ok(Expr::Array(elements))
            }
            Keyword::Row if self.nth_is(1, &TokenKind::LeftParen) => {
                self.advance();
                self.advance();
                let fields = self.parse_expr_list()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::Row(fields))
            }
            Keyword::Position | Keyword::Substring
                if self.nth_is(1, &TokenKind::LeftParen) && !self.nth_is_call_only(2) =>
            {
                self.parse_position_or_substring(keyword)
            }
            _ if self.at_identifier() => self.parse_identifier_expression(),
            _ => Err(self.expected("<expression>")),
        }
    }

    /// Lambda, type constructor, function call or column reference.
    fn parse_identifier_expression(&mut self) -> PResult<Expr> {
        if self.nth_is(1, &TokenKind::Arrow) {
            let param = self.parse_identifier()?;
            self.advance();
            let body = self.parse_expr()?;
            return Ok(Expr::Lambda {
                params: vec![param],
                body: Box::new(body),
            });
        }

        if let TokenKind::String(value) = &self.peek_nth(1).kind {
            let value = value.clone();
            let type_name = self.parse_identifier()?;
            self.advance();
            return Ok(Expr::Literal(Literal::Typed { type_name, value }));
        }

        let name_len = self.qualified_name_len();
        if self.nth_is(name_len, &TokenKind::LeftParen) {
            return self.parse_function_call();
        }

        Ok(Expr::Column(self.parse_identifier()?))
    }

    /// Whether the input continues with `( ident, ... ) ->`.
    fn at_lambda_params(&self) -> bool {
        if !self.at(&TokenKind::LeftParen) {
            return false;
        }
        let mut n = 1;
        loop {
            if !self.nth_is_identifier(n) {
                return false;
            }
            n += 1;
            if !self.nth_is(n, &TokenKind::Comma) {
                break;
            }
            n += 1;
        }
        self.nth_is(n, &TokenKind::RightParen) && self.nth_is(n + 1, &TokenKind::Arrow)
    }

    /// Lambda, subquery, row constructor or parenthesized expression.
    fn parse_parenthesized_expression(&mut self) -> PResult<Expr> {
        if self.at_lambda_params() {
            let params = self.parse_column_aliases()?;
            self.expect(&TokenKind::Arrow)?;
            let body = self.parse_expr()?;
            return Ok(Expr::Lambda {
                params,
                body: Box::new(body),
            });
        }

        self.expect(&TokenKind::LeftParen)?;
        let items = match self.parse_parenthesized_content(true)? {
            Parenthesized::Query(query) => return Ok(Expr::Subquery(query)),
            Parenthesized::Exprs(items) => items,
        };
        // A single element is a grouping, not a row
        Ok(match <[Expr; 1]>::try_from(items) {
            Ok([expr]) => expr,
            Err(items) => Expr::Row(items),
        })
    }

    /// The inside of `( ... )` through the closing parenthesis, after the
    /// opening one.
    ///
    /// A leading parenthesized subquery is parsed once and then continued
    /// as a query when a set operator, `ORDER BY` or `LIMIT` follows (or,
    /// with `bare_query`, when the parenthesis closes), and as the first
    /// expression of a list otherwise.
    pub(super) fn parse_parenthesized_content(&mut self, bare_query: bool) -> PResult<Parenthesized> {
        if self.at_query_start() {
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(Parenthesized::Query(Box::new(query)));
        }

        let first = if self.at(&TokenKind::LeftParen) {
            match self.recurse(Self::parse_parenthesized_expression)? {
                Expr::Subquery(query)
                    if query.with.is_none()
                        && (self.at_query_continuation()
                            || (bare_query && self.at(&TokenKind::RightParen))) =>
                {
                    let query = self.continue_query(QueryBody::Nested(query))?;
                    self.expect(&TokenKind::RightParen)?;
                    return Ok(Parenthesized::Query(Box::new(query)));
                }
                primary => self.continue_from_primary(primary)?,
            }
        } else {
            self.parse_expr()?
        };

        let mut exprs = vec![first];
        while self.eat(&TokenKind::Comma) {
            exprs.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(Parenthesized::Exprs(exprs))
    }

    fn parse_function_call(&mut self) -> PResult<Expr> {
        let name = self.parse_qualified_name()?;
        self.expect(&TokenKind::LeftParen)?;

        let args = if self.at(&TokenKind::Star) && self.nth_is(1, &TokenKind::RightParen) {
            self.advance();
            FunctionArgs::Wildcard
        } else if self.at(&TokenKind::RightParen) {
            FunctionArgs::Exprs {
                quantifier: None,
                args: Vec::new(),
            }
        } else {
            let quantifier = self.parse_set_quantifier();
            FunctionArgs::Exprs {
                quantifier,
                args: self.parse_expr_list()?,
            }
        };
        self.finish_function_call(name, args)
    }

    /// The closing parenthesis, `FILTER` and `OVER` of a call whose
    /// arguments have been parsed.
    fn finish_function_call(&mut self, name: QualifiedName, args: FunctionArgs) -> PResult<Expr> {
        self.expect(&TokenKind::RightParen)?;

        let filter = if self.at_keyword(Keyword::Filter) && self.nth_is(1, &TokenKind::LeftParen) {
            self.advance();
            self.advance();
            self.expect_keyword(Keyword::Where)?;
            let predicate = self.parse_expr()?;
            self.expect(&TokenKind::RightParen)?;
            Some(Box::new(predicate))
        } else {
            None
        };

        let window = if self.at_keyword(Keyword::Over) && self.nth_is(1, &TokenKind::LeftParen) {
            self.advance();
            Some(self.parse_window()?)
        } else {
            None
        };

        Ok(Expr::Function(FunctionCall {
            name,
            args,
            filter,
            window,
        }))
    }

    // ===== Windows =====

    fn parse_window(&mut self) -> PResult<Window> {
        self.expect(&TokenKind::LeftParen)?;
        let mut window = Window::default();
        if self.eat_keyword(Keyword::Partition) {
            self.expect_keyword(Keyword::By)?;
            window.partition_by = self.parse_expr_list()?;
        }
        if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            window.order_by = self.parse_sort_items()?;
        }
        window.frame = self.parse_window_frame()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(window)
    }

    fn parse_window_frame(&mut self) -> PResult<Option<WindowFrame>> {
        let units = if self.eat_keyword(Keyword::Range) {
            FrameUnits::Range
        } else if self.eat_keyword(Keyword::Rows) {
            FrameUnits::Rows
        } else {
            return Ok(None);
        };

        let (start, end) = if self.eat_keyword(Keyword::Between) {
            let start = self.parse_frame_bound()?;
            self.expect_keyword(Keyword::And)?;
            (start, Some(self.parse_frame_bound()?))
        } else {
            (self.parse_frame_bound()?, None)
        };

        Ok(Some(WindowFrame { units, start, end }))
    }

    fn parse_frame_bound(&mut self) -> PResult<FrameBound> {
        if self.at_keyword(Keyword::Unbounded) {
            if self.nth_is_keyword(1, Keyword::Preceding) {
                self.advance();
                self.advance();
                return Ok(FrameBound::UnboundedPreceding);
            }
            if self.nth_is_keyword(1, Keyword::Following) {
                self.advance();
                self.advance();
                return Ok(FrameBound::UnboundedFollowing);
            }
        }
        if self.at_keyword(Keyword::Current) && self.nth_is_keyword(1, Keyword::Row) {
            self.advance();
            self.advance();
            return Ok(FrameBound::CurrentRow);
        }

        let offset = Box::new(self.parse_expr()?);
        if self.eat_keyword(Keyword::Preceding) {
            Ok(FrameBound::Preceding(offset))
        } else if self.eat_keyword(Keyword::Following) {
            Ok(FrameBound::Following(offset))
        } else {
            Err(self.mismatch())
        }
    }

    // ===== Special forms =====

    fn parse_case(&mut self) -> PResult<Expr> {
        self.expect_keyword(Keyword::Case)?;
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_value(0)?))
        };

        let mut when_clauses = Vec::new();
        while self.eat_keyword(Keyword::When) {
            let condition = self.parse_expr()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expr()?;
            when_clauses.push(WhenClause { condition, result });
        }
        if when_clauses.is_empty() {
            return Err(self.mismatch());
        }

        let else_result = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            when_clauses,
            else_result,
        })
    }

    fn parse_cast(&mut self) -> PResult<Expr> {
        let safe = self.at_keyword(Keyword::TryCast);
        self.advance();
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_type()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
            safe,
        })
    }

    fn parse_extract(&mut self) -> PResult<Expr> {
        self.expect_keyword(Keyword::Extract)?;
        self.expect(&TokenKind::LeftParen)?;
        let field = self.parse_identifier()?;
        self.expect_keyword(Keyword::From)?;
        let expr = self.parse_value(0)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Extract {
            field,
            expr: Box::new(expr),
        })
    }

    fn parse_normalize(&mut self) -> PResult<Expr> {
        self.expect_keyword(Keyword::Normalize)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_value(0)?;
        let form = if self.eat(&TokenKind::Comma) {
            match normal_form(self.peek().as_keyword()) {
                Some(form) => {
                    self.advance();
                    Some(form)
                }
                None => {
                    for keyword in [Keyword::Nfd, Keyword::Nfc, Keyword::Nfkd, Keyword::Nfkc] {
                        self.note(keyword.quoted());
                    }
                    return Err(self.mismatch());
                }
            }
        } else {
            None
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Normalize {
            expr: Box::new(expr),
            form,
        })
    }

    /// Whether the token `n` positions ahead can only open the argument
    /// list of an ordinary call: `)`, `*`, a set quantifier or `NOT`.
    fn nth_is_call_only(&self, n: usize) -> bool {
        self.nth_is(n, &TokenKind::RightParen)
            || self.nth_is(n, &TokenKind::Star)
            || matches!(
                self.peek_nth(n).as_keyword(),
                Some(Keyword::Distinct | Keyword::All | Keyword::Not)
            )
    }

    /// `POSITION(needle IN haystack)` and `SUBSTRING(expr FROM start [FOR
    /// length])`. Without the `IN` or `FROM` after the first argument, the
    /// same tokens are an ordinary call to a function of that name.
    fn parse_position_or_substring(&mut self, keyword: Keyword) -> PResult<Expr> {
        let name = self.parse_qualified_name()?;
        self.expect(&TokenKind::LeftParen)?;
        let first = self.parse_value(0)?;

        if keyword == Keyword::Position && self.eat_keyword(Keyword::In) {
            let haystack = self.parse_value(0)?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expr::Position {
                needle: Box::new(first),
                haystack: Box::new(haystack),
            });
        }
        if keyword == Keyword::Substring && self.eat_keyword(Keyword::From) {
            let start = self.parse_value(0)?;
            let length = if self.eat_keyword(Keyword::For) {
                Some(Box::new(self.parse_value(0)?))
            } else {
                None
            };
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expr::Substring {
                expr: Box::new(first),
                start: Box::new(start),
                length,
            });
        }

        let mut args = vec![self.continue_from_value(first)?];
        while self.eat(&TokenKind::Comma) {
            args.push(self.parse_expr()?);
        }
        self.finish_function_call(
            name,
            FunctionArgs::Exprs {
                quantifier: None,
                args,
            },
        )
    }

    fn parse_current_time(&mut self, function: CurrentTimeFunction) -> PResult<Expr> {
        self.advance();
        let precision = if function != CurrentTimeFunction::Date && self.eat(&TokenKind::LeftParen)
        {
            let value = self.parse_integer()?;
            let precision = u32::try_from(value)
                .map_err(|_| self.fail(format!("Invalid precision: {value}")))?;
            self.expect(&TokenKind::RightParen)?;
            Some(precision)
        } else {
            None
        };
        Ok(Expr::CurrentTime {
            function,
            precision,
        })
    }

    // ===== Intervals =====

    /// Whether the input continues with `INTERVAL [+|-] 'v' field`.
    fn at_interval_literal(&self) -> bool {
        if !self.at_keyword(Keyword::Interval) {
            return false;
        }
        let value_at =
            if self.nth_is(1, &TokenKind::Plus) || self.nth_is(1, &TokenKind::Minus) { 2 } else { 1 };
        self.nth_is(value_at, &TokenKind::String(String::new()))
            && interval_field(self.peek_nth(value_at + 1).as_keyword()).is_some()
    }

    fn parse_interval(&mut self) -> PResult<IntervalLiteral> {
        self.expect_keyword(Keyword::Interval)?;
        let sign = if self.eat(&TokenKind::Minus) {
            IntervalSign::Negative
        } else {
            self.eat(&TokenKind::Plus);
            IntervalSign::Positive
        };
        let value = self.parse_string()?;
        let start = self.parse_interval_field()?;
        let end = if self.at_keyword(Keyword::To)
            && interval_field(self.peek_nth(1).as_keyword()).is_some()
        {
            self.advance();
            Some(self.parse_interval_field()?)
        } else {
            None
        };
        Ok(IntervalLiteral {
            value,
            sign,
            start,
            end,
        })
    }

    fn parse_interval_field(&mut self) -> PResult<IntervalField> {
        if let Some(field) = interval_field(self.peek().as_keyword()) {
            self.advance();
            return Ok(field);
        }
        for keyword in [
            Keyword::Year,
            Keyword::Month,
            Keyword::Day,
            Keyword::Hour,
            Keyword::Minute,
            Keyword::Second,
        ] {
            self.note(keyword.quoted());
        }
        Err(self.mismatch())
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOp, Expr, Literal, QueryBody, UnaryOp};
    use crate::parser::{DecimalLiteralTreatment, ParseError, Parser, ParserOptions};

    fn parse(sql: &str) -> Expr {
        Parser::new(sql).parse_expression().unwrap()
    }

    fn parse_err(sql: &str) -> ParseError {
        Parser::new(sql).parse_expression().unwrap_err()
    }

    fn col(name: &str) -> Expr {
        Expr::column(name)
    }

    // ===== Precedence =====

    #[test]
    fn test_multiplication_binds_tighter() {
        assert_eq!(
            parse("1 + 2 * 3"),
            Expr::long(1).binary(BinaryOp::Add, Expr::long(2).binary(BinaryOp::Mul, Expr::long(3)))
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        assert_eq!(parse("a OR b AND c"), col("a").or(col("b").and(col("c"))));
    }

    #[test]
    fn test_not_binds_tighter_than_and() {
        assert_eq!(
            parse("NOT a AND b"),
            Expr::unary(UnaryOp::Not, col("a")).and(col("b"))
        );
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        assert_eq!(
            parse("a - b - c"),
            col("a").binary(BinaryOp::Sub, col("b")).binary(BinaryOp::Sub, col("c"))
        );
    }

    #[test]
    fn test_concat_is_looser_than_addition() {
        assert_eq!(
            parse("a || b + c"),
            col("a").binary(BinaryOp::Concat, col("b").binary(BinaryOp::Add, col("c")))
        );
    }

    #[test]
    fn test_comparison_takes_value_operands() {
        assert_eq!(
            parse("a + 1 = b"),
            col("a").binary(BinaryOp::Add, Expr::long(1)).binary(BinaryOp::Eq, col("b"))
        );
    }

    #[test]
    fn test_unary_minus_binds_tighter_than_multiplication() {
        assert_eq!(
            parse("-a * b"),
            Expr::unary(UnaryOp::Minus, col("a")).binary(BinaryOp::Mul, col("b"))
        );
    }

    #[test]
    fn test_at_time_zone_binds_tighter_than_unary() {
        let expr = parse("-a AT TIME ZONE 'UTC'");
        let Expr::Unary { op, operand } = expr else {
            panic!("expected unary");
        };
        assert_eq!(op, UnaryOp::Minus);
        assert!(matches!(*operand, Expr::AtTimeZone { .. }));
    }

    // ===== Predicates =====

    #[test]
    fn test_between_and_does_not_split() {
        let expr = parse("a BETWEEN 1 AND 2 AND b");
        let Expr::Binary { left, op, .. } = expr else {
            panic!("expected AND");
        };
        assert_eq!(op, BinaryOp::And);
        assert!(matches!(*left, Expr::Between { negated: false, .. }));
    }

    #[test]
    fn test_negated_predicates() {
        assert!(matches!(parse("a NOT IN (1, 2)"), Expr::InList { negated: true, .. }));
        assert!(matches!(parse("a NOT LIKE 'x%'"), Expr::Like { negated: true, .. }));
        assert!(matches!(parse("a IS NOT NULL"), Expr::IsNull { negated: true, .. }));
        assert!(matches!(
            parse("a IS NOT DISTINCT FROM b"),
            Expr::IsDistinctFrom { negated: true, .. }
        ));
    }

    #[test]
    fn test_in_subquery() {
        assert!(matches!(parse("a IN (SELECT x FROM t)"), Expr::InSubquery { .. }));
        assert!(matches!(
            parse("a IN ((SELECT 1) UNION (SELECT 2))"),
            Expr::InSubquery { .. }
        ));
        let Expr::InList { list, .. } = parse("a IN ((SELECT 1), 2)") else {
            panic!("expected IN list");
        };
        assert!(matches!(list[0], Expr::Subquery(_)));
    }

    #[test]
    fn test_quantified_comparison() {
        assert!(matches!(
            parse("a > ALL (SELECT b FROM t)"),
            Expr::QuantifiedComparison { op: BinaryOp::Gt, .. }
        ));
    }

    // ===== Primary =====

    #[test]
    fn test_row_arity() {
        assert_eq!(parse("(1)"), Expr::long(1));
        assert_eq!(parse("(1, 2)"), Expr::Row(vec![Expr::long(1), Expr::long(2)]));
        assert_eq!(parse("ROW (1)"), Expr::Row(vec![Expr::long(1)]));
    }

    #[test]
    fn test_lambda() {
        assert!(matches!(parse("x -> x + 1"), Expr::Lambda { ref params, .. } if params.len() == 1));
        assert!(matches!(parse("(x, y) -> x + y"), Expr::Lambda { ref params, .. } if params.len() == 2));
    }

    #[test]
    fn test_type_constructor() {
        let Expr::Literal(Literal::Typed { type_name, value }) = parse("DATE '2001-08-22'") else {
            panic!("expected typed literal");
        };
        assert_eq!(type_name.as_str(), "DATE");
        assert_eq!(value, "2001-08-22");
    }

    #[test]
    fn test_interval_requires_field() {
        assert!(matches!(parse("INTERVAL '1' DAY"), Expr::Literal(Literal::Interval(_))));
        assert!(matches!(parse("interval"), Expr::Column(_)));
    }

    #[test]
    fn test_substring_falls_back_to_function_call() {
        assert!(matches!(parse("SUBSTRING(a FROM 2)"), Expr::Substring { .. }));
        assert!(matches!(parse("substring(a, 2)"), Expr::Function(_)));
        assert!(matches!(parse("substring(a > 1, 2)"), Expr::Function(_)));
        assert!(matches!(parse("position(*)"), Expr::Function(_)));
        assert!(matches!(parse("position(NOT a)"), Expr::Function(_)));
        assert!(matches!(parse("position(a IN b) + 1"), Expr::Binary { .. }));
    }

    #[test]
    fn test_leading_subquery_continues_as_query_or_expression() {
        let Expr::Binary { left, .. } = parse("((SELECT 1) + 1)") else {
            panic!("expected binary");
        };
        assert!(matches!(*left, Expr::Subquery(_)));

        let Expr::Subquery(query) = parse("((SELECT 1) UNION (SELECT 2) ORDER BY 1)") else {
            panic!("expected subquery");
        };
        assert!(matches!(query.body, QueryBody::SetOperation { .. }));
        assert_eq!(query.order_by.len(), 1);

        let Expr::Subquery(query) = parse("((SELECT 1))") else {
            panic!("expected subquery");
        };
        assert!(matches!(query.body, QueryBody::Nested(_)));

        assert!(matches!(parse("((SELECT 1), 2)"), Expr::Row(_)));
        assert!(matches!(parse("((SELECT 1)).x"), Expr::Dereference { .. }));
    }

    #[test]
    fn test_subscript_and_dereference_chain() {
        let expr = parse("a.b[1].c");
        let Expr::Dereference { base, field } = expr else {
            panic!("expected dereference");
        };
        assert_eq!(field.as_str(), "c");
        assert!(matches!(*base, Expr::Subscript { .. }));
    }

    #[test]
    fn test_qualified_function_name() {
        let Expr::Function(call) = parse("a.b.f(x)") else {
            panic!("expected function call");
        };
        assert_eq!(call.name.to_string(), "a.b.f");
    }

    #[test]
    fn test_decimal_treatment() {
        assert_eq!(parse("1.5"), Expr::Literal(Literal::Decimal(String::from("1.5"))));

        let options = ParserOptions::new().with_decimal_literal(DecimalLiteralTreatment::AsDouble);
        let expr = Parser::with_options("1.5", options).parse_expression().unwrap();
        assert_eq!(expr, Expr::Literal(Literal::Double(1.5)));

        let options = ParserOptions::new().with_decimal_literal(DecimalLiteralTreatment::Reject);
        let err = Parser::with_options("1.5", options).parse_expression().unwrap_err();
        assert!(err.message.contains("Unexpected decimal literal"));
    }

    #[test]
    fn test_trailing_token_is_rejected() {
        let err = parse_err("x y");
        assert_eq!(err.offending, "y");
        assert!(err.expected.iter().any(|e| e == "<EOF>"));
    }

    #[test]
    fn test_case_requires_when() {
        let err = parse_err("CASE END");
        assert_eq!(err.offending, "END");
        assert!(err.expected.iter().any(|e| e == "'WHEN'"));
    }
}
