//! Query grammar: WITH, set operations, SELECT, relations and joins.

use super::expression::Parenthesized;
use super::parser::{PResult, Parser};
use super::pratt::set_operation_binding_power;
use crate::ast::{
    Expr, GroupBy, GroupingElement, JoinCriteria, JoinKind, Limit, NullOrdering, Ordering,
    QualifiedName, Query, QueryBody, Relation, SampleMethod, Select, SelectItem, SortItem, With,
    WithQuery,
};
use crate::lexer::{Keyword, TokenKind};
use std::collections::VecDeque;

const fn sample_method(keyword: Option<Keyword>) -> Option<SampleMethod> {
    match keyword {
        Some(Keyword::Bernoulli) => Some(SampleMethod::Bernoulli),
        Some(Keyword::System) => Some(SampleMethod::System),
        Some(Keyword::Poissonized) => Some(SampleMethod::Poissonized),
        _ => None,
    }
}

/// A left-deep run of joins, built into a tree once its extent is known.
struct JoinChain {
    first: Relation,
    joins: VecDeque<(JoinKind, Relation, Option<JoinCriteria>)>,
}

impl JoinChain {
    const fn new(first: Relation) -> Self {
        Self {
            first,
            joins: VecDeque::new(),
        }
    }

    fn push(&mut self, kind: JoinKind, right: Relation, criteria: Option<JoinCriteria>) {
        self.joins.push_back((kind, right, criteria));
    }

    /// Continues `outer` with a criteria-less join to this chain's first
    /// relation, followed by the rest of this chain.
    fn attach_under(self, outer: Self, kind: JoinKind) -> Self {
        let Self { first, mut joins } = self;
        joins.push_front((kind, first, None));
        for join in outer.joins.into_iter().rev() {
            joins.push_front(join);
        }
        Self {
            first: outer.first,
            joins,
        }
    }

    fn build(self) -> Relation {
        self.joins
            .into_iter()
            .fold(self.first, |left, (kind, right, criteria)| Relation::Join {
                kind,
                left: Box::new(left),
                right: Box::new(right),
                criteria,
            })
    }
}

impl Parser {
    /// Whether the token `n` positions ahead can start a query.
    pub(super) fn nth_is_query_start(&self, n: usize) -> bool {
        matches!(
            self.peek_nth(n).as_keyword(),
            Some(Keyword::Select | Keyword::With | Keyword::Values | Keyword::Table)
        )
    }

    pub(super) fn at_query_start(&self) -> bool {
        self.nth_is_query_start(0)
    }

    /// Parses `[WITH ...] queryNoWith`.
    pub(super) fn parse_query(&mut self) -> PResult<Query> {
        let with = if self.eat_keyword(Keyword::With) {
            Some(self.parse_with()?)
        } else {
            None
        };
        let mut query = self.parse_query_no_with()?;
        query.with = with;
        Ok(query)
    }

    /// Parses `( query )`.
    pub(super) fn parse_parenthesized_query(&mut self) -> PResult<Query> {
        self.expect(&TokenKind::LeftParen)?;
        let query = self.parse_query()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(query)
    }

    fn parse_with(&mut self) -> PResult<With> {
        let recursive = self.eat_keyword(Keyword::Recursive);
        let mut queries = vec![self.parse_with_query()?];
        while self.eat(&TokenKind::Comma) {
            queries.push(self.parse_with_query()?);
        }
        Ok(With { recursive, queries })
    }

    fn parse_with_query(&mut self) -> PResult<WithQuery> {
        let name = self.parse_identifier()?;
        let columns = if self.at(&TokenKind::LeftParen) {
            self.parse_column_aliases()?
        } else {
            Vec::new()
        };
        self.expect_keyword(Keyword::As)?;
        let query = self.recurse(Self::parse_parenthesized_query)?;
        Ok(WithQuery {
            name,
            columns,
            query: Box::new(query),
        })
    }

    fn parse_query_no_with(&mut self) -> PResult<Query> {
        self.recurse(|p| {
            let body = p.parse_query_term(0)?;
            p.parse_query_tail(body)
        })
    }

    /// Whether a query body that has already been parsed goes on with a set
    /// operator, `ORDER BY` or `LIMIT`.
    pub(super) fn at_query_continuation(&self) -> bool {
        matches!(
            self.peek().as_keyword(),
            Some(
                Keyword::Union
                    | Keyword::Except
                    | Keyword::Intersect
                    | Keyword::Order
                    | Keyword::Limit
            )
        )
    }

    /// Completes a query whose first primary is `body`.
    pub(super) fn continue_query(&mut self, body: QueryBody) -> PResult<Query> {
        let body = self.parse_query_term_from(body, 0)?;
        self.parse_query_tail(body)
    }

    fn parse_query_tail(&mut self, body: QueryBody) -> PResult<Query> {
        let order_by = if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_sort_items()?
        } else {
            Vec::new()
        };

        let limit = if self.eat_keyword(Keyword::Limit) {
            Some(self.parse_limit()?)
        } else {
            None
        };

        Ok(Query {
            with: None,
            body,
            order_by,
            limit,
        })
    }

    /// Parses `ALL` or an integer row count.
    pub(super) fn parse_limit(&mut self) -> PResult<Limit> {
        if self.eat_keyword(Keyword::All) {
            return Ok(Limit::All);
        }
        let count = self.parse_integer()?;
        u64::try_from(count)
            .map(Limit::Count)
            .map_err(|_| self.fail(format!("Invalid LIMIT value: {count}")))
    }

    fn parse_query_term(&mut self, min_bp: u8) -> PResult<QueryBody> {
        let lhs = self.parse_query_primary()?;
        self.parse_query_term_from(lhs, min_bp)
    }

    fn parse_query_term_from(&mut self, mut lhs: QueryBody, min_bp: u8) -> PResult<QueryBody> {
        loop {
            for keyword in [Keyword::Union, Keyword::Except, Keyword::Intersect] {
                if !self.at_keyword(keyword) {
                    self.note(keyword.quoted());
                }
            }
            let Some(((l_bp, r_bp), op)) = set_operation_binding_power(&self.peek().kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            self.advance();
            let quantifier = self.parse_set_quantifier();
            let rhs = self.parse_query_term(r_bp)?;
            lhs = QueryBody::SetOperation {
                op,
                quantifier,
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn parse_query_primary(&mut self) -> PResult<QueryBody> {
        if self.check_keyword(Keyword::Select) {
            return Ok(QueryBody::Select(Box::new(self.parse_select()?)));
        }
        if self.eat_keyword(Keyword::Table) {
            return Ok(QueryBody::Table(self.parse_qualified_name()?));
        }
        if self.eat_keyword(Keyword::Values) {
            return Ok(QueryBody::Values(self.parse_expr_list()?));
        }
        if self.eat(&TokenKind::LeftParen) {
            let query = self.parse_query_no_with()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(QueryBody::Nested(Box::new(query)));
        }
        Err(self.mismatch())
    }

    // ===== SELECT =====

    fn parse_select(&mut self) -> PResult<Select> {
        self.expect_keyword(Keyword::Select)?;
        let quantifier = self.parse_set_quantifier();

        let mut items = vec![self.parse_select_item()?];
        while self.eat(&TokenKind::Comma) {
            items.push(self.parse_select_item()?);
        }

        let mut from = Vec::new();
        if self.eat_keyword(Keyword::From) {
            from.push(self.parse_relation()?);
            while self.eat(&TokenKind::Comma) {
                from.push(self.parse_relation()?);
            }
        }

        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let group_by = if self.eat_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            Some(self.parse_group_by()?)
        } else {
            None
        };

        let having = if self.eat_keyword(Keyword::Having) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(Select {
            quantifier,
            items,
            from,
            where_clause,
            group_by,
            having,
        })
    }

    fn parse_select_item(&mut self) -> PResult<SelectItem> {
        if self.eat(&TokenKind::Star) {
            return Ok(SelectItem::Wildcard);
        }

        // name.*
        let name_len = self.qualified_name_len();
        if name_len > 0
            && self.nth_is(name_len, &TokenKind::Dot)
            && self.nth_is(name_len + 1, &TokenKind::Star)
        {
            let name = self.parse_qualified_name()?;
            self.advance();
            self.advance();
            return Ok(SelectItem::QualifiedWildcard(name));
        }

        let expr = self.parse_expr()?;
        let alias = if self.eat_keyword(Keyword::As) || self.at_identifier() {
            Some(self.parse_identifier()?)
        } else {
            self.note("<identifier>");
            None
        };
        Ok(SelectItem::Expr { expr, alias })
    }

    // ===== GROUP BY =====

    fn parse_group_by(&mut self) -> PResult<GroupBy> {
        let quantifier = self.parse_set_quantifier();
        let mut elements = vec![self.parse_grouping_element()?];
        while self.eat(&TokenKind::Comma) {
            elements.push(self.parse_grouping_element()?);
        }
        Ok(GroupBy {
            quantifier,
            elements,
        })
    }

    fn parse_grouping_element(&mut self) -> PResult<GroupingElement> {
        if self.eat_keyword(Keyword::Rollup) {
            return Ok(GroupingElement::Rollup(self.parse_grouping_set()?));
        }
        if self.eat_keyword(Keyword::Cube) {
            return Ok(GroupingElement::Cube(self.parse_grouping_set()?));
        }
        if self.eat_keyword(Keyword::Grouping) {
            self.expect_keyword(Keyword::Sets)?;
            self.expect(&TokenKind::LeftParen)?;
            let mut sets = vec![self.parse_grouping_set_item()?];
            while self.eat(&TokenKind::Comma) {
                sets.push(self.parse_grouping_set_item()?);
            }
            self.expect(&TokenKind::RightParen)?;
            return Ok(GroupingElement::GroupingSets(sets));
        }

        if !self.at(&TokenKind::LeftParen) {
            return Ok(GroupingElement::Expressions(vec![self.parse_expr()?]));
        }

        // `(a, b)` is a set of expressions unless an operator follows, in
        // which case the parenthesis opened the first operand of one
        self.advance();
        let exprs = if self.eat(&TokenKind::RightParen) {
            Vec::new()
        } else {
            match self.parse_parenthesized_content(false)? {
                Parenthesized::Exprs(exprs) => exprs,
                Parenthesized::Query(query) => vec![Expr::Subquery(query)],
            }
        };
        if self.at_grouping_element_end() {
            return Ok(GroupingElement::Expressions(exprs));
        }
        let primary = match <[Expr; 1]>::try_from(exprs) {
            Ok([expr]) => expr,
            Err(exprs) if exprs.is_empty() => return Err(self.expected("<expression>")),
            Err(exprs) => Expr::Row(exprs),
        };
        Ok(GroupingElement::Expressions(vec![self.continue_from_primary(primary)?]))
    }

    /// Whether the current token can follow a complete grouping element.
    fn at_grouping_element_end(&self) -> bool {
        self.at(&TokenKind::Comma)
            || self.at(&TokenKind::RightParen)
            || self.at(&TokenKind::Eof)
            || matches!(
                self.peek().as_keyword(),
                Some(
                    Keyword::Having
                        | Keyword::Order
                        | Keyword::Limit
                        | Keyword::Union
                        | Keyword::Except
                        | Keyword::Intersect
                )
            )
    }

    /// `( [name, ...] )`
    fn parse_grouping_set(&mut self) -> PResult<Vec<QualifiedName>> {
        self.expect(&TokenKind::LeftParen)?;
        let mut names = Vec::new();
        if !self.at(&TokenKind::RightParen) {
            names.push(self.parse_qualified_name()?);
            while self.eat(&TokenKind::Comma) {
                names.push(self.parse_qualified_name()?);
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(names)
    }

    /// A parenthesized set or a single name.
    fn parse_grouping_set_item(&mut self) -> PResult<Vec<QualifiedName>> {
        if self.at(&TokenKind::LeftParen) {
            self.parse_grouping_set()
        } else {
            Ok(vec![self.parse_qualified_name()?])
        }
    }

    // ===== ORDER BY =====

    /// Parses `sortItem (, sortItem)*`.
    pub(super) fn parse_sort_items(&mut self) -> PResult<Vec<SortItem>> {
        let mut items = vec![self.parse_sort_item()?];
        while self.eat(&TokenKind::Comma) {
            items.push(self.parse_sort_item()?);
        }
        Ok(items)
    }

    fn parse_sort_item(&mut self) -> PResult<SortItem> {
        let expr = self.parse_expr()?;

        let ordering = if self.eat_keyword(Keyword::Asc) {
            Some(Ordering::Asc)
        } else if self.eat_keyword(Keyword::Desc) {
            Some(Ordering::Desc)
        } else {
            None
        };

        let null_ordering = if self.eat_keyword(Keyword::Nulls) {
            if self.eat_keyword(Keyword::First) {
                Some(NullOrdering::First)
            } else if self.eat_keyword(Keyword::Last) {
                Some(NullOrdering::Last)
            } else {
                return Err(self.mismatch());
            }
        } else {
            None
        };

        Ok(SortItem {
            expr,
            ordering,
            null_ordering,
        })
    }

    // ===== Relations =====

    /// Parses a relation and the joins that follow it.
    ///
    /// A qualified join's right operand extends over any further qualified
    /// joins whose criteria are still to come, so `a JOIN b JOIN c ON p ON q`
    /// nests to the right. Each criteria clause closes the innermost open
    /// join. Inner joins left open at the end of the chain take no criteria
    /// and attach left-deep, so `a JOIN b JOIN c` is `(a JOIN b) JOIN c`.
    pub(super) fn parse_relation(&mut self) -> PResult<Relation> {
        self.recurse(|p| {
            let first = p.parse_sampled_relation()?;
            p.parse_join_chain(first)
        })
    }

    fn parse_join_chain(&mut self, first: Relation) -> PResult<Relation> {
        let mut open: Vec<(JoinChain, JoinKind)> = Vec::new();
        let mut current = JoinChain::new(first);

        loop {
            if self.eat_keyword(Keyword::Cross) {
                self.expect_keyword(Keyword::Join)?;
                let right = self.parse_sampled_relation()?;
                current.push(JoinKind::Cross, right, None);
            } else if self.eat_keyword(Keyword::Natural) {
                let kind = self.parse_join_kind()?;
                let right = self.parse_sampled_relation()?;
                current.push(kind, right, Some(JoinCriteria::Natural));
            } else if self.check_join_kind() {
                let kind = self.parse_join_kind()?;
                let right = JoinChain::new(self.parse_sampled_relation()?);
                open.push((std::mem::replace(&mut current, right), kind));
            } else if self.at_keyword(Keyword::On) || self.at_keyword(Keyword::Using) {
                let Some((outer, kind)) = open.pop() else {
                    break;
                };
                let criteria = self.parse_join_criteria()?;
                let right = std::mem::replace(&mut current, outer).build();
                current.push(kind, right, Some(criteria));
            } else {
                break;
            }
        }

        if !open.is_empty() {
            self.note(Keyword::On.quoted());
            self.note(Keyword::Using.quoted());
        }
        while let Some((outer, kind)) = open.pop() {
            if kind != JoinKind::Inner {
                return Err(self.mismatch());
            }
            current = current.attach_under(outer, kind);
        }
        Ok(current.build())
    }

    fn check_join_kind(&mut self) -> bool {
        let mut found = false;
        for keyword in [
            Keyword::Join,
            Keyword::Inner,
            Keyword::Left,
            Keyword::Right,
            Keyword::Full,
        ] {
            found |= self.check_keyword(keyword);
        }
        found
    }

    /// `[INNER] JOIN`, `LEFT [OUTER] JOIN`, `RIGHT [OUTER] JOIN`,
    /// `FULL [OUTER] JOIN`.
    fn parse_join_kind(&mut self) -> PResult<JoinKind> {
        let kind = if self.eat_keyword(Keyword::Left) {
            self.eat_keyword(Keyword::Outer);
            JoinKind::Left
        } else if self.eat_keyword(Keyword::Right) {
            self.eat_keyword(Keyword::Outer);
            JoinKind::Right
        } else if self.eat_keyword(Keyword::Full) {
            self.eat_keyword(Keyword::Outer);
            JoinKind::Full
        } else {
            self.eat_keyword(Keyword::Inner);
            JoinKind::Inner
        };
        self.expect_keyword(Keyword::Join)?;
        Ok(kind)
    }

    fn parse_join_criteria(&mut self) -> PResult<JoinCriteria> {
        if self.eat_keyword(Keyword::On) {
            return Ok(JoinCriteria::On(self.parse_expr()?));
        }
        if self.eat_keyword(Keyword::Using) {
            return Ok(JoinCriteria::Using(self.parse_column_aliases()?));
        }
        Err(self.mismatch())
    }

    fn parse_sampled_relation(&mut self) -> PResult<Relation> {
        let primary = self.parse_relation_primary()?;
        self.parse_sampled_relation_from(primary)
    }

    /// The alias and sample clause after a relation primary.
    fn parse_sampled_relation_from(&mut self, primary: Relation) -> PResult<Relation> {
        let relation = self.parse_aliased_relation(primary)?;
        if !self.eat_keyword(Keyword::Tablesample) {
            return Ok(relation);
        }

        let Some(method) = sample_method(self.peek().as_keyword()) else {
            for keyword in [Keyword::Bernoulli, Keyword::System, Keyword::Poissonized] {
                self.note(keyword.quoted());
            }
            return Err(self.mismatch());
        };
        self.advance();
        self.expect(&TokenKind::LeftParen)?;
        let percentage = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Relation::Sampled {
            relation: Box::new(relation),
            method,
            percentage: Box::new(percentage),
        })
    }

    fn parse_aliased_relation(&mut self, relation: Relation) -> PResult<Relation> {

        // TABLESAMPLE introduces a sample clause, not an alias
        let sample_follows = self.at_keyword(Keyword::Tablesample)
            && sample_method(self.peek_nth(1).as_keyword()).is_some();
        let has_alias = self.eat_keyword(Keyword::As) || (self.at_identifier() && !sample_follows);
        if !has_alias {
            return Ok(relation);
        }

        let alias = self.parse_identifier()?;
        let columns = if self.at(&TokenKind::LeftParen) {
            self.parse_column_aliases()?
        } else {
            Vec::new()
        };
        Ok(Relation::Aliased {
            relation: Box::new(relation),
            alias,
            columns,
        })
    }

    fn parse_relation_primary(&mut self) -> PResult<Relation> {
        if self.eat_keyword(Keyword::Unnest) {
            self.expect(&TokenKind::LeftParen)?;
            let exprs = self.parse_expr_list()?;
            self.expect(&TokenKind::RightParen)?;
            let with_ordinality = self.at_keyword(Keyword::With)
                && self.nth_is_keyword(1, Keyword::Ordinality);
            if with_ordinality {
                self.advance();
                self.advance();
            }
            return Ok(Relation::Unnest {
                exprs,
                with_ordinality,
            });
        }

        if self.at(&TokenKind::LeftParen) {
            if self.nth_is_query_start(1) {
                let query = self.parse_parenthesized_query()?;
                return Ok(Relation::Subquery(Box::new(query)));
            }
            self.advance();
            let relation = if self.at(&TokenKind::LeftParen) {
                match self.recurse(Self::parse_relation_primary)? {
                    Relation::Subquery(query)
                        if query.with.is_none()
                            && (self.at_query_continuation() || self.at(&TokenKind::RightParen)) =>
                    {
                        let query = self.continue_query(QueryBody::Nested(query))?;
                        self.expect(&TokenKind::RightParen)?;
                        return Ok(Relation::Subquery(Box::new(query)));
                    }
                    primary => {
                        let first = self.parse_sampled_relation_from(primary)?;
                        self.recurse(|p| p.parse_join_chain(first))?
                    }
                }
            } else {
                self.parse_relation()?
            };
            self.expect(&TokenKind::RightParen)?;
            return Ok(Relation::Parenthesized(Box::new(relation)));
        }

        self.note(Keyword::Unnest.quoted());
        self.note(TokenKind::LeftParen.describe());
        Ok(Relation::Table(self.parse_qualified_name()?))
    }
}
