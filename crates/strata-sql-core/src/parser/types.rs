//! Type grammar.

use super::parser::{PResult, Parser};
use crate::ast::{DataType, RowField, TypeParameter};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// Parses a type, including any postfix `ARRAY` suffixes.
    pub(super) fn parse_type(&mut self) -> PResult<DataType> {
        self.recurse(|p| {
            let mut data_type = p.parse_type_base()?;
            while p.eat_keyword(Keyword::Array) {
                data_type = DataType::array_of(data_type);
            }
            Ok(data_type)
        })
    }

    fn parse_type_base(&mut self) -> PResult<DataType> {
        if self.at_keyword(Keyword::Array) && self.nth_is(1, &TokenKind::Lt) {
            self.advance();
            self.advance();
            let element = self.parse_type()?;
            self.expect(&TokenKind::Gt)?;
            return Ok(DataType::array_of(element));
        }

        if self.at_keyword(Keyword::Map) && self.nth_is(1, &TokenKind::Lt) {
            self.advance();
            self.advance();
            let key = self.parse_type()?;
            self.expect(&TokenKind::Comma)?;
            let value = self.parse_type()?;
            self.expect(&TokenKind::Gt)?;
            return Ok(DataType::Map(Box::new(key), Box::new(value)));
        }

        if self.at_keyword(Keyword::Row) && self.nth_is(1, &TokenKind::LeftParen) {
            self.advance();
            self.advance();
            let mut fields = vec![self.parse_row_field()?];
            while self.eat(&TokenKind::Comma) {
                fields.push(self.parse_row_field()?);
            }
            self.expect(&TokenKind::RightParen)?;
            return Ok(DataType::Row(fields));
        }

        let name = self.parse_base_type_name()?;
        let mut parameters = Vec::new();
        if self.eat(&TokenKind::LeftParen) {
            parameters.push(self.parse_type_parameter()?);
            while self.eat(&TokenKind::Comma) {
                parameters.push(self.parse_type_parameter()?);
            }
            self.expect(&TokenKind::RightParen)?;
        }
        Ok(DataType::Base { name, parameters })
    }

    fn parse_row_field(&mut self) -> PResult<RowField> {
        let name = self.parse_identifier()?;
        let data_type = self.parse_type()?;
        Ok(RowField { name, data_type })
    }

    fn parse_type_parameter(&mut self) -> PResult<TypeParameter> {
        if let TokenKind::Integer(value) = self.peek().kind {
            self.advance();
            return Ok(TypeParameter::Integer(value));
        }
        self.note(TokenKind::Integer(0).describe());
        Ok(TypeParameter::Type(self.parse_type()?))
    }

    /// The name of a base type: a multi-word name, or an identifier,
    /// upper-cased unless quoted.
    fn parse_base_type_name(&mut self) -> PResult<String> {
        for keyword in [Keyword::Time, Keyword::Timestamp] {
            if self.at_keyword(keyword)
                && self.nth_is_keyword(1, Keyword::With)
                && self.nth_is_keyword(2, Keyword::Time)
                && self.nth_is_keyword(3, Keyword::Zone)
            {
                for _ in 0..4 {
                    self.advance();
                }
                return Ok(format!("{} WITH TIME ZONE", keyword.as_str()));
            }
        }

        let is_word = |text: &str, word: &str| text.eq_ignore_ascii_case(word);
        if matches!(self.peek().kind, TokenKind::Identifier(_))
            && is_word(&self.peek().text, "DOUBLE")
            && matches!(self.peek_nth(1).kind, TokenKind::Identifier(_))
            && is_word(&self.peek_nth(1).text, "PRECISION")
        {
            self.advance();
            self.advance();
            return Ok(String::from("DOUBLE PRECISION"));
        }

        let identifier = self.parse_identifier()?;
        Ok(if identifier.quoted {
            identifier.value
        } else {
            identifier.value.to_ascii_uppercase()
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{DataType, Expr, TypeParameter};
    use crate::parse_expression;

    fn cast_type(type_sql: &str) -> DataType {
        match parse_expression(&format!("CAST(x AS {type_sql})")).unwrap() {
            Expr::Cast { data_type, .. } => data_type,
            other => panic!("expected CAST, got {other:?}"),
        }
    }

    #[test]
    fn test_postfix_array_repeats() {
        assert_eq!(
            cast_type("INT ARRAY ARRAY"),
            DataType::array_of(DataType::array_of(DataType::named("INT")))
        );
    }

    #[test]
    fn test_base_type_name_is_upper_cased() {
        assert_eq!(cast_type("bigint"), DataType::named("BIGINT"));
        assert_eq!(cast_type("\"MyType\""), DataType::named("MyType"));
    }

    #[test]
    fn test_parameterized_types() {
        let DataType::Base { name, parameters } = cast_type("decimal(10, 2)") else {
            panic!("expected base type");
        };
        assert_eq!(name, "DECIMAL");
        assert_eq!(
            parameters,
            vec![TypeParameter::Integer(10), TypeParameter::Integer(2)]
        );

        let DataType::Base { parameters, .. } = cast_type("foo(bar(1))") else {
            panic!("expected base type");
        };
        assert!(matches!(parameters[0], TypeParameter::Type(_)));
    }

    #[test]
    fn test_nested_generic_types() {
        assert_eq!(
            cast_type("MAP<VARCHAR, ARRAY<BIGINT>>"),
            DataType::Map(
                Box::new(DataType::named("VARCHAR")),
                Box::new(DataType::array_of(DataType::named("BIGINT")))
            )
        );
        assert!(matches!(cast_type("ROW(a INT, b VARCHAR)"), DataType::Row(f) if f.len() == 2));
    }

    #[test]
    fn test_multi_word_types() {
        assert_eq!(
            cast_type("timestamp with time zone"),
            DataType::named("TIMESTAMP WITH TIME ZONE")
        );
        assert_eq!(cast_type("TIME WITH TIME ZONE"), DataType::named("TIME WITH TIME ZONE"));
        assert_eq!(cast_type("double precision"), DataType::named("DOUBLE PRECISION"));
        assert_eq!(cast_type("time"), DataType::named("TIME"));
    }
}
