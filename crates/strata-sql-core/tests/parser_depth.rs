//! Tests for the nesting limit on adversarial input.

mod common;
use common::*;

use std::thread;

use std::time::{Duration, Instant};

use strata_sql_core::{Parser, ParserOptions};

const STACK_SIZE: usize = 32 * 1024 * 1024;

fn on_big_stack<F: FnOnce() + Send + 'static>(f: F) {
    thread::Builder::new()
        .stack_size(STACK_SIZE)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap();
}

fn nested_parens(depth: usize) -> String {
    format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn moderate_nesting_parses() {
    on_big_stack(|| {
        let _ = parse_expr(&nested_parens(20));
        let _ = parse(&format!("SELECT {}", nested_parens(20)));
    });
}

#[test]
fn deep_parentheses_fail_cleanly() {
    on_big_stack(|| {
        let err = parse_expr_err(&nested_parens(10_000));
        assert!(err.message.contains("stack overflow"), "{}", err.message);
        assert!(err.message.contains("32"), "{}", err.message);
    });
}

#[test]
fn deep_subqueries_fail_cleanly() {
    on_big_stack(|| {
        let sql = format!(
            "SELECT * FROM {}t{}",
            "(SELECT * FROM ".repeat(2_000),
            ")".repeat(2_000)
        );
        let err = parse_err(&sql);
        assert!(err.message.contains("stack overflow"), "{}", err.message);
    });
}

#[test]
fn deep_unary_chain_fails_cleanly() {
    on_big_stack(|| {
        let sql = format!("{}1", "- ".repeat(5_000));
        let err = parse_expr_err(&sql);
        assert!(err.message.contains("stack overflow"), "{}", err.message);
    });
}

#[test]
fn deep_types_fail_cleanly() {
    on_big_stack(|| {
        let sql = format!(
            "CAST(x AS {}INT{})",
            "ARRAY<".repeat(1_000),
            ">".repeat(1_000)
        );
        let err = parse_expr_err(&sql);
        assert!(err.message.contains("stack overflow"), "{}", err.message);
    });
}

#[test]
fn deep_explain_chain_fails_cleanly() {
    on_big_stack(|| {
        let sql = format!("{}SELECT 1", "EXPLAIN ".repeat(500));
        let err = parse_err(&sql);
        assert!(err.message.contains("stack overflow"), "{}", err.message);
    });
}

/// Inputs that nest far past the default limit, one per recursive construct.
fn adversarial_statements() -> Vec<String> {
    vec![
        format!(
            "SELECT * FROM {}t{}",
            "(SELECT * FROM ".repeat(2_000),
            ")".repeat(2_000)
        ),
        format!("SELECT {}", nested_parens(10_000)),
        format!("SELECT {}1{}", "(1 + ".repeat(2_000), ")".repeat(2_000)),
        format!("SELECT {}1{}", "CASE WHEN a THEN ".repeat(2_000), " END".repeat(2_000)),
        format!("SELECT {}", "x -> ".repeat(2_000) + "x"),
        format!(
            "SELECT 1 WHERE a IN {}SELECT 1{}",
            "(SELECT 1 WHERE a IN ".repeat(2_000),
            ")".repeat(2_000)
        ),
        format!("{}SELECT 1{}", "WITH q AS (".repeat(2_000), ") SELECT 1".repeat(2_000)),
        format!("SELECT * FROM {}t{}", "(".repeat(5_000), ")".repeat(5_000)),
        format!("SELECT {}1", "NOT ".repeat(5_000)),
        format!("{}SELECT 1", "EXPLAIN ".repeat(2_000)),
    ]
}

#[test]
fn default_limit_fits_a_default_thread_stack() {
    // `thread::spawn` uses the standard 2 MiB stack
    thread::spawn(|| {
        for sql in adversarial_statements() {
            let err = parse_err(&sql);
            assert!(
                err.message.contains("stack overflow"),
                "{}: {}",
                &sql[..40],
                err.message
            );
        }
    })
    .join()
    .unwrap();
}

#[test]
fn nested_joins_parse_in_linear_time() {
    let n = 100;
    let mut sql = String::from("SELECT * FROM a0");
    for i in 1..n {
        sql.push_str(&format!(" JOIN (a{i}"));
    }
    sql.push_str(&")".repeat(n - 1));

    let options = ParserOptions::new().with_max_depth(10_000);
    on_big_stack(move || {
        let start = Instant::now();
        let statement = Parser::with_options(&sql, options).parse_statement();
        assert!(statement.is_ok(), "{statement:?}");
        assert!(start.elapsed() < Duration::from_secs(2), "{:?}", start.elapsed());
    });
}

#[test]
fn nested_subquery_operands_parse_in_linear_time() {
    let n = 60;
    let sql = format!(
        "SELECT {}1{}",
        "((SELECT ".repeat(n),
        ") + 1)".repeat(n)
    );
    let in_lists = format!(
        "SELECT 1 WHERE x IN {}(1){}",
        "((SELECT 1 WHERE x IN ".repeat(n),
        ") UNION (SELECT 2))".repeat(n)
    );
    let relations = format!(
        "SELECT * FROM {}t{}",
        "((SELECT * FROM ".repeat(n),
        ") x JOIN y ON p)".repeat(n)
    );
    let calls = format!("SELECT {}1{}", "position(".repeat(n), ", 2)".repeat(n));

    on_big_stack(move || {
        for sql in [sql, in_lists, relations, calls] {
            let options = ParserOptions::new().with_max_depth(10_000);
            let start = Instant::now();
            let statement = Parser::with_options(&sql, options).parse_statement();
            assert!(statement.is_ok(), "{}: {statement:?}", &sql[..40]);
            assert!(start.elapsed() < Duration::from_secs(2), "{:?}", start.elapsed());
        }
    });
}

#[test]
fn max_depth_is_configurable() {
    on_big_stack(|| {
        let sql = nested_parens(150);
        let options = ParserOptions::new().with_max_depth(1_000);
        assert!(Parser::with_options(&sql, options).parse_expression().is_ok());

        let options = ParserOptions::new().with_max_depth(5);
        assert!(Parser::with_options(&nested_parens(10), options)
            .parse_expression()
            .is_err());
    });
}

#[test]
fn parsers_run_in_parallel() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::Builder::new()
                .stack_size(STACK_SIZE)
                .spawn(move || parse(&format!("SELECT a + {i} FROM t{i}")).to_string())
                .unwrap()
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("SELECT a + {i} FROM t{i}"));
    }
}
