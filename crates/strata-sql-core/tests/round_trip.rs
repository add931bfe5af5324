//! Tests that the canonical rendering parses back to the same tree.

mod common;
use common::*;

#[test]
fn round_trip_queries() {
    for sql in [
        "SELECT 1",
        "SELECT DISTINCT a, b AS bee, t.* FROM t WHERE a > 1 AND NOT b",
        "SELECT a FROM t GROUP BY ALL a, ROLLUP (b, c), GROUPING SETS ((d), ()) HAVING count(*) > 1",
        "SELECT * FROM a LEFT JOIN b ON a.id = b.id CROSS JOIN c NATURAL JOIN d",
        "SELECT * FROM a JOIN b JOIN c ON y ON x",
        "SELECT * FROM a JOIN b USING (id, ds)",
        "SELECT * FROM (a JOIN b ON p) AS j (x, y)",
        "SELECT * FROM t u TABLESAMPLE SYSTEM (5)",
        "SELECT * FROM UNNEST(ARRAY[1, 2]) WITH ORDINALITY AS x (v, n)",
        "SELECT * FROM ((SELECT 1))",
        "WITH RECURSIVE t (n) AS (SELECT 1) SELECT n FROM t ORDER BY n DESC NULLS FIRST LIMIT 10",
        "SELECT 1 UNION ALL SELECT 2 INTERSECT SELECT 3 EXCEPT DISTINCT SELECT 4",
        "(SELECT 1 UNION SELECT 2) ORDER BY 1 LIMIT ALL",
        "TABLE hive.web.orders",
        "VALUES (1, 'a'), (2, 'b')",
        "SELECT 1 AS \"select\", \"Mixed Case\" FROM \"from\"",
    ] {
        round_trip(sql);
    }
}

#[test]
fn round_trip_expressions() {
    for sql in [
        "a - (b - c)",
        "(a - b) - c",
        "-(-1)",
        "- -1",
        "a || b || c",
        "NOT (a OR b) AND c",
        "x BETWEEN 1 + 1 AND 3 * 2",
        "x NOT IN (1, 2) OR y IN (SELECT z FROM t)",
        "s LIKE 'a%' ESCAPE '!'",
        "x IS NOT DISTINCT FROM y",
        "x = ANY (SELECT y FROM t)",
        "CASE x WHEN 1 THEN 'a' ELSE 'b' END",
        "CASE WHEN a > 1 THEN b END",
        "TRY_CAST(x AS MAP<VARCHAR, ARRAY<ROW(a BIGINT, b \"lower\")>>)",
        "CAST(x AS DECIMAL(10, 2) ARRAY)",
        "CAST(x AS TIMESTAMP WITH TIME ZONE)",
        "EXTRACT(DAY FROM ts) + POSITION('a' IN s)",
        "SUBSTRING(s FROM 1 FOR 2)",
        "NORMALIZE(s, NFD)",
        "CURRENT_TIME(3) AT TIME ZONE 'UTC'",
        "ts AT TIME ZONE INTERVAL -'1' HOUR",
        "INTERVAL '1-2' YEAR TO MONTH",
        "DATE '2020-01-01'",
        "X'CAFE'",
        "1.50 + 2E10",
        "'it''s'",
        "ROW (1)",
        "(1, 2)",
        "ARRAY[1, 2][1].f",
        "a.b.c[0]",
        "count(*) FILTER (WHERE x > 0)",
        "sum(DISTINCT x) OVER (PARTITION BY a ORDER BY b ROWS BETWEEN 1 PRECEDING AND CURRENT ROW)",
        "transform(xs, x -> x * 2)",
        "reduce(xs, 0, (s, x) -> s + x, s -> s)",
        "EXISTS (SELECT 1)",
        "(SELECT max(x) FROM t) + 1",
        "? + ?",
    ] {
        round_trip_expr(sql);
    }
}

#[test]
fn round_trip_statements() {
    for sql in [
        "USE hive.web",
        "CREATE SCHEMA IF NOT EXISTS s WITH (location = 's3://x')",
        "DROP SCHEMA s CASCADE",
        "ALTER SCHEMA s RENAME TO t",
        "CREATE TABLE IF NOT EXISTS t (a BIGINT COMMENT 'id', LIKE u INCLUDING PROPERTIES) WITH (format = 'ORC')",
        "CREATE TABLE t WITH (a = 1) AS SELECT 1 WITH NO DATA",
        "DROP TABLE IF EXISTS t",
        "INSERT INTO t (a, b) SELECT 1, 2",
        "DELETE FROM t WHERE a = 1",
        "ALTER TABLE t RENAME TO u",
        "ALTER TABLE t RENAME COLUMN a TO b",
        "ALTER TABLE t ADD COLUMN c ARRAY<BIGINT>",
        "ALTER TABLE t DROP COLUMN c",
        "CREATE OR REPLACE VIEW v AS SELECT 1",
        "DROP VIEW IF EXISTS v",
        "CALL p(a => 1, 2)",
        "GRANT SELECT, INSERT ON TABLE t TO u WITH GRANT OPTION",
        "REVOKE GRANT OPTION FOR ALL PRIVILEGES ON t FROM u",
        "SHOW GRANTS ON TABLE t",
        "EXPLAIN ANALYZE (FORMAT JSON, TYPE LOGICAL) SELECT 1",
        "SHOW CREATE TABLE t",
        "SHOW CREATE VIEW v",
        "SHOW TABLES FROM s LIKE 'a%'",
        "SHOW SCHEMAS IN c LIKE 'b%'",
        "SHOW CATALOGS LIKE 'h%'",
        "DESCRIBE t",
        "SHOW STATS FOR t",
        "SHOW FUNCTIONS",
        "SHOW SESSION",
        "SET SESSION a.b = 'x'",
        "RESET SESSION a.b",
        "START TRANSACTION ISOLATION LEVEL SERIALIZABLE, READ WRITE",
        "COMMIT",
        "ROLLBACK",
        "SHOW PARTITIONS FROM t WHERE ds > '1' ORDER BY ds LIMIT 3",
        "PREPARE q FROM INSERT INTO t VALUES (?)",
        "DEALLOCATE PREPARE q",
        "EXECUTE q USING 1, 'a'",
        "DESCRIBE INPUT q",
        "DESCRIBE OUTPUT q",
    ] {
        round_trip(sql);
    }
}

#[test]
fn canonical_rendering_parenthesises_nested_operators() {
    assert_eq!(round_trip_expr("a * (b + c)"), "a * (b + c)");
    assert_eq!(round_trip_expr("a OR b AND c"), "a OR (b AND c)");
}

#[test]
fn canonical_rendering_quotes_reserved_identifiers() {
    let rendered = round_trip("SELECT \"select\" FROM t");
    assert_eq!(rendered, "SELECT \"select\" FROM t");
}

#[test]
fn canonical_rendering_keeps_case_operand_grouped() {
    assert_eq!(
        round_trip("SELECT CASE (a = 1) WHEN true THEN 1 END"),
        "SELECT CASE (a = 1) WHEN TRUE THEN 1 END"
    );
    assert_eq!(
        round_trip_expr("CASE (x IN (1, 2)) WHEN TRUE THEN 1 END"),
        "CASE (x IN (1, 2)) WHEN TRUE THEN 1 END"
    );
    assert_eq!(round_trip_expr("CASE (a + 1) WHEN 2 THEN 1 END"), "CASE (a + 1) WHEN 2 THEN 1 END");
}

#[test]
fn canonical_rendering_leaves_delimited_bases_bare() {
    for sql in [
        "(SELECT x).y",
        "(SELECT a)[1]",
        "((SELECT x)).y",
        "CAST(r AS ROW(x BIGINT)).x",
        "CASE WHEN a THEN r END.f",
        "ARRAY[ARRAY[1]][1][1]",
    ] {
        assert_eq!(round_trip_expr(sql), sql);
    }
}
