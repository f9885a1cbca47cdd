// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Per-backend compilation tests

use sqlexpr_compiler::{CompileError, CompiledSql, Compiler, DialectRegistry, QuirkDef};
use sqlexpr_function_registry::{
    avg, coalesce, concat, count, count_distinct, greatest, least, length, lower, now, substr,
    upper,
};
use sqlexpr_ir::{Dialect, Expr, FunctionId, Value};
use sqlexpr_semantic::resolve;
use sqlexpr_test_utils::{ExprFixtures, MockSchemaBuilder, SqlAssertions, init_tracing};

fn compile_with(compiler: &Compiler, expr: &Expr, dialect: Dialect) -> CompiledSql {
    init_tracing();
    let schema = MockSchemaBuilder::new()
        .with_people_schema()
        .with_library_schema()
        .build();
    let types = resolve(expr, &schema).unwrap();
    compiler.compile(expr, &types, dialect).unwrap()
}

fn compile(expr: &Expr, dialect: Dialect) -> CompiledSql {
    compile_with(&Compiler::new(DialectRegistry::standard().unwrap()), expr, dialect)
}

// ===== COALESCE =====

#[test]
fn test_coalesce_on_every_backend() {
    let expr = coalesce([
        Expr::field("alias"),
        Expr::field("goes_by"),
        Expr::field("name"),
    ])
    .unwrap();
    let expected = [
        (Dialect::PostgreSQL, "COALESCE(\"alias\", \"goes_by\", \"name\")"),
        (Dialect::MySQL, "COALESCE(`alias`, `goes_by`, `name`)"),
        (Dialect::SQLite, "COALESCE(\"alias\", \"goes_by\", \"name\")"),
        (Dialect::SqlServer, "COALESCE([alias], [goes_by], [name])"),
        (Dialect::Firebird, "COALESCE(\"alias\", \"goes_by\", \"name\")"),
    ];
    for (dialect, sql) in expected {
        let compiled = compile(&expr, dialect);
        SqlAssertions::assert_sql_eq(&compiled.sql, sql);
        assert!(compiled.params.is_empty());
    }
}

// ===== CONCAT =====

#[test]
fn test_concat_forms() {
    let expr = concat([Expr::field("name"), Expr::text("-"), Expr::field("alias")]).unwrap();

    let pg = compile(&expr, Dialect::PostgreSQL);
    assert_eq!(pg.sql, "CONCAT(\"name\", $1, \"alias\")");

    let mysql = compile(&expr, Dialect::MySQL);
    assert_eq!(mysql.sql, "CONCAT_WS('', `name`, ?, `alias`)");

    let sqlite = compile(&expr, Dialect::SQLite);
    assert_eq!(sqlite.sql, "(\"name\" || ? || COALESCE(\"alias\", ''))");

    let mssql = compile(&expr, Dialect::SqlServer);
    assert_eq!(mssql.sql, "CONCAT([name], @P1, [alias])");

    let firebird = compile(&expr, Dialect::Firebird);
    assert_eq!(firebird.sql, "(\"name\" || ? || COALESCE(\"alias\", ''))");

    for compiled in [pg, mysql, sqlite, mssql, firebird] {
        assert_eq!(compiled.params, vec![Value::from("-")]);
        SqlAssertions::assert_no_inline_strings(&compiled.sql, &compiled.params);
    }
}

#[test]
fn test_concat_wraps_nested_nullable_call() {
    let expr = concat([upper(Expr::field("goes_by")).unwrap(), Expr::field("name")]).unwrap();
    let compiled = compile(&expr, Dialect::SQLite);
    assert_eq!(compiled.sql, "(COALESCE(UPPER(\"goes_by\"), '') || \"name\")");
}

// ===== GREATEST / LEAST =====

#[test]
fn test_greatest_least_forms() {
    let g = ExprFixtures::greatest_score();
    assert_eq!(compile(&g, Dialect::PostgreSQL).sql, "GREATEST(\"age\", \"score\", $1)");
    assert_eq!(compile(&g, Dialect::MySQL).sql, "GREATEST(`age`, `score`, ?)");
    assert_eq!(compile(&g, Dialect::SQLite).sql, "MAX(\"age\", \"score\", ?)");
    assert_eq!(compile(&g, Dialect::SqlServer).sql, "GREATEST([age], [score], @P1)");
    assert_eq!(compile(&g, Dialect::Firebird).sql, "MAXVALUE(\"age\", \"score\", ?)");

    let l = least([Expr::field("age"), Expr::field("score")]).unwrap();
    assert_eq!(compile(&l, Dialect::SQLite).sql, "MIN(\"age\", \"score\")");
    assert_eq!(compile(&l, Dialect::Firebird).sql, "MINVALUE(\"age\", \"score\")");
}

// ===== LENGTH / LOWER / UPPER =====

#[test]
fn test_length_forms() {
    let expr = length(Expr::field("name")).unwrap();
    assert_eq!(compile(&expr, Dialect::PostgreSQL).sql, "LENGTH(\"name\")");
    assert_eq!(compile(&expr, Dialect::MySQL).sql, "CHAR_LENGTH(`name`)");
    assert_eq!(compile(&expr, Dialect::SQLite).sql, "LENGTH(\"name\")");
    assert_eq!(compile(&expr, Dialect::SqlServer).sql, "LEN([name])");
    assert_eq!(compile(&expr, Dialect::Firebird).sql, "CHAR_LENGTH(\"name\")");
}

#[test]
fn test_case_functions() {
    let expr = lower(upper(Expr::field("name")).unwrap()).unwrap();
    for dialect in Dialect::ALL {
        let compiled = compile(&expr, dialect);
        let quoted = dialect.quote_identifier("name");
        assert_eq!(compiled.sql, format!("LOWER(UPPER({quoted}))"));
    }
}

// ===== SUBSTR =====

#[test]
fn test_substr_window() {
    let expr = substr(Expr::field("name"), Expr::integer(1), Some(Expr::integer(5))).unwrap();
    let expected = [
        (Dialect::PostgreSQL, "SUBSTRING(\"name\", $1, $2)"),
        (Dialect::MySQL, "SUBSTRING(`name`, ?, ?)"),
        (Dialect::SQLite, "SUBSTR(\"name\", ?, ?)"),
        (Dialect::SqlServer, "SUBSTRING([name], @P1, @P2)"),
        (Dialect::Firebird, "SUBSTRING(\"name\" FROM ? FOR ?)"),
    ];
    for (dialect, sql) in expected {
        let compiled = compile(&expr, dialect);
        assert_eq!(compiled.sql, sql);
        assert_eq!(compiled.params, vec![Value::Integer(1), Value::Integer(5)]);
    }
}

#[test]
fn test_substr_rest_of_string() {
    let expr = ExprFixtures::name_tail();
    assert_eq!(compile(&expr, Dialect::PostgreSQL).sql, "SUBSTRING(\"name\", $1)");
    assert_eq!(compile(&expr, Dialect::SQLite).sql, "SUBSTR(\"name\", ?)");
    assert_eq!(compile(&expr, Dialect::Firebird).sql, "SUBSTRING(\"name\" FROM ?)");

    let mssql = compile(&expr, Dialect::SqlServer);
    assert_eq!(mssql.sql, "SUBSTRING([name], @P1, DATALENGTH([name]))");
    SqlAssertions::assert_numbered_placeholders(&mssql.sql, "@P", 1);
    assert_eq!(mssql.params, vec![Value::Integer(2)]);
}

#[test]
fn test_synthesized_substr_position_past_end() {
    // the window length does not depend on the position, so it cannot go negative
    let expr = substr(Expr::field("name"), Expr::integer(10), None).unwrap();
    let compiled = compile(&expr, Dialect::SqlServer);
    assert_eq!(compiled.sql, "SUBSTRING([name], @P1, DATALENGTH([name]))");
    assert!(!compiled.sql.contains(" - "));
    assert_eq!(compiled.params, vec![Value::Integer(10)]);
}

#[test]
fn test_synthesized_substr_falls_back_to_length() {
    let registry = DialectRegistry::builder()
        .with_defaults()
        .with_override(
            Some("sqlserver"),
            QuirkDef::new(FunctionId::Substr, "SUBSTRING({0}, {1}, {2})"),
        )
        .build()
        .unwrap();
    let schema = MockSchemaBuilder::new().with_people_schema().build();
    let expr = ExprFixtures::name_tail();
    let types = resolve(&expr, &schema).unwrap();
    let compiled = Compiler::new(registry)
        .compile(&expr, &types, Dialect::SqlServer)
        .unwrap();
    assert_eq!(compiled.sql, "SUBSTRING([name], @P1, LENGTH([name]))");
    assert_eq!(compiled.params, vec![Value::Integer(2)]);
}

#[test]
fn test_synthesized_substr_duplicates_params_in_text_order() {
    // SUBSTR(CONCAT(name, '!'), 3) on SQL Server
    let text = concat([Expr::field("name"), Expr::text("!")]).unwrap();
    let expr = substr(text, Expr::integer(3), None).unwrap();
    let compiled = compile(&expr, Dialect::SqlServer);
    assert_eq!(
        compiled.sql,
        "SUBSTRING(CONCAT([name], @P1), @P2, DATALENGTH(CONCAT([name], @P3)))"
    );
    assert_eq!(
        compiled.params,
        vec![Value::from("!"), Value::Integer(3), Value::from("!")]
    );
}

#[test]
fn test_substr_without_rest_or_length_entry() {
    let registry = DialectRegistry::builder()
        .with_override(
            Some("sqlserver"),
            QuirkDef::new(FunctionId::Substr, "SUBSTRING({0}, {1}, {2})"),
        )
        .build()
        .unwrap();
    let schema = MockSchemaBuilder::new().with_people_schema().build();
    let expr = ExprFixtures::name_tail();
    let types = resolve(&expr, &schema).unwrap();
    let err = Compiler::new(registry)
        .compile(&expr, &types, Dialect::SqlServer)
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnsupportedOnBackend {
            function: FunctionId::Substr,
            detail: Some(_),
            ..
        }
    ));
}

// ===== NOW =====

#[test]
fn test_now_forms() {
    let expr = now().unwrap();
    assert_eq!(compile(&expr, Dialect::PostgreSQL).sql, "STATEMENT_TIMESTAMP()");
    assert_eq!(compile(&expr, Dialect::MySQL).sql, "CURRENT_TIMESTAMP(6)");
    assert_eq!(
        compile(&expr, Dialect::SQLite).sql,
        "STRFTIME('%Y-%m-%d %H:%M:%f', 'NOW')"
    );
    assert_eq!(compile(&expr, Dialect::SqlServer).sql, "SYSDATETIME()");
    assert_eq!(compile(&expr, Dialect::Firebird).sql, "CURRENT_TIMESTAMP");
}

// ===== Aggregates =====

#[test]
fn test_aggregates() {
    let expr = count_distinct(Expr::field("alias")).unwrap();
    assert_eq!(compile(&expr, Dialect::MySQL).sql, "COUNT(DISTINCT `alias`)");

    let expr = count(lower(Expr::field("name")).unwrap()).unwrap();
    assert_eq!(compile(&expr, Dialect::PostgreSQL).sql, "COUNT(LOWER(\"name\"))");

    let expr = avg(Expr::field("age")).unwrap();
    assert_eq!(compile(&expr, Dialect::PostgreSQL).sql, "AVG(\"age\")");
    assert_eq!(
        compile(&expr, Dialect::SqlServer).sql,
        "AVG(CAST([age] AS DECIMAL(38, 10)))"
    );
}

// ===== Determinism and placeholders =====

#[test]
fn test_compile_is_deterministic() {
    let fixtures = [
        ExprFixtures::display_name(),
        ExprFixtures::name_with_alias(),
        ExprFixtures::name_prefix(),
        ExprFixtures::name_tail(),
        ExprFixtures::greatest_score(),
        ExprFixtures::least_height(),
        ExprFixtures::joined_or_now(),
    ];
    let compiler = Compiler::new(DialectRegistry::standard().unwrap());
    for expr in &fixtures {
        for dialect in Dialect::ALL {
            let first = compile_with(&compiler, expr, dialect);
            let second = compile_with(&compiler, expr, dialect);
            assert_eq!(first, second, "{dialect}");
        }
    }
}

#[test]
fn test_placeholder_styles_consistent() {
    let expr = concat([
        Expr::text("a"),
        greatest([Expr::field("name"), Expr::text("b")]).unwrap(),
        Expr::text("c"),
    ])
    .unwrap();

    let pg = compile(&expr, Dialect::PostgreSQL);
    SqlAssertions::assert_numbered_placeholders(&pg.sql, "$", 3);
    let mysql = compile(&expr, Dialect::MySQL);
    SqlAssertions::assert_question_marks(&mysql.sql, 3);
    assert_eq!(mysql.params, vec![Value::from("a"), Value::from("b"), Value::from("c")]);
}

#[test]
fn test_shared_registry_across_threads() {
    let compiler = Compiler::new(DialectRegistry::standard().unwrap());
    let handles: Vec<_> = Dialect::ALL
        .into_iter()
        .map(|dialect| {
            let compiler = compiler.clone();
            std::thread::spawn(move || {
                compile_with(&compiler, &ExprFixtures::display_name(), dialect)
            })
        })
        .collect();
    for handle in handles {
        let compiled = handle.join().unwrap();
        assert_eq!(compiled.params, vec![Value::from("Unknown")]);
    }
}
