//! End-to-end evaluator tests: source text in, value or error out.

use std::sync::Arc;

use kest_ir::Position;
use pretty_assertions::assert_eq;

use crate::{
    buffer_handler, builtin_error, silent_handler, Environment, EvalError, EvalErrorKind,
    EvalResult, Interpreter, InterpreterBuilder, Value,
};

fn run_with(interp: &mut Interpreter, source: &str) -> EvalResult {
    let program = match kest_parse::parse(source) {
        Ok(program) => program,
        Err(err) => panic!("parse failed for {source:?}: {err}"),
    };
    interp.evaluate(&program)
}

fn run(source: &str) -> EvalResult {
    let mut interp = InterpreterBuilder::new()
        .print_handler(silent_handler())
        .build();
    run_with(&mut interp, source)
}

fn eval_ok(source: &str) -> Value {
    match run(source) {
        Ok(value) => value,
        Err(err) => panic!("evaluation failed for {source:?}: {err} at {:?}", err.position),
    }
}

fn eval_err(source: &str) -> EvalError {
    match run(source) {
        Ok(value) => panic!("expected error for {source:?}, got {value:?}"),
        Err(err) => err,
    }
}

fn undefined(name: &str) -> EvalErrorKind {
    EvalErrorKind::UndefinedSymbol {
        name: name.to_string(),
    }
}

// ─── Expressions ─────────────────────────────────────────────────────────────

#[test]
fn precedence() {
    assert_eq!(eval_ok("1+2*3;"), Value::Int(7));
    assert_eq!(eval_ok("(1+2)*3;"), Value::Int(9));
    assert_eq!(eval_ok("2*3+4*5;"), Value::Int(26));
}

#[test]
fn subtraction_leans_right() {
    assert_eq!(eval_ok("10-5-2;"), Value::Int(7));
}

#[test]
fn string_concatenation_coerces() {
    assert_eq!(eval_ok(r#""a"+1;"#), Value::from("a1"));
    assert_eq!(eval_ok(r#""tab\tend";"#), Value::from("tab\tend"));
}

#[test]
fn number_literals() {
    assert_eq!(eval_ok("0x1f;"), Value::Int(31));
    assert_eq!(eval_ok("1.5e1;"), Value::Float(15.0));
    assert_eq!(eval_ok("7 / 2;"), Value::Float(3.5));
}

#[test]
fn out_of_range_literal_is_malformed() {
    let err = eval_err("x = 99999999999999999999;");
    assert_eq!(
        err.kind,
        EvalErrorKind::MalformedNumeral {
            literal: "99999999999999999999".to_string()
        }
    );
    assert_eq!(err.position, Some(Position::new(1, 5)));
}

#[test]
fn unary_operators() {
    assert_eq!(eval_ok("-3 + 1;"), Value::Int(-2));
    assert_eq!(eval_ok("!0;"), Value::Bool(true));
    assert_eq!(eval_ok("!!1;"), Value::Bool(true));
    assert_eq!(eval_ok(r#"+"12";"#), Value::Int(12));
}

#[test]
fn logical_operators_pick_operands() {
    assert_eq!(eval_ok(r#"0 || "fallback";"#), Value::from("fallback"));
    assert_eq!(eval_ok("1 && 2;"), Value::Int(2));
    assert_eq!(eval_ok("nil && 2;"), Value::Nil);
}

#[test]
fn logical_operators_evaluate_both_sides() {
    let err = eval_err("1 || missing;");
    assert_eq!(err.kind, undefined("missing"));
}

#[test]
fn comparisons_and_equality() {
    assert_eq!(eval_ok("2 > 1.5;"), Value::Bool(true));
    assert_eq!(eval_ok("nil == nil;"), Value::Bool(true));
    assert_eq!(eval_ok("nil == 0;"), Value::Bool(false));
    assert_eq!(eval_ok(r#""x" != "y";"#), Value::Bool(true));
}

#[test]
fn sequences() {
    assert_eq!(
        eval_ok("[1, 2] + 3;"),
        Value::Sequence(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
    assert_eq!(
        eval_ok(r#"[1, "a", nil];"#),
        Value::Sequence(vec![Value::Int(1), Value::from("a"), Value::Nil])
    );
    assert_eq!(eval_ok("[];"), Value::Sequence(Vec::new()));
}

#[test]
fn modulo_by_zero_is_located() {
    let err = eval_err("x = 1;\ny = x % 0;");
    assert_eq!(err.kind, EvalErrorKind::ModuloByZero);
    assert_eq!(err.position, Some(Position::new(2, 5)));
}

// ─── Names and assignment ────────────────────────────────────────────────────

#[test]
fn undefined_symbol_is_named() {
    let err = eval_err("1 + y;");
    assert_eq!(err.kind, undefined("y"));
    assert_eq!(err.to_string(), "undefined symbol `y`");
    assert_eq!(err.position, Some(Position::new(1, 5)));
}

#[test]
fn assignment_yields_value() {
    assert_eq!(eval_ok("a = b = 3; a + b;"), Value::Int(6));
}

#[test]
fn assignment_updates_enclosing_binding() {
    let source = "
        total = 1;
        if true {
            total = total + 1;
        }
        total;
    ";
    assert_eq!(eval_ok(source), Value::Int(2));
}

// ─── Scoping ─────────────────────────────────────────────────────────────────

#[test]
fn if_body_variables_vanish() {
    let err = eval_err("if true { t = 1; }\nt;");
    assert_eq!(err.kind, undefined("t"));
    assert_eq!(err.position, Some(Position::new(2, 1)));
}

#[test]
fn else_body_variables_vanish() {
    let err = eval_err("if false { } else { e = 1; }\ne;");
    assert_eq!(err.kind, undefined("e"));
}

#[test]
fn elif_body_runs_in_enclosing_scope() {
    assert_eq!(
        eval_ok("if false { } elif true { y = 5; }\ny;"),
        Value::Int(5)
    );
}

#[test]
fn for_init_visible_across_iterations_and_in_post() {
    let source = "
        seen = [];
        for i = 0; i < 3; i = i + 1 {
            seen = seen + i;
        }
        seen;
    ";
    assert_eq!(
        eval_ok(source),
        Value::Sequence(vec![Value::Int(0), Value::Int(1), Value::Int(2)])
    );
}

#[test]
fn for_init_vanishes_after_loop() {
    let err = eval_err("for i = 0; i < 3; i = i + 1 { }\ni;");
    assert_eq!(err.kind, undefined("i"));
}

#[test]
fn for_body_shares_loop_scope() {
    let source = "
        last = 0;
        for i = 0; i < 3; i = i + 1 {
            if i > 0 { last = carried; }
            carried = i;
        }
        last;
    ";
    assert_eq!(eval_ok(source), Value::Int(1));
}

// ─── Statement values ────────────────────────────────────────────────────────

#[test]
fn block_value_is_last_statement() {
    assert_eq!(eval_ok("if true { 1; 2; }"), Value::Int(2));
    assert_eq!(eval_ok("if true { }"), Value::Nil);
}

#[test]
fn unmatched_if_yields_last_condition() {
    assert_eq!(eval_ok("if 0 { 1; }"), Value::Int(0));
    assert_eq!(
        eval_ok(r#"if 0 { 1; } elif "" { 2; }"#),
        Value::from("")
    );
}

#[test]
fn for_yields_nil() {
    assert_eq!(eval_ok("for i = 0; i < 2; i = i + 1 { i; }"), Value::Nil);
}

#[test]
fn empty_program_is_nil() {
    assert_eq!(eval_ok(""), Value::Nil);
}

// ─── Control flow ────────────────────────────────────────────────────────────

#[test]
fn break_exits_loop() {
    let source = "
        n = 0;
        for ;; {
            n = n + 1;
            if n == 5 { break }
        }
        n;
    ";
    assert_eq!(eval_ok(source), Value::Int(5));
}

#[test]
fn continue_skips_to_post() {
    let source = "
        s = 0;
        for i = 0; i < 6; i = i + 1 {
            if i % 2 == 0 { continue }
            s = s + i;
        }
        s;
    ";
    assert_eq!(eval_ok(source), Value::Int(9));
}

#[test]
fn break_in_elif_reaches_loop() {
    let source = "
        n = 0;
        for ;; {
            n = n + 1;
            if n < 3 { } elif true { break }
        }
        n;
    ";
    assert_eq!(eval_ok(source), Value::Int(3));
}

#[test]
fn top_level_break_is_error() {
    let err = eval_err("1;\nbreak;");
    assert_eq!(err.to_string(), "unexpected break statement");
    assert_eq!(err.position, Some(Position::new(2, 1)));
}

#[test]
fn top_level_continue_is_error() {
    let err = eval_err("continue");
    assert_eq!(err.to_string(), "unexpected continue statement");
}

#[test]
fn break_cannot_escape_function() {
    let source = "func f() { break }\nfor i = 0; i < 1; i = i + 1 { f(); }";
    let err = eval_err(source);
    assert_eq!(err.to_string(), "unexpected break statement");
    assert_eq!(err.position, Some(Position::new(1, 12)));
}

#[test]
fn top_level_return_ends_program() {
    assert_eq!(eval_ok("1; return 42; missing;"), Value::Int(42));
    assert_eq!(eval_ok("return"), Value::Nil);
}

#[test]
fn return_unwinds_loop_inside_function() {
    let source = "
        func find() {
            for i = 0; ; i = i + 1 {
                if i == 3 { return i }
            }
        }
        find();
    ";
    assert_eq!(eval_ok(source), Value::Int(3));
}

// ─── Functions ───────────────────────────────────────────────────────────────

#[test]
fn function_without_return_is_nil() {
    assert_eq!(eval_ok("func f() { 1; }\nf();"), Value::Nil);
}

#[test]
fn function_literal_value_and_binding() {
    let value = eval_ok("func named() { }");
    assert_eq!(value.to_string(), "<func named>");
    assert_eq!(eval_ok("func named() { }\nnamed;").to_string(), "<func named>");
}

#[test]
fn anonymous_function_is_not_bound() {
    assert_eq!(
        eval_ok("sq = func(x) { return x * x };\nsq(7);"),
        Value::Int(49)
    );
    assert_eq!(eval_ok("func(x) { }").to_string(), "<func <anonymous>>");
}

#[test]
fn no_forward_reference() {
    let err = eval_err("f();\nfunc f() { }");
    assert_eq!(err.kind, undefined("f"));
}

#[test]
fn countdown_recurses_three_times() {
    let source = "
        calls = 0;
        func countdown(n) {
            if n > 0 {
                calls = calls + 1;
                countdown(n - 1);
            }
        }
        countdown(3);
        calls;
    ";
    assert_eq!(eval_ok(source), Value::Int(3));
}

#[test]
fn inner_function_sees_outer_parameters() {
    let source = "
        func outer(a) {
            func inner(b) { return a * b }
            return inner(10)
        }
        outer(4);
    ";
    assert_eq!(eval_ok(source), Value::Int(40));
}

#[test]
fn returned_closure_keeps_captured_parameters() {
    let source = "
        func adder(x) {
            return func(y) { return x + y }
        }
        add5 = adder(5);
        add5(3);
    ";
    assert_eq!(eval_ok(source), Value::Int(8));
}

#[test]
fn closures_share_captured_state() {
    let source = "
        func counter() {
            count = 0;
            return func() {
                count = count + 1;
                return count
            }
        }
        next = counter();
        next();
        next();
        next();
    ";
    assert_eq!(eval_ok(source), Value::Int(3));
}

#[test]
fn parameters_shadow_globals() {
    assert_eq!(
        eval_ok("x = 1;\nfunc f(x) { return x }\nf(2) + x;"),
        Value::Int(3)
    );
}

#[test]
fn arity_mismatch() {
    let err = eval_err("func f(a) { }\nf();");
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            name: "f".to_string(),
            expected: 1,
            got: 0,
        }
    );
    assert_eq!(err.position, Some(Position::new(2, 1)));
}

#[test]
fn calling_a_non_function() {
    let err = eval_err("x = 1; x();");
    assert_eq!(err.to_string(), "`x` is not callable: it is int");
    assert_eq!(err.position, Some(Position::new(1, 8)));
}

#[test]
fn innermost_position_is_kept() {
    let source = "func f() {\n  return missing\n}\nf();";
    let err = eval_err(source);
    assert_eq!(err.kind, undefined("missing"));
    assert_eq!(err.position, Some(Position::new(2, 10)));
}

// ─── Call depth ──────────────────────────────────────────────────────────────

#[test]
fn runaway_recursion_hits_call_depth_limit() {
    let mut interp = InterpreterBuilder::new()
        .max_call_depth(50)
        .print_handler(silent_handler())
        .build();
    let err = run_with(&mut interp, "func f(n) { return f(n + 1) }\nf(0);").unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::CallDepthExceeded { limit: 50 });
    assert_eq!(err.position, Some(Position::new(1, 20)));
    assert_eq!(interp.call_depth(), 0);
    let backtrace = err.backtrace.unwrap();
    assert_eq!(backtrace.frames().len(), 16);
    assert_eq!(backtrace.omitted(), 34);
    assert_eq!(backtrace.frames()[0].call_position, Position::new(1, 20));
}

#[test]
fn error_in_nested_call_carries_backtrace() {
    let source = "func inner() { return missing }
func outer() { return inner() }
outer();";
    let err = eval_err(source);
    assert_eq!(err.kind, undefined("missing"));
    let backtrace = err.backtrace.unwrap();
    let calls: Vec<_> = backtrace
        .frames()
        .iter()
        .map(|frame| (frame.name.as_str(), frame.call_position))
        .collect();
    assert_eq!(
        calls,
        vec![("inner", Position::new(2, 23)), ("outer", Position::new(3, 1))]
    );
}

#[test]
fn top_level_error_has_no_backtrace() {
    assert_eq!(eval_err("1 + y;").backtrace, None);
}

#[test]
fn deep_recursion_within_limit() {
    let source = "
        func down(n) {
            if n == 0 { return 0 }
            return down(n - 1)
        }
        down(3000);
    ";
    assert_eq!(eval_ok(source), Value::Int(0));
}

// ─── Host integration ────────────────────────────────────────────────────────

#[test]
fn host_natives_receive_evaluated_arguments() {
    let globals = Environment::new();
    globals.define(
        "sum",
        Value::native("sum", |args| {
            Ok(Value::Int(args.iter().map(Value::to_int).sum()))
        }),
    );
    let mut interp = InterpreterBuilder::new().env(globals).build();
    assert_eq!(run_with(&mut interp, "sum(1, 2 * 3, 4);"), Ok(Value::Int(11)));
}

#[test]
fn native_errors_are_located_at_call_site() {
    let globals = Environment::new();
    globals.define(
        "fail",
        Value::native("fail", |_| Err(builtin_error("fail", "refused"))),
    );
    let mut interp = InterpreterBuilder::new().env(globals).build();
    let err = run_with(&mut interp, "x = 1;\n  fail();").unwrap_err();
    assert_eq!(err.to_string(), "fail: refused");
    assert_eq!(err.position, Some(Position::new(2, 3)));
}

#[test]
fn natives_write_through_print_handler() {
    let handler = buffer_handler();
    let globals = Environment::new();
    let out = Arc::clone(&handler);
    globals.define(
        "say",
        Value::native("say", move |args| {
            for arg in args {
                out.print(&arg.to_string());
            }
            out.println("");
            Ok(Value::Nil)
        }),
    );
    let mut interp = InterpreterBuilder::new()
        .env(globals)
        .print_handler(Arc::clone(&handler))
        .build();
    run_with(&mut interp, r#"say("n=", 1 + 1);"#).unwrap();
    assert_eq!(interp.print_handler().get_output(), "n=2\n");
}

#[test]
fn globals_persist_across_evaluations() {
    let mut interp = Interpreter::new();
    run_with(&mut interp, "x = 10;").unwrap();
    assert_eq!(run_with(&mut interp, "x * 2;"), Ok(Value::Int(20)));
    assert_eq!(
        interp.global_env().get("x"),
        Ok(Value::Int(10))
    );
}

#[test]
fn owned_root_is_destroyed_on_drop() {
    let mut interp = Interpreter::new();
    run_with(&mut interp, "func f() { }\nx = 1;").unwrap();
    let root = interp.global_env().clone();
    drop(interp);
    assert!(root.bindings().is_empty());
}

#[test]
fn supplied_root_survives_drop() {
    let globals = Environment::new();
    let mut interp = InterpreterBuilder::new().env(globals.clone()).build();
    run_with(&mut interp, "x = 1;").unwrap();
    drop(interp);
    assert_eq!(globals.get("x"), Ok(Value::Int(1)));
}
