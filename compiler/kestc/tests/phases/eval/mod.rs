//! Evaluation phase tests: complete scripts with the host built-ins.

use kest_eval::Value;
use pretty_assertions::assert_eq;

use crate::common::{output, run, run_err};

#[test]
fn fibonacci() {
    let source = "
        func fib(n) {
            if n < 2 { return n }
            return fib(n - 1) + fib(n - 2)
        }
        println(fib(15));
    ";
    assert_eq!(output(source), "610\n");
}

#[test]
fn loop_with_print() {
    let source = "
        for i = 1; i <= 3; i = i + 1 {
            print(i, \" \");
        }
        println(\"done\");
    ";
    assert_eq!(output(source), "1 2 3 done\n");
}

#[test]
fn print_returns_nil() {
    let (value, out) = run("print(\"x\");");
    assert_eq!(value, Value::Nil);
    assert_eq!(out, "x");
}

#[test]
fn println_without_arguments() {
    assert_eq!(output("println();"), "\n");
}

#[test]
fn value_printing() {
    let source = r#"
        println(1.5, " ", 2 / 4, " ", nil, " ", true);
        println([1, "two", [3]]);
        println(println);
        func f() { }
        println(f);
    "#;
    assert_eq!(
        output(source),
        "1.5 0.5 nil true\n[1, two, [3]]\n<func println>\n<func f>\n"
    );
}

#[test]
fn string_building() {
    let source = r#"
        s = "";
        for i = 0; i < 3; i = i + 1 {
            s = s + i + ",";
        }
        println(s, "ab" * 2);
    "#;
    assert_eq!(output(source), "0,1,2,abab\n");
}

#[test]
fn closures_over_loop_state() {
    let source = "
        func make_counter(step) {
            total = 0;
            return func() {
                total = total + step;
                return total
            }
        }
        by2 = make_counter(2);
        by3 = make_counter(3);
        by2();
        by3();
        println(by2(), \" \", by3());
    ";
    assert_eq!(output(source), "4 6\n");
}

#[test]
fn elif_chain() {
    let source = r#"
        func classify(n) {
            if n < 0 {
                return "negative"
            } elif n == 0 {
                return "zero"
            } else {
                return "positive"
            }
        }
        println(classify(-1), classify(0), classify(5));
    "#;
    assert_eq!(output(source), "negativezeropositive\n");
}

#[test]
fn nested_loops_break_inner_only() {
    let source = "
        hits = 0;
        for i = 0; i < 3; i = i + 1 {
            for j = 0; ; j = j + 1 {
                if j == 2 { break }
                hits = hits + 1;
            }
        }
        hits;
    ";
    assert_eq!(run(source).0, Value::Int(6));
}

#[test]
fn runtime_error_rendering() {
    assert_eq!(
        run_err("println(1);\nprintln(missing);"),
        "test.kest:line 2:column 9: undefined symbol `missing`"
    );
    assert_eq!(
        run_err("x = 10 % 0;"),
        "test.kest:line 1:column 5: modulo by zero"
    );
    assert_eq!(
        run_err("func f(a, b) { }\nf(1);"),
        "test.kest:line 2:column 1: function `f` takes 2 arguments, got 1"
    );
}

#[test]
fn output_before_error_is_kept() {
    let handler = kest_eval::buffer_handler();
    let result = kestc::run_source(
        "println(\"before\");\nboom();",
        &kestc::Options::default(),
        handler.clone(),
    );
    assert!(result.is_err());
    assert_eq!(handler.get_output(), "before\n");
}

#[test]
fn uppercase_hex_prefix_fails_before_running() {
    assert_eq!(
        run_err("println(1);\nx = 0X10;"),
        "test.kest:line 2:column 5: identifier starts immediately after numeric literal `0`"
    );
    assert_eq!(run("x = 0x10;").0, Value::Int(16));
}

#[test]
fn long_operator_chain_runs_and_is_released() {
    let terms = vec!["1"; 300_000].join(" + ");
    let (value, _) = run(&format!("x = {terms};"));
    assert_eq!(value, Value::Int(300_000));
}
