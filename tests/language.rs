use std::fs::{self};

use linger::{
    ast::Position,
    config::Config,
    error::{Error, ParseErrorKind, RuntimeErrorKind},
    interpreter::value::core::Value,
    run_source, run_source_with_config,
};
use walkdir::WalkDir;

#[test]
fn demo_programs_run() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "ling"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let mut out = Vec::new();
        if let Err(e) = run_source(&source, &mut out) {
            panic!("Demo {path:?} failed:\n{source}\nError: {e}");
        }
    }

    assert!(count > 0, "No demo programs found in demos");
}

fn run(src: &str) -> (Result<Value, Error>, String) {
    let mut out = Vec::new();
    let result = run_source(src, &mut out);
    (result, String::from_utf8(out).expect("output is UTF-8"))
}

/// Runs `src` and returns what it printed.
fn assert_success(src: &str) -> String {
    match run(src) {
        (Ok(_), out) => out,
        (Err(e), _) => panic!("Script failed: {e}"),
    }
}

fn assert_returns(src: &str, expected: Value) {
    match run(src) {
        (Ok(value), _) => assert_eq!(value, expected, "wrong result for:\n{src}"),
        (Err(e), _) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match run(src) {
        (Ok(value), _) => panic!("Script succeeded with {value} but was expected to fail"),
        (Err(e), _) => e,
    }
}

fn assert_parse_error(src: &str, kind: ParseErrorKind) {
    match assert_failure(src) {
        Error::Parse(e) => assert_eq!(e.kind(), kind, "unexpected error: {e}"),
        Error::Runtime(e) => panic!("expected a parse error, got {e}"),
    }
}

fn assert_runtime_error(src: &str, kind: RuntimeErrorKind) {
    match assert_failure(src) {
        Error::Runtime(e) => assert_eq!(e.kind(), kind, "unexpected error: {e}"),
        Error::Parse(e) => panic!("expected a runtime error, got {e}"),
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_returns("proc main() { return 1 + 2 * 3; }", Value::Int(7));
    assert_returns("proc main() { return (1 + 2) * 3; }", Value::Int(9));
    assert_returns("proc main() { return 7 % 4 - 1; }", Value::Int(2));
    assert_returns("proc main() { return -2 * 3; }", Value::Int(-6));
    assert_returns("proc main() { return 1 < 2 == true; }", Value::Bool(true));
    assert_returns("proc main() { return 1.5 * 2; }", Value::Float(3.0));
}

#[test]
fn division_binds_like_addition() {
    // (1 + 6) / 3
    assert_returns("proc main() { return 1 + 6 / 3; }", Value::Int(2));
    // 8 / (2 * 2)
    assert_returns("proc main() { return 8 / 2 * 2; }", Value::Int(2));
    assert_returns("proc main() { return 2 * 6 / 3; }", Value::Int(4));
}

#[test]
fn for_loop_with_continue() {
    let out = assert_success(
                             "proc main() {
            for (let i = 0; i < 3; i++) {
                if (i == 1) { continue; }
                print(i);
            }
        }",
    );
    assert_eq!(out, "02");
}

#[test]
fn for_loop_can_reuse_an_outer_variable() {
    assert_returns("proc main() {
            let i = 10;
            let seen = 0;
            for (i = 0; i < 3; i++) {
                if (i == 1) { continue; }
                seen += 1;
            }
            return i * 10 + seen;
        }",
                   Value::Int(32));
}

#[test]
fn while_loop_with_break() {
    assert_returns("proc main() {
            let n = 0;
            while (true) {
                n += 1;
                if (n >= 5) { break; }
            }
            return n;
        }",
                   Value::Int(5));
}

#[test]
fn break_leaves_only_the_inner_loop() {
    let out = assert_success(
                             "proc main() {
            for (let i = 0; i < 3; i += 1) {
                for (let j = 0; j < 3; j += 1) {
                    if (j == 1) { break; }
                    print(str(i) + str(j) + \" \");
                }
            }
        }",
    );
    assert_eq!(out, "00 10 20 ");
}

#[test]
fn return_from_inside_a_loop() {
    assert_returns("proc find() {
            let i = 0;
            while (i < 100) {
                if (i * i > 50) { return i; }
                i++;
            }
            return -1;
        }
        proc main() { return find(); }",
                   Value::Int(8));
}

#[test]
fn else_if_chains() {
    let src = "proc classify(n) {
            if (n < 0) { return \"negative\"; }
            else if (n == 0) { return \"zero\"; }
            else if (n < 10) { return \"small\"; }
            else { return \"large\"; }
        }
        proc main() {
            println(classify(-3), classify(0), classify(4), classify(40));
        }";
    assert_eq!(assert_success(src), "negative zero small large\n");
}

#[test]
fn blocks_shadow_without_leaking() {
    assert_returns("proc main() {
            let x = 1;
            { let x = 2; x = 3; }
            return x;
        }",
                   Value::Int(1));
    assert_returns("proc main() {
            let x = 1;
            if (true) { x = 2; }
            return x;
        }",
                   Value::Int(2));
    assert_returns("proc main() {
            let x = 1;
            { let x = 2; return x; }
        }",
                   Value::Int(2));
    assert_runtime_error("proc main() {
            if (true) { let y = 1; }
            return y;
        }",
                         RuntimeErrorKind::UndefinedVariable);
}

#[test]
fn closures_capture_by_reference() {
    assert_returns("proc main() {
            let x = 1;
            let f = lam() -> { return x; };
            x = 5;
            return f();
        }",
                   Value::Int(5));
}

#[test]
fn redeclaring_after_capture_leaves_the_closure_alone() {
    assert_returns("proc main() {
            let x = 1;
            let f = lam() -> { return x; };
            let x = 5;
            return f();
        }",
                   Value::Int(1));
    // the redeclared name is what later code and later closures see
    assert_returns("proc main() {
            let x = 1;
            let f = lam() -> { return x; };
            let x = 5;
            let g = lam() -> { return x; };
            x = 7;
            return f() * 100 + g() * 10 + x;
        }",
                   Value::Int(177));
    // assignments before the redeclaration still reach the closure
    assert_returns("proc main() {
            let x = 1;
            let f = lam() -> { return x; };
            x = 2;
            const x = 9;
            return f() + x;
        }",
                   Value::Int(11));
}

#[test]
fn closures_keep_their_scope_alive() {
    assert_returns("proc counter() {
            let n = 0;
            return lam() -> { n += 1; return n; };
        }
        proc main() {
            let a = counter();
            let b = counter();
            a(); a();
            b();
            return a() * 10 + b();
        }",
                   Value::Int(32));
}

#[test]
fn curried_calls() {
    assert_returns("proc adder(a) { return lam(b) -> { return a + b; }; }
        proc main() { return adder(2)(3); }",
                   Value::Int(5));
    assert_returns("proc main() {
            let k = lam(a) -> { return lam(b) -> { return lam(c) -> { return a * b * c; }; }; };
            return k(2)(3)(4);
        }",
                   Value::Int(24));
}

#[test]
fn procedures_are_values() {
    assert_returns("proc twice(f, x) { return f(f(x)); }
        proc inc(x) { return x + 1; }
        proc main() { let g = inc; return twice(g, 5); }",
                   Value::Int(7));
}

#[test]
fn recursion() {
    assert_returns("proc fib(n) { if (n < 2) { return n; } return fib(n - 1) + fib(n - 2); }
        proc main() { return fib(15); }",
                   Value::Int(610));
    assert_returns("proc even(n) { if (n == 0) { return true; } return odd(n - 1); }
        proc odd(n) { if (n == 0) { return false; } return even(n - 1); }
        proc main() { return even(10); }",
                   Value::Bool(true));
}

#[test]
fn variables_hide_procedures() {
    assert_returns("proc f() { return 1; }
        proc main() { let f = 3; return f; }",
                   Value::Int(3));
}

#[test]
fn short_circuit_skips_the_right_operand() {
    assert_returns("proc main() { return false && missing(); }", Value::Bool(false));
    assert_returns("proc main() { return true || missing(); }", Value::Bool(true));
    assert_runtime_error("proc main() { return true && missing(); }",
                         RuntimeErrorKind::UndefinedVariable);
    assert_runtime_error("proc main() { return 1 && true; }",
                         RuntimeErrorKind::ExpectedBoolean);
}

#[test]
fn increments_and_decrements() {
    assert_returns("proc main() {
            let i = 1;
            let a = i++;
            let b = ++i;
            return a * 10 + b;
        }",
                   Value::Int(13));
    assert_returns("proc main() { let x = 2.5; x--; return x; }", Value::Float(1.5));
    assert_runtime_error("proc main() { let s = \"a\"; s++; }",
                         RuntimeErrorKind::TypeMismatch);
}

#[test]
fn compound_assignment() {
    assert_returns("proc main() {
            let x = 10;
            x += 5; x -= 3; x *= 2; x /= 4; x %= 4;
            return x;
        }",
                   Value::Int(2));
}

#[test]
fn mixed_type_equality_is_false() {
    assert_returns("proc main() { return 1 == \"1\"; }", Value::Bool(false));
    assert_returns("proc main() { return 1 != true; }", Value::Bool(true));
    assert_returns("proc main() { return 2 == 2.0; }", Value::Bool(true));
    assert_returns("proc main() { return \"a\" < 1; }", Value::Bool(false));
    assert_returns("proc main() { return \"abc\" < \"abd\"; }", Value::Bool(true));
}

#[test]
fn strings_concatenate() {
    assert_returns("proc main() { return \"a\" + 1 + 2; }", Value::Str("a12".into()));
    assert_returns("proc main() { return 1 + 2 + \"a\"; }", Value::Str("3a".into()));
    assert_runtime_error("proc main() { return \"a\" - 1; }", RuntimeErrorKind::TypeMismatch);
}

#[test]
fn printing() {
    assert_eq!(assert_success("proc main() { print(1, \"two\", 3.0, true); }"),
               "1 two 3.0 true");
    assert_eq!(assert_success("proc nothing() {} proc main() { println(nothing()); }"),
               "void\n");
    assert_eq!(assert_success("proc main() { println(str(lam() -> {}), str(main)); }"),
               "<lambda> <proc main>\n");
    assert_eq!(assert_success("proc main() { println(\"tab\\tquote\\\"\"); }"),
               "tab\tquote\"\n");
}

#[test]
fn builtins_can_be_hidden() {
    assert_returns("proc len(x) { return 99; } proc main() { return len(\"abc\"); }",
                   Value::Int(99));
    assert_returns("proc main() { return len(\"abc\"); }", Value::Int(3));
    assert_runtime_error("proc main() { assert(1 > 2); }", RuntimeErrorKind::AssertionFailed);
}

#[test]
fn reassignment_rules() {
    assert_runtime_error("proc main() { const k = 1; k = 2; }",
                         RuntimeErrorKind::ConstReassignment);
    assert_runtime_error("proc f(a) { a = 2; } proc main() { f(1); }",
                         RuntimeErrorKind::ConstReassignment);
    assert_runtime_error("proc f() {} proc main() { f = 1; }",
                         RuntimeErrorKind::ProcedureReassignment);
    assert_runtime_error("proc main() { x = 1; }", RuntimeErrorKind::UndefinedVariable);
    assert_runtime_error("proc main() { const k = 1; k++; }",
                         RuntimeErrorKind::ConstReassignment);
}

#[test]
fn call_errors() {
    assert_runtime_error("proc f(a) { return a; } proc main() { return f(); }",
                         RuntimeErrorKind::ArityMismatch);
    assert_runtime_error("proc main() { return len(\"a\", \"b\"); }",
                         RuntimeErrorKind::ArityMismatch);
    assert_runtime_error("proc main() { let x = 1; return x(); }",
                         RuntimeErrorKind::NotCallable);
    assert_runtime_error("proc main() { return nope(); }",
                         RuntimeErrorKind::UndefinedVariable);
}

#[test]
fn arithmetic_errors() {
    assert_runtime_error("proc main() { return 1 / 0; }", RuntimeErrorKind::DivisionByZero);
    assert_runtime_error("proc main() { return 1.0 % 0; }", RuntimeErrorKind::DivisionByZero);
    assert_runtime_error("proc main() { return 9223372036854775807 + 1; }",
                         RuntimeErrorKind::IntegerOverflow);
    assert_runtime_error("proc main() { if (1) {} }", RuntimeErrorKind::ExpectedBoolean);
    assert_runtime_error("proc main() { return !0; }", RuntimeErrorKind::ExpectedBoolean);
}

#[test]
fn loop_control_outside_a_loop() {
    assert_runtime_error("proc main() { break; }", RuntimeErrorKind::BreakOutsideLoop);
    assert_runtime_error("proc main() { if (true) { continue; } }",
                         RuntimeErrorKind::ContinueOutsideLoop);
    // a lambda body is not part of the loop around its call
    assert_runtime_error("proc main() {
            while (true) {
                let f = lam() -> { break; };
                f();
            }
        }",
                         RuntimeErrorKind::BreakOutsideLoop);
}

#[test]
fn entry_point() {
    assert_runtime_error("proc start() {}", RuntimeErrorKind::MissingEntryPoint);
    assert_runtime_error("proc main(x) {}", RuntimeErrorKind::ArityMismatch);

    let mut out = Vec::new();
    let config = Config::default().with_entry_point("start");
    let value = run_source_with_config("proc start() { return 1; }", config, &mut out);
    assert_eq!(value, Ok(Value::Int(1)));
}

#[test]
fn call_depth_is_limited() {
    let mut out = Vec::new();
    let config = Config::default().with_max_call_depth(32);
    let src = "proc down(n) { if (n == 0) { return 0; } return down(n - 1); }
        proc main() { return down(100); }";

    match run_source_with_config(src, config.clone(), &mut out) {
        Err(Error::Runtime(e)) => assert_eq!(e.kind(), RuntimeErrorKind::StackOverflow),
        other => panic!("expected a stack overflow, got {other:?}"),
    }

    let src = src.replace("down(100)", "down(20)");
    assert_eq!(run_source_with_config(&src, config, &mut out), Ok(Value::Int(0)));
}

#[test]
fn parse_errors() {
    assert_parse_error("proc main() {} proc main() {}", ParseErrorKind::DuplicateProcedure);
    assert_parse_error("proc main() {} proc main(,", ParseErrorKind::DuplicateProcedure);
    assert_parse_error("proc f(a, a) {} proc main() {}", ParseErrorKind::DuplicateParameter);
    assert_parse_error("proc main() { let while = 1; }", ParseErrorKind::KeywordAsIdentifier);
    assert_parse_error("proc main() { else; }", ParseErrorKind::UnexpectedToken);
    assert_parse_error("proc main() { return while; }", ParseErrorKind::UnexpectedToken);
    assert_parse_error("proc main() { f(1,); }", ParseErrorKind::TrailingComma);
    assert_parse_error("proc main() { 1 = 2; }", ParseErrorKind::InvalidAssignmentTarget);
    assert_parse_error("proc main() { f() += 2; }", ParseErrorKind::InvalidAssignmentTarget);
    assert_parse_error("proc main() { ++1; }", ParseErrorKind::InvalidIncrementTarget);
    assert_parse_error("proc main() { for (1; true; i++) {} }",
                       ParseErrorKind::InvalidForInitializer);
    assert_parse_error("proc main() { for (let i = 0; i < 3; i + 1) {} }",
                       ParseErrorKind::InvalidForUpdate);
    assert_parse_error("proc main() { if (true) return; }", ParseErrorKind::ExpectedBlock);
    assert_parse_error("proc main() { return 1 }", ParseErrorKind::UnexpectedToken);
    assert_parse_error("proc main() { return 1;", ParseErrorKind::UnexpectedEndOfInput);
    assert_parse_error("let x = 1;", ParseErrorKind::UnexpectedToken);
    assert_parse_error("proc main() { return \"open; }", ParseErrorKind::UnterminatedString);
    assert_parse_error("proc main() { return 1 # 2; }", ParseErrorKind::InvalidToken);
}

#[test]
fn errors_carry_positions() {
    let src = "proc main() {\n    let a = 1;\n    return a + b;\n}";
    match assert_failure(src) {
        Error::Runtime(e) => {
            assert_eq!(e.kind(), RuntimeErrorKind::UndefinedVariable);
            assert_eq!(e.position(), Some(Position::new(3, 16)));
            assert_eq!(e.to_string(), "Runtime error at 3:16: Undefined variable 'b'.");
        },
        Error::Parse(e) => panic!("expected a runtime error, got {e}"),
    }

    match assert_failure("proc main() {\n  let x = ;\n}") {
        Error::Parse(e) => {
            assert_eq!(e.position(), Position::new(2, 11));
            assert!(e.to_string().starts_with("Parse error at 2:11:"));
        },
        Error::Runtime(e) => panic!("expected a parse error, got {e}"),
    }
}

#[test]
fn comments_are_ignored() {
    assert_returns("// leading comment
        proc main() {
            /* a block
               comment */
            return 4; // trailing
        }",
                   Value::Int(4));
    assert_returns("proc main() { /* note **/ return 1; }", Value::Int(1));
    assert_returns("proc main() { /***/ return 2; }", Value::Int(2));
}

#[test]
fn lists_print_nested() {
    assert_eq!(assert_success("proc main() { print(list(1, 2, list(4, 5))); }"),
               "[1, 2, [4, 5]]");
    assert_eq!(assert_success("proc main() { print(list(), nil); }"), "[] nil");
}

#[test]
fn list_indexing() {
    assert_returns("proc main() { let xs = list(1, 2, 3); return xs[0]; }", Value::Int(1));
    assert_returns("proc main() { return list(list(1, 2), list(3, 4))[1][0]; }",
                   Value::Int(3));
    assert_returns("proc row() { return list(7, 8); } proc main() { return row()[1]; }",
                   Value::Int(8));
    assert_returns("proc main() { return \"héllo\"[1]; }", Value::Str("é".into()));
}

#[test]
fn list_indexing_errors() {
    assert_runtime_error("proc main() { let x = 10; return x[0]; }",
                         RuntimeErrorKind::NotIndexable);
    assert_runtime_error("proc main() { return list(1, 2, 3)[3]; }",
                         RuntimeErrorKind::IndexOutOfBounds);
    assert_runtime_error("proc main() { return list(1, 2, 3)[-1]; }",
                         RuntimeErrorKind::IndexOutOfBounds);
    assert_runtime_error("proc main() { return list(1)[\"hello\"]; }",
                         RuntimeErrorKind::ExpectedInteger);
    assert_runtime_error("proc main() { return list(1)[0.0]; }",
                         RuntimeErrorKind::ExpectedInteger);
    assert_parse_error("proc main() { let xs = list(1); xs[0] = 2; }",
                       ParseErrorKind::InvalidAssignmentTarget);
}

#[test]
fn list_concatenation() {
    assert_eq!(assert_success("proc main() {
            let a = list(1, 2, 3);
            let b = list(4, 5, 6);
            print(list(a, b, a + b));
        }"),
               "[[1, 2, 3], [4, 5, 6], [1, 2, 3, 4, 5, 6]]");
    assert_returns("proc main() { return list(1, 2) == list(1, 2.0); }", Value::Bool(true));
    assert_returns("proc main() { return list(1) == list(1, 2); }", Value::Bool(false));
}

#[test]
fn list_builtins() {
    assert_returns("proc sum(xs) {
            if (is_empty(xs)) { return 0; }
            return head(xs) + sum(rest(xs));
        }
        proc main() { return sum(list(1, 2, 3, 4)); }",
                   Value::Int(10));
    assert_returns("proc main() { return is_nil(head(list())); }", Value::Bool(true));
    assert_returns("proc main() { return is_nil(rest(list())); }", Value::Bool(true));
    assert_returns("proc main() { return rest(list(1)); }", Value::from(Vec::new()));
    assert_eq!(assert_success("proc main() {
            println(is_nil(0), is_nil(list()), is_nil(\"\"), is_nil(false));
        }"),
               "false false false false\n");
    assert_returns("proc main() { return len(list(1, nil, 3)); }", Value::Int(3));
    assert_runtime_error("proc main() { return is_empty(true); }",
                         RuntimeErrorKind::ExpectedList);
    assert_runtime_error("proc main() { return head(1, 2); }",
                         RuntimeErrorKind::ArityMismatch);
}
