use std::{fs, io::Cursor};

use clite::{
    Error,
    error::{LexError, ParseError, RuntimeError},
    run_with_io,
};
use indoc::indoc;
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_clite_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let (Err(e), _) = execute(&code, "") {
                panic!("clite example {} in {:?} failed:\n{}\nError: {:?}",
                       i + 1,
                       path,
                       code,
                       e);
            }
        }
    }

    assert!(count > 0, "No clite examples found in book/src");
}

fn extract_clite_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```clite") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn execute(src: &str, input: &str) -> (Result<i64, Error>, String) {
    let mut input = Cursor::new(input.as_bytes());
    let mut output = Vec::new();
    let result = run_with_io(src, &mut input, &mut output);
    (result, String::from_utf8(output).expect("output is not UTF-8"))
}

fn assert_exit(src: &str, expected: i64) {
    match execute(src, "") {
        (Ok(code), _) => assert_eq!(code, expected, "wrong exit code for:\n{src}"),
        (Err(e), _) => panic!("Program failed: {e}\n{src}"),
    }
}

fn assert_output(src: &str, input: &str, expected: &str) {
    match execute(src, input) {
        (Ok(_), output) => assert_eq!(output, expected, "wrong output for:\n{src}"),
        (Err(e), _) => panic!("Program failed: {e}\n{src}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match execute(src, "") {
        (Ok(code), _) => panic!("Program exited with {code} but was expected to fail:\n{src}"),
        (Err(e), _) => e,
    }
}

fn runtime_failure(src: &str) -> RuntimeError {
    match assert_failure(src) {
        Error::Runtime(e) => e,
        Error::Parse(e) => panic!("expected a runtime error, found {e}"),
    }
}

#[test]
fn compound_assignment() {
    assert_exit("int main() { int a = 5; a += 3; return a; }", 8);
    assert_exit("int main() { int a = 6; a *= 7; a -= 2; a /= 4; a %= 7; return a; }", 3);
    assert_exit("int main() { int a = 12; a &= 10; a |= 1; a ^= 3; a <<= 2; a >>= 1; return a; }",
                20);
}

#[test]
fn compound_assignment_stores_back_into_the_slot_type() {
    let src = indoc! {"
        int main() {
            int a = 5;
            a += 0.5;
            a *= 1.9;
            float f = 1.5;
            f += 2;
            printf(f);
            int v[2] = {1, 2};
            v[1] -= 0.5;
            printi(v[1]);
            return a;
        }
    "};
    assert_output(src, "", "3.5\n1\n");
    assert_exit(src, 9);
}

#[test]
fn compound_assignment_without_an_operator_is_error() {
    for src in ["int main() { string s = \"a\"; s += 1; return 0; }",
                "int main() { string s = \"ab\"; s -= \"b\"; return 0; }",
                "int main() { int a = 5; a %= 2.0; return 0; }",
                "int main() { float f = 5.0; f %= 2; return 0; }",
                "int main() { float f = 5.0; f &= 1; return 0; }",
                "int main() { int a = 1; a += \"x\"; return 0; }",
                "int main() { string s[2]; s[0] += 1; return 0; }",
                "int main() { int v[2]; v[0] <<= 1.0; return 0; }",
                "int main() { int v[2][2]; v[0] += 1; return 0; }"]
    {
        assert!(matches!(runtime_failure(src), RuntimeError::MismatchedType { .. }),
                "{src}");
    }
}

#[test]
fn negative_operands_of_division_and_remainder() {
    assert_output(indoc! {"
                      int main() {
                          printi(-7 / 2);
                          printi(7 / -2);
                          printi(-7 % 2);
                          printi(7 % -2);
                          printi(-7 % -2);
                          int r = -9;
                          r %= 4;
                          printi(r);
                          return 0;
                      }
                  "},
                  "",
                  "-3\n-3\n1\n-1\n-1\n3\n");
}

#[test]
fn user_defined_function_and_calls() {
    assert_exit(indoc! {"
                    int add(int a, int b) {
                        return a + b;
                    }

                    int main() {
                        return add(2, 3);
                    }
                "},
                5);
}

#[test]
fn recursion() {
    assert_exit(indoc! {"
                    int fib(int n) {
                        if (n < 2) return n;
                        return fib(n - 1) + fib(n - 2);
                    }

                    int main() { return fib(10); }
                "},
                55);
}

#[test]
fn globals_are_shared_with_functions() {
    assert_exit(indoc! {"
                    int counter = 0;
                    void bump() { counter += 1; }
                    int main() { bump(); bump(); return counter; }
                "},
                2);
    assert_exit(indoc! {"
                    int twice(int x) { return 2 * x; }
                    int g = twice(21);
                    int main() { return g; }
                "},
                42);
}

#[test]
fn calls_do_not_see_caller_locals() {
    let error = runtime_failure(indoc! {"
                                    int peek() { return local; }
                                    int main() { int local = 1; return peek(); }
                                "});
    assert!(matches!(error, RuntimeError::IdentifierNotFound { .. }));
}

#[test]
fn shadowing_in_nested_blocks() {
    let src = indoc! {"
        int x = 1;
        int main() {
            int x = 2;
            {
                int x = 3;
                printi(x);
            }
            printi(x);
            return x;
        }
    "};
    assert_output(src, "", "3\n2\n");
    assert_exit(src, 2);
}

#[test]
fn duplicate_declaration_is_error() {
    let error = runtime_failure("int main() { int x = 1; int x = 2; return x; }");
    assert!(matches!(error, RuntimeError::DuplicateIdentifier { .. }));
}

#[test]
fn unknown_identifier_is_error() {
    let error = runtime_failure("int main() {\n    return y;\n}");
    assert!(matches!(error, RuntimeError::IdentifierNotFound { .. }));
    assert_eq!(error.lexeme().map(|l| (l.line, l.column)), Some((2, 12)));

    assert!(matches!(runtime_failure("int main() { y = 1; return 0; }"),
                     RuntimeError::IdentifierNotFound { .. }));
}

#[test]
fn numeric_coercion_on_declaration_and_assignment() {
    let src = indoc! {"
        int main() {
            int i = 3.9;
            float f = 2;
            printf(f);
            i += 0.5;
            return i;
        }
    "};
    assert_output(src, "", "2.0\n");
    assert_exit(src, 3);
}

#[test]
fn mixed_arithmetic_promotes_to_float() {
    assert_output("int main() { float f = 1 + 0.5; printf(f); printf(7 / 2 * 1.0); return 0; }",
                  "",
                  "1.5\n3.0\n");
}

#[test]
fn comparisons_and_logic_yield_ints() {
    assert_exit("int main() { return (3 < 4) + (2.5 >= 2) + (1 == 1.0) + (0 || 0.1); }", 4);
    assert_exit("int main() { return !0 + !2.5 + (1 && 0) + ~0; }", 0);
}

#[test]
fn loops_with_break_and_continue() {
    assert_exit(indoc! {"
                    int main() {
                        int sum = 0;
                        for (int i = 0; i < 10; i += 1) {
                            if (i % 2 == 0) continue;
                            if (i > 7) break;
                            sum += i;
                        }
                        return sum;
                    }
                "},
                16);
    assert_exit(indoc! {"
                    int main() {
                        int n = 10;
                        int steps = 0;
                        while (n != 1) {
                            if (n % 2 == 0) n = n / 2;
                            else n = 3 * n + 1;
                            steps += 1;
                        }
                        return steps;
                    }
                "},
                6);
}

#[test]
fn do_while_runs_at_least_once() {
    assert_exit("int main() { int n = 0; do { n += 1; } while (0); return n; }", 1);
}

#[test]
fn for_loop_variable_is_scoped_to_the_loop() {
    let error = runtime_failure("int main() { for (int i = 0; i < 1; i += 1) ; return i; }");
    assert!(matches!(error, RuntimeError::IdentifierNotFound { .. }));
}

#[test]
fn arrays_and_indexing() {
    let src = indoc! {"
        int main() {
            int a[3] = {1, 2, 3};
            a[1] = 9;
            a[2] += 1;
            printl(a);
            return a[1];
        }
    "};
    assert_output(src, "", "[1, 9, 4]\n");
    assert_exit(src, 9);
}

#[test]
fn multi_dimensional_arrays_and_array_parameters() {
    let src = indoc! {"
        int total(int grid[][], int rows, int cols) {
            int sum = 0;
            for (int r = 0; r < rows; r += 1) {
                for (int c = 0; c < cols; c += 1) {
                    sum += grid[r][c];
                }
            }
            return sum;
        }

        int main() {
            int grid[2][3] = {{1, 2, 3}, {4, 5, 6}};
            grid[1][2] = 10;
            printl(grid[1]);
            return total(grid, 2, 3);
        }
    "};
    assert_output(src, "", "[4, 5, 10]\n");
    assert_exit(src, 25);
}

#[test]
fn arrays_are_copied() {
    let src = indoc! {"
        void clear(int a[]) { a[0] = 0; }

        int main() {
            int a[] = {7, 8};
            clear(a);
            int b[2] = a;
            b[1] = 1;
            printl(a);
            return a[0];
        }
    "};
    assert_output(src, "", "[7, 8]\n");
    assert_exit(src, 7);
}

#[test]
fn default_values() {
    assert_output(indoc! {r#"
                      string s;
                      float grid[2][2];
                      int main() {
                          int n;
                          prints(s + "|");
                          printl(grid);
                          printi(n);
                          return 0;
                      }
                  "#},
                  "",
                  "|\n[[0.0, 0.0], [0.0, 0.0]]\n0\n");
}

#[test]
fn out_of_bounds_access_is_error() {
    for src in ["int main() { int a[3]; return a[5]; }",
                "int main() { int a[3]; return a[-1]; }",
                "int main() { int a[3]; a[3] = 1; return 0; }",
                "int main() { int a[0]; return 0; }",
                "int main() { int a[]; return 0; }",
                "int main() { int a[9223372036854775807]; return 0; }",
                "int main() { int a[65536][65536]; return 0; }",
                "int main() { int a[2]; return a[]; }",
                "int main() { return 1 << 64; }"]
    {
        assert!(matches!(runtime_failure(src), RuntimeError::OutOfBounds { .. }),
                "{src}");
    }
}

#[test]
fn array_initializer_mismatch_is_error() {
    for src in ["int main() { int a[2] = {1, 2.0}; return 0; }",
                "int main() { int a[3] = {1, 2}; return 0; }",
                "int main() { float a[2] = {1, 2}; return 0; }",
                "int main() { int a[] = {}; return 0; }",
                "int main() { int a[2][2] = {{1, 2}, {3}}; return 0; }",
                "int main() { int a = {1}; return 0; }",
                "int main() { int a[2] = 1; return 0; }"]
    {
        assert!(matches!(runtime_failure(src), RuntimeError::MismatchedType { .. }),
                "{src}");
    }
}

#[test]
fn strings() {
    let src = indoc! {r#"
        int main() {
            string s = "ab" + "cd";
            prints(s);
            prints("tab\there\\");
            if (s == "abcd") return 1;
            return 0;
        }
    "#};
    assert_output(src, "", "abcd\ntab\there\\\n");
    assert_exit(src, 1);

    assert!(matches!(runtime_failure(r#"int main() { string s = "a" - "b"; return 0; }"#),
                     RuntimeError::MismatchedType { .. }));
    assert!(matches!(runtime_failure(r#"int main() { if ("yes") return 1; return 0; }"#),
                     RuntimeError::MismatchedType { .. }));
}

#[test]
fn casts() {
    let src = indoc! {r#"
        int main() {
            printi((int) "42" + 1);
            prints((string) 2.5);
            printf((float) 3);
            return (int) -2.7;
        }
    "#};
    assert_output(src, "", "43\n2.5\n3.0\n");
    assert_exit(src, -2);

    assert!(matches!(runtime_failure(r#"int main() { return (int) "4x"; }"#),
                     RuntimeError::MismatchedType { .. }));
}

#[test]
fn input_builtins() {
    let src = indoc! {"
        int main() {
            int a = inputi();
            float b = inputf();
            string w = inputs();
            string rest = inputline();
            prints(w);
            prints(rest);
            printf(a + b);
            return a;
        }
    "};
    assert_output(src, "3 0.5 word and more\n", "word\n and more\n3.5\n");

    let (result, _) = execute("int main() { return inputi(); }", "");
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::Io { .. }))));
    let (result, _) = execute("int main() { return inputi(); }", "seven");
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::Io { .. }))));
}

#[test]
fn comments_are_ignored() {
    assert_exit(indoc! {"
                    // leading comment
                    int main() {
                        /* block
                           comment */
                        return 4; // trailing
                    }
                "},
                4);
}

#[test]
fn invalid_main_is_error() {
    for src in ["float main() { return 1.0; }",
                "int f() { return 0; }",
                "int main = 3;",
                "int main(int argc) { return argc; }"]
    {
        assert!(matches!(runtime_failure(src), RuntimeError::InvalidMain { .. }),
                "{src}");
    }
}

#[test]
fn array_as_function_return_is_error() {
    let error = runtime_failure("int f[](int a) { return a; } int main() { return 0; }");
    assert!(matches!(error, RuntimeError::ArrayAsFunctionReturn { .. }));
}

#[test]
fn mismatched_arguments_have_no_side_effects() {
    let src = indoc! {r#"
        void show(int x) { printi(x); }

        int main() {
            prints("before");
            show(1.5);
            prints("after");
            return 0;
        }
    "#};
    let (result, output) = execute(src, "");
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::MismatchedArguments { .. }))));
    assert_eq!(output, "before\n");

    assert!(matches!(runtime_failure("int main() { printi(1, 2); return 0; }"),
                     RuntimeError::MismatchedArguments { .. }));
    assert!(matches!(runtime_failure("int main() { float a[1] = {1.0}; printi(a); return 0; }"),
                     RuntimeError::MismatchedArguments { .. }));
}

#[test]
fn return_type_is_checked() {
    for src in [r#"int f() { return "x"; } int main() { return f(); }"#,
                "void g() { return 1; } int main() { g(); return 0; }",
                "int h() { } int main() { return h(); }"]
    {
        assert!(matches!(runtime_failure(src), RuntimeError::MismatchedType { .. }),
                "{src}");
    }
}

#[test]
fn break_outside_loop_is_error() {
    let error = runtime_failure(indoc! {"
                                    void f() { break; }
                                    int main() {
                                        while (1) { f(); }
                                        return 0;
                                    }
                                "});
    assert!(matches!(error, RuntimeError::BreakOrContinueWithoutLoop { .. }));
    assert!(matches!(runtime_failure("int main() { continue; return 0; }"),
                     RuntimeError::BreakOrContinueWithoutLoop { .. }));
}

#[test]
fn division_by_zero_is_error() {
    assert!(matches!(runtime_failure("int main() { return 1 / 0; }"),
                     RuntimeError::DivisionByZero { .. }));
    assert!(matches!(runtime_failure("int main() { float f = 1.5 / 0; return 0; }"),
                     RuntimeError::DivisionByZero { .. }));
}

#[test]
fn redefinition_of_builtin_function_is_error() {
    for src in ["void printi(int x) { } int main() { return 0; }",
                "int prints = 1; int main() { return 0; }"]
    {
        assert!(matches!(runtime_failure(src), RuntimeError::DuplicateIdentifier { .. }),
                "{src}");
    }
}

#[test]
fn calling_a_variable_is_error() {
    assert!(matches!(runtime_failure("int main() { int x = 1; return x(); }"),
                     RuntimeError::MismatchedType { .. }));
}

#[test]
fn syntax_errors_are_reported() {
    assert!(matches!(assert_failure("int main() { return 0 }"),
                     Error::Parse(ParseError::UnexpectedLexeme { .. })));
    assert!(matches!(assert_failure("int main() { return 0 @ }"),
                     Error::Parse(ParseError::Lexical(_))));
    assert!(matches!(assert_failure("int main() { return 99999999999999999999; }"),
                     Error::Parse(ParseError::Lexical(LexError::IntegerOutOfRange { .. }))));
}

#[test]
fn example_works() {
    let contents = fs::read_to_string("tests/example.cl").unwrap();
    assert_output(&contents,
                  "5\n",
                  "primes below 5:\n[2, 3]\n120\n");
}
