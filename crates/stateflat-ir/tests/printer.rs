use super::*;

#[test]
fn test_print_expressions() {
    let cond = Expression::not(Expression::binary(
        Expression::id("i"),
        "<",
        Expression::number("10"),
    ));
    assert_eq!(Printer::expression_to_string(&cond), "!(i < 10)");

    let call = Expression::call(
        Expression::member(Expression::id("console"), "log"),
        vec![Expression::string("hi"), Expression::Null],
    );
    assert_eq!(Printer::expression_to_string(&call), "console.log(\"hi\", null)");
}

#[test]
fn test_print_if_else() {
    let stmt = Statement::if_else(
        Expression::id("x"),
        vec![Statement::goto("A")],
        vec![Statement::ret(Some(Expression::number("1")))],
    );
    assert_eq!(
        Printer::emit_to_string(&stmt),
        "if (x) {\n    goto A;\n} else {\n    return 1;\n}"
    );
}

#[test]
fn test_print_for_header() {
    let stmt = Statement::for_loop(
        Statement::expr(Expression::assign(Expression::id("i"), Expression::number("0"))),
        Some(Expression::id("c")),
        None,
        vec![],
    );
    assert_eq!(Printer::emit_to_string(&stmt), "for (i = 0; c; ) {\n}");
}

#[test]
fn test_print_blocks() {
    let blocks = vec![
        LabeledBlock::new("$sm0", vec![Statement::goto("L")]),
        LabeledBlock::new("L", vec![Statement::ret(None)]),
    ];
    assert_eq!(
        Printer::print_blocks(&blocks),
        "$sm0:\n    goto L;\n\nL:\n    return;\n"
    );
}
