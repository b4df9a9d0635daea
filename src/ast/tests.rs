//! Unit tests for the AST module.
//!
//! Covers operator resolution and its precedence table, expression
//! metadata (kind, precedence, stand-alone rule) and visitor dispatch.

use crate::{
    lexer::{
        lexer::tokenize,
        tokens::{Keyword, Token},
    },
    parser::parser::parse,
    TokenSpan,
};

use super::{
    ast::{Expr, ExprType, Program, Stmt, StmtType},
    expressions::{
        BinaryExpr, BlockExpr, CallExpr, FnExpr, Identifier, ImmediateCallExpr, LiteralExpr,
        PathQualifierExpr, PathTarget, TupleExpr, UnaryExpr,
    },
    operators::{Associativity, Fixity, Operation, Operator, PREC_CALL, PREC_PREFIX},
    statements::{
        ExpressionStmt, ExternImportStmt, FnDeclStmt, ImportStmt, ReturnStmt, StaticImportStmt,
        VarDeclStmt,
    },
    visitor::Visitor,
};

fn token(source: &str) -> Token {
    tokenize(source).unwrap().remove(0)
}

fn program(source: &str) -> Program {
    parse(tokenize(source).unwrap()).unwrap()
}

fn first_expr(source: &str) -> Expr {
    match program(source).body.into_iter().next() {
        Some(Stmt::VarDecl(decl)) => decl.value,
        Some(Stmt::Expression(stmt)) => stmt.expression,
        other => panic!("no expression in {other:?}"),
    }
}

const BINARY: &[(&str, Operation)] = &[
    ("as", Operation::Cast),
    ("*", Operation::Multiply),
    ("/", Operation::Divide),
    ("%", Operation::Modulus),
    ("+", Operation::Add),
    ("-", Operation::Subtract),
    ("<<", Operation::ShiftLeft),
    (">>", Operation::ShiftRight),
    ("&", Operation::BitAnd),
    ("^", Operation::BitXor),
    ("|", Operation::BitOr),
    ("<", Operation::Less),
    ("<=", Operation::LessEqual),
    (">", Operation::Greater),
    (">=", Operation::GreaterEqual),
    ("==", Operation::Equal),
    ("!=", Operation::NotEqual),
    ("&&", Operation::LogicalAnd),
    ("||", Operation::LogicalOr),
    ("=", Operation::Assign),
];

#[test]
fn test_binary_operator_resolution() {
    for (symbol, operation) in BINARY {
        assert_eq!(
            Operation::from_binary(&token(symbol)),
            Some(*operation),
            "resolving `{symbol}`"
        );
        assert_eq!(operation.symbol(), *symbol);
        assert_eq!(operation.to_string(), *symbol);
        assert!(!operation.is_prefix());
    }

    assert_eq!(Operation::from_binary(&token("!")), None);
    assert_eq!(Operation::from_binary(&token("let")), None);
    assert_eq!(Operation::from_binary(&token("(")), None);
}

#[test]
fn test_prefix_operator_resolution() {
    assert_eq!(Operation::from_prefix(&token("-")), Some(Operation::Negate));
    assert_eq!(Operation::from_prefix(&token("+")), Some(Operation::Plus));
    assert_eq!(Operation::from_prefix(&token("!")), Some(Operation::Not));
    assert_eq!(Operation::from_prefix(&token("*")), None);
    assert_eq!(Operation::from_prefix(&token("as")), None);

    for operation in [Operation::Negate, Operation::Plus, Operation::Not] {
        assert!(operation.is_prefix());
        assert_eq!(operation.precedence(), None);
        assert_eq!(operation.associativity(), Associativity::None);
    }
}

#[test]
fn test_precedence_table() {
    let precedence = |operation: Operation| operation.precedence().unwrap();

    assert_eq!(precedence(Operation::Cast), 14);
    assert_eq!(precedence(Operation::Multiply), 13);
    assert_eq!(precedence(Operation::Add), 12);
    assert_eq!(precedence(Operation::ShiftRight), 11);
    assert_eq!(precedence(Operation::BitAnd), 10);
    assert_eq!(precedence(Operation::BitXor), 9);
    assert_eq!(precedence(Operation::BitOr), 8);
    assert_eq!(precedence(Operation::NotEqual), 7);
    assert_eq!(precedence(Operation::LessEqual), 7);
    assert_eq!(precedence(Operation::LogicalAnd), 6);
    assert_eq!(precedence(Operation::LogicalOr), 5);
    assert_eq!(precedence(Operation::Assign), 2);

    assert!(BINARY
        .iter()
        .all(|(_, operation)| precedence(*operation) < PREC_PREFIX));
    assert!(PREC_PREFIX < PREC_CALL);
}

#[test]
fn test_only_cast_is_right_associative() {
    for (_, operation) in BINARY {
        let expected = if *operation == Operation::Cast {
            Associativity::Right
        } else {
            Associativity::Left
        };
        assert_eq!(operation.associativity(), expected, "{operation}");
    }
}

#[test]
fn test_operator_takes_token_index() {
    let tokens = tokenize("a - b").unwrap();

    let infix = Operator::new(&tokens[1], Fixity::Infix);
    assert_eq!(infix.operation, Operation::Subtract);
    assert_eq!(infix.span, TokenSpan::single(1));
    assert_eq!(infix.precedence(), Some(12));

    let prefix = Operator::new(&tokens[1], Fixity::Prefix);
    assert_eq!(prefix.operation, Operation::Negate);
    assert_eq!(prefix.associativity(), Associativity::None);
}

#[test]
#[should_panic]
fn test_operator_rejects_non_operator_token() {
    Operator::new(&token("foo"), Fixity::Infix);
}

#[test]
fn test_identifier_resolves_keyword() {
    let name = Identifier::from_token(&token("counter"));
    assert_eq!(name.name, "counter");
    assert!(!name.is_keyword());

    let keyword = Identifier::from_token(&token("return"));
    assert_eq!(keyword.keyword, Some(Keyword::Return));
    assert!(keyword.is_keyword());
    assert_eq!(keyword.span, TokenSpan::single(0));
}

#[test]
fn test_expression_kinds() {
    let cases = [
        ("let v = 1;", ExprType::Literal),
        ("let v = x;", ExprType::Identifier),
        ("let v = a + b;", ExprType::Binary),
        ("let v = -a;", ExprType::Unary),
        ("let v = {};", ExprType::Block),
        ("let v = compute (x) -> x;", ExprType::Fn),
        ("let v = f(1);", ExprType::FnCall),
        ("let v = f()(1);", ExprType::ImmediateCall),
        ("let v = (1, 2);", ExprType::Tuple),
        ("let v = a::b;", ExprType::PathQualifier),
    ];

    for (source, kind) in cases {
        assert_eq!(first_expr(source).kind(), kind, "{source}");
    }

    assert_eq!(ExprType::Binary.to_string(), "binary expression");
    assert_eq!(StmtType::ImportStmt.to_string(), "import statement");
}

#[test]
fn test_expression_precedence() {
    assert_eq!(first_expr("let v = a * b;").precedence(), 13);
    assert_eq!(first_expr("let v = a = b;").precedence(), 2);
    assert_eq!(first_expr("let v = !a;").precedence(), PREC_PREFIX);
    assert_eq!(first_expr("let v = f(a);").precedence(), PREC_CALL);
    assert_eq!(first_expr("let v = 1;").precedence(), PREC_CALL);
    assert_eq!(first_expr("let v = compute () -> 1;").precedence(), 0);
}

#[test]
fn test_can_stand_alone() {
    assert!(first_expr("let v = f();").can_stand_alone());
    assert!(first_expr("let v = f()();").can_stand_alone());
    assert!(first_expr("let v = {};").can_stand_alone());
    assert!(first_expr("let v = a = 1;").can_stand_alone());

    assert!(!first_expr("let v = a == 1;").can_stand_alone());
    assert!(!first_expr("let v = -a;").can_stand_alone());
    assert!(!first_expr("let v = a;").can_stand_alone());
    assert!(!first_expr("let v = a::b;").can_stand_alone());
}

#[test]
fn test_statement_kinds_and_spans() {
    let program = program("let a = 1; foo(); action f() -> {} import extern \"x\" as y;");

    let kinds = program.body.iter().map(Stmt::kind).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            StmtType::VarDeclStmt,
            StmtType::ExpressionStmt,
            StmtType::FnDeclStmt,
            StmtType::ImportStmt
        ]
    );

    // let a = 1 ; foo ( ) ; action f  ( ) -> { } import extern "x" as y  ;
    // 0   1 2 3 4 5   6 7 8 9      10 ...          16     17     18  19 20 21
    assert_eq!(program.body[1].span(), TokenSpan::new(5, 9));
    assert_eq!(program.body[2].span(), TokenSpan::new(9, 16));
    assert_eq!(program.span, TokenSpan::new(0, 22));
}

#[test]
fn test_path_segments_stop_at_group() {
    let Some(Stmt::Import(ImportStmt::Static(import))) =
        program("import a::b::{c, d};").body.into_iter().next()
    else {
        panic!("expected a static import");
    };

    let names = import
        .path
        .segments()
        .iter()
        .map(|s| s.name.clone())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["a", "b"]);
    assert!(matches!(
        import.path.target,
        PathTarget::Nested(ref nested) if matches!(nested.target, PathTarget::Group(_))
    ));
}

/// Counts every node reached by walking the whole tree.
#[derive(Default)]
struct NodeCounter {
    statements: usize,
    expressions: usize,
    operators: usize,
    identifiers: usize,
}

impl Visitor<()> for NodeCounter {
    fn visit_program(&mut self, node: &Program) {
        node.body.iter().for_each(|stmt| stmt.accept(self));
    }

    fn visit_variable_declaration(&mut self, node: &VarDeclStmt) {
        self.statements += 1;
        node.identifier.accept(self);
        node.value.accept(self);
    }

    fn visit_fn_declaration(&mut self, node: &FnDeclStmt) {
        self.statements += 1;
        node.identifier.accept(self);
        node.parameters.iter().for_each(|p| p.accept(self));
        node.body.accept(self);
    }

    fn visit_return_stmt(&mut self, node: &ReturnStmt) {
        self.statements += 1;
        node.value.accept(self);
    }

    fn visit_expression_stmt(&mut self, node: &ExpressionStmt) {
        self.statements += 1;
        node.expression.accept(self);
    }

    fn visit_extern_import(&mut self, node: &ExternImportStmt) {
        self.statements += 1;
        node.resource.accept(self);
        node.alias.accept(self);
    }

    fn visit_static_import(&mut self, node: &StaticImportStmt) {
        self.statements += 1;
        node.path.accept(self);
    }

    fn visit_block(&mut self, node: &BlockExpr) {
        self.expressions += 1;
        node.body.iter().for_each(|item| item.accept(self));
    }

    fn visit_binary(&mut self, node: &BinaryExpr) {
        self.expressions += 1;
        node.left.accept(self);
        node.operator.accept(self);
        node.right.accept(self);
    }

    fn visit_unary(&mut self, node: &UnaryExpr) {
        self.expressions += 1;
        node.operator.accept(self);
        node.operand.accept(self);
    }

    fn visit_fn_call(&mut self, node: &CallExpr) {
        self.expressions += 1;
        node.callee.accept(self);
        node.arguments.iter().for_each(|a| a.accept(self));
    }

    fn visit_immediate_fn_call(&mut self, node: &ImmediateCallExpr) {
        self.expressions += 1;
        node.callee.accept(self);
        node.arguments.iter().for_each(|a| a.accept(self));
    }

    fn visit_fn(&mut self, node: &FnExpr) {
        self.expressions += 1;
        node.parameters.iter().for_each(|p| p.accept(self));
        node.body.accept(self);
    }

    fn visit_literal(&mut self, _node: &LiteralExpr) {
        self.expressions += 1;
    }

    fn visit_tuple(&mut self, node: &TupleExpr) {
        self.expressions += 1;
        node.elements.iter().for_each(|e| e.accept(self));
    }

    fn visit_identifier(&mut self, _node: &Identifier) {
        self.identifiers += 1;
    }

    fn visit_operator(&mut self, _node: &Operator) {
        self.operators += 1;
    }

    fn visit_path_qualifier(&mut self, node: &PathQualifierExpr) {
        self.expressions += 1;
        node.segment.accept(self);
        match &node.target {
            PathTarget::Item(item) => item.accept(self),
            PathTarget::Nested(nested) => nested.accept(self),
            PathTarget::Group(entries) => entries.iter().for_each(|e| e.accept(self)),
            PathTarget::Leaf | PathTarget::Wildcard(_) => {}
        }
    }
}

#[test]
fn test_visitor_walks_every_node() {
    let program = program(
        "import std::io; \
         let x = -1 + f(2, (3, 4)); \
         compute g(a) -> { return a; }",
    );

    let mut counter = NodeCounter::default();
    program.accept(&mut counter);

    assert_eq!(counter.statements, 4);
    // binary, unary, 1, call, 2, tuple, 3, 4, block, path
    assert_eq!(counter.expressions, 10);
    assert_eq!(counter.operators, 2);
    // std, io, x, f, g, a, a
    assert_eq!(counter.identifiers, 7);
}

/// Renders the callee name of every direct call.
struct CallNames;

impl Visitor<Vec<String>> for CallNames {
    fn visit_program(&mut self, node: &Program) -> Vec<String> {
        node.body.iter().flat_map(|stmt| stmt.accept(self)).collect()
    }
    fn visit_variable_declaration(&mut self, node: &VarDeclStmt) -> Vec<String> {
        node.value.accept(self)
    }
    fn visit_fn_declaration(&mut self, node: &FnDeclStmt) -> Vec<String> {
        node.body.accept(self)
    }
    fn visit_return_stmt(&mut self, node: &ReturnStmt) -> Vec<String> {
        node.value.accept(self)
    }
    fn visit_expression_stmt(&mut self, node: &ExpressionStmt) -> Vec<String> {
        node.expression.accept(self)
    }
    fn visit_extern_import(&mut self, _node: &ExternImportStmt) -> Vec<String> {
        vec![]
    }
    fn visit_static_import(&mut self, _node: &StaticImportStmt) -> Vec<String> {
        vec![]
    }
    fn visit_block(&mut self, node: &BlockExpr) -> Vec<String> {
        node.body.iter().flat_map(|item| item.accept(self)).collect()
    }
    fn visit_binary(&mut self, node: &BinaryExpr) -> Vec<String> {
        let mut names = node.left.accept(self);
        names.extend(node.right.accept(self));
        names
    }
    fn visit_unary(&mut self, node: &UnaryExpr) -> Vec<String> {
        node.operand.accept(self)
    }
    fn visit_fn_call(&mut self, node: &CallExpr) -> Vec<String> {
        let mut names = vec![node.callee.name.clone()];
        names.extend(node.arguments.iter().flat_map(|a| a.accept(self)));
        names
    }
    fn visit_immediate_fn_call(&mut self, node: &ImmediateCallExpr) -> Vec<String> {
        node.callee.accept(self)
    }
    fn visit_fn(&mut self, node: &FnExpr) -> Vec<String> {
        node.body.accept(self)
    }
    fn visit_literal(&mut self, _node: &LiteralExpr) -> Vec<String> {
        vec![]
    }
    fn visit_tuple(&mut self, node: &TupleExpr) -> Vec<String> {
        node.elements.iter().flat_map(|e| e.accept(self)).collect()
    }
    fn visit_identifier(&mut self, _node: &Identifier) -> Vec<String> {
        vec![]
    }
    fn visit_operator(&mut self, _node: &Operator) -> Vec<String> {
        vec![]
    }
    fn visit_path_qualifier(&mut self, _node: &PathQualifierExpr) -> Vec<String> {
        vec![]
    }
}

#[test]
fn test_visitor_returns_values() {
    let program = program("action main() -> { print(len(x)); (compute () -> g(1))(); }");

    assert_eq!(program.accept(&mut CallNames), vec!["print", "len", "g"]);
}
