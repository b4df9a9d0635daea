//! Helpers shared by the integration test crates.

use sayu_parser::ast::{
    ast::{Expr, Program},
    expressions::{
        BinaryExpr, BlockExpr, CallExpr, FnExpr, Identifier, ImmediateCallExpr, LiteralExpr,
        LiteralKind, PathQualifierExpr, PathTarget, TupleExpr, UnaryExpr,
    },
    operators::{Associativity, Operator, PREC_CALL, PREC_PREFIX},
    statements::{
        ExpressionStmt, ExternImportStmt, FnDeclStmt, ReturnStmt, StaticImportStmt, VarDeclStmt,
    },
    visitor::Visitor,
};

/// Renders a tree as an s-expression that leaves out every span, so two
/// parses of differently written source compare equal when their
/// structure does.
pub struct TreeDump;

impl TreeDump {
    pub fn dump(program: &Program) -> String {
        program.accept(&mut TreeDump)
    }

    fn all(&mut self, exprs: &[Expr]) -> String {
        exprs
            .iter()
            .map(|e| e.accept(self))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Visitor<String> for TreeDump {
    fn visit_program(&mut self, node: &Program) -> String {
        let body = node
            .body
            .iter()
            .map(|stmt| stmt.accept(self))
            .collect::<Vec<_>>();
        format!("(program {})", body.join(" "))
    }

    fn visit_variable_declaration(&mut self, node: &VarDeclStmt) -> String {
        format!(
            "(let mutable={} {} {})",
            node.mutable,
            node.identifier.accept(self),
            node.value.accept(self)
        )
    }

    fn visit_fn_declaration(&mut self, node: &FnDeclStmt) -> String {
        format!(
            "(fn-decl {:?} {} ({}) {})",
            node.kind,
            node.identifier.accept(self),
            SourcePrinter::names(&node.parameters),
            node.body.accept(self)
        )
    }

    fn visit_return_stmt(&mut self, node: &ReturnStmt) -> String {
        format!("(return {})", node.value.accept(self))
    }

    fn visit_expression_stmt(&mut self, node: &ExpressionStmt) -> String {
        format!("(stmt {})", node.expression.accept(self))
    }

    fn visit_extern_import(&mut self, node: &ExternImportStmt) -> String {
        format!(
            "(extern {} {})",
            node.resource.accept(self),
            node.alias.accept(self)
        )
    }

    fn visit_static_import(&mut self, node: &StaticImportStmt) -> String {
        format!("(import {})", node.path.accept(self))
    }

    fn visit_block(&mut self, node: &BlockExpr) -> String {
        let items = node
            .body
            .iter()
            .map(|item| item.accept(self))
            .collect::<Vec<_>>();
        format!("(block tail={} {})", node.has_tail_expr, items.join(" "))
    }

    fn visit_binary(&mut self, node: &BinaryExpr) -> String {
        format!(
            "({} {} {})",
            node.operator.accept(self),
            node.left.accept(self),
            node.right.accept(self)
        )
    }

    fn visit_unary(&mut self, node: &UnaryExpr) -> String {
        format!(
            "({} {})",
            node.operator.accept(self),
            node.operand.accept(self)
        )
    }

    fn visit_fn_call(&mut self, node: &CallExpr) -> String {
        format!(
            "(call {} {})",
            node.callee.accept(self),
            self.all(&node.arguments)
        )
    }

    fn visit_immediate_fn_call(&mut self, node: &ImmediateCallExpr) -> String {
        format!(
            "(call-value {} {})",
            node.callee.accept(self),
            self.all(&node.arguments)
        )
    }

    fn visit_fn(&mut self, node: &FnExpr) -> String {
        let name = node
            .identifier
            .as_ref()
            .map_or_else(|| "_".to_string(), |i| i.accept(self));
        format!(
            "(fn {:?} {name} ({}) {})",
            node.kind,
            SourcePrinter::names(&node.parameters),
            node.body.accept(self)
        )
    }

    fn visit_literal(&mut self, node: &LiteralExpr) -> String {
        format!("({:?} {:?})", node.kind, node.value)
    }

    fn visit_tuple(&mut self, node: &TupleExpr) -> String {
        format!("(tuple {})", self.all(&node.elements))
    }

    fn visit_identifier(&mut self, node: &Identifier) -> String {
        node.name.clone()
    }

    fn visit_operator(&mut self, node: &Operator) -> String {
        format!("{:?}", node.operation)
    }

    fn visit_path_qualifier(&mut self, node: &PathQualifierExpr) -> String {
        let target = match &node.target {
            PathTarget::Leaf => "leaf".to_string(),
            PathTarget::Item(item) => format!("(item {})", item.accept(self)),
            PathTarget::Nested(nested) => nested.accept(self),
            PathTarget::Wildcard(_) => "*".to_string(),
            PathTarget::Group(entries) => {
                let entries = entries
                    .iter()
                    .map(|e| e.accept(self))
                    .collect::<Vec<_>>();
                format!("(group {})", entries.join(" "))
            }
        };
        let alias = node
            .alias
            .as_ref()
            .map_or_else(|| "_".to_string(), |a| a.accept(self));
        format!("(path {} {target} as={alias})", node.segment.accept(self))
    }
}

/// Prints a tree back as source text, adding parentheses only where the
/// precedence table needs them.
pub struct SourcePrinter;

impl SourcePrinter {
    pub fn print(program: &Program) -> String {
        program.accept(&mut SourcePrinter)
    }

    fn operand(&mut self, expr: &Expr, parenthesize: bool) -> String {
        let text = expr.accept(self);
        if parenthesize {
            format!("({text})")
        } else {
            text
        }
    }

    fn list(&mut self, exprs: &[Expr]) -> String {
        exprs
            .iter()
            .map(|e| e.accept(self))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn names(identifiers: &[Identifier]) -> String {
        identifiers
            .iter()
            .map(|i| i.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Visitor<String> for SourcePrinter {
    fn visit_program(&mut self, node: &Program) -> String {
        node.body
            .iter()
            .map(|stmt| stmt.accept(self))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn visit_variable_declaration(&mut self, node: &VarDeclStmt) -> String {
        let var = if node.mutable { "var " } else { "" };
        format!(
            "let {var}{} = {};",
            node.identifier.accept(self),
            node.value.accept(self)
        )
    }

    fn visit_fn_declaration(&mut self, node: &FnDeclStmt) -> String {
        format!(
            "{} {}({}) -> {}",
            node.kind.keyword(),
            node.identifier.name,
            Self::names(&node.parameters),
            node.body.accept(self)
        )
    }

    fn visit_return_stmt(&mut self, node: &ReturnStmt) -> String {
        format!("return {};", node.value.accept(self))
    }

    fn visit_expression_stmt(&mut self, node: &ExpressionStmt) -> String {
        format!("{};", node.expression.accept(self))
    }

    fn visit_extern_import(&mut self, node: &ExternImportStmt) -> String {
        format!(
            "import extern {} as {};",
            node.resource.accept(self),
            node.alias.name
        )
    }

    fn visit_static_import(&mut self, node: &StaticImportStmt) -> String {
        format!("import {};", node.path.accept(self))
    }

    fn visit_block(&mut self, node: &BlockExpr) -> String {
        if node.body.is_empty() {
            return "{}".to_string();
        }
        let items = node
            .body
            .iter()
            .map(|item| item.accept(self))
            .collect::<Vec<_>>();
        format!("{{ {} }}", items.join(" "))
    }

    fn visit_binary(&mut self, node: &BinaryExpr) -> String {
        let precedence = node.operator.precedence().unwrap_or(0);
        let associativity = node.operator.associativity();

        let left_precedence = node.left.precedence();
        let left = self.operand(
            &node.left,
            left_precedence < precedence
                || (left_precedence == precedence && associativity == Associativity::Right),
        );
        let right_precedence = node.right.precedence();
        let right = self.operand(
            &node.right,
            right_precedence < precedence
                || (right_precedence == precedence && associativity == Associativity::Left),
        );

        format!("{left} {} {right}", node.operator.accept(self))
    }

    fn visit_unary(&mut self, node: &UnaryExpr) -> String {
        let operand = self.operand(&node.operand, node.operand.precedence() < PREC_PREFIX);
        format!("{}{operand}", node.operator.accept(self))
    }

    fn visit_fn_call(&mut self, node: &CallExpr) -> String {
        format!("{}({})", node.callee.name, self.list(&node.arguments))
    }

    fn visit_immediate_fn_call(&mut self, node: &ImmediateCallExpr) -> String {
        // `(f)(x)` must not print as the named call `f(x)`.
        let parenthesize = node.callee.precedence() < PREC_CALL
            || matches!(*node.callee, Expr::Identifier(_));
        let callee = self.operand(&node.callee, parenthesize);
        format!("{callee}({})", self.list(&node.arguments))
    }

    fn visit_fn(&mut self, node: &FnExpr) -> String {
        let name = node
            .identifier
            .as_ref()
            .map(|i| format!(" {}", i.name))
            .unwrap_or_default();
        format!(
            "{}{name}({}) -> {}",
            node.kind.keyword(),
            Self::names(&node.parameters),
            node.body.accept(self)
        )
    }

    fn visit_literal(&mut self, node: &LiteralExpr) -> String {
        match node.kind {
            LiteralKind::Str => format!("\"{}\"", node.value),
            LiteralKind::RawStr => format!("r\"{}\"", node.value),
            LiteralKind::Char => format!("'{}'", node.value),
            LiteralKind::Int(_) | LiteralKind::Float => node.value.clone(),
        }
    }

    fn visit_tuple(&mut self, node: &TupleExpr) -> String {
        match node.elements.len() {
            1 => format!("({},)", node.elements[0].accept(self)),
            _ => format!("({})", self.list(&node.elements)),
        }
    }

    fn visit_identifier(&mut self, node: &Identifier) -> String {
        node.name.clone()
    }

    fn visit_operator(&mut self, node: &Operator) -> String {
        node.operation.symbol().to_string()
    }

    fn visit_path_qualifier(&mut self, node: &PathQualifierExpr) -> String {
        let target = match &node.target {
            PathTarget::Leaf => String::new(),
            PathTarget::Item(item) => format!("::{}", item.name),
            PathTarget::Nested(nested) => format!("::{}", nested.accept(self)),
            PathTarget::Wildcard(_) => "::*".to_string(),
            PathTarget::Group(entries) => format!(
                "::{{{}}}",
                entries
                    .iter()
                    .map(|e| e.accept(self))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        };
        let alias = node
            .alias
            .as_ref()
            .map(|a| format!(" as {}", a.name))
            .unwrap_or_default();
        format!("{}{target}{alias}", node.segment.name)
    }
}
