use crate::ast::{BinaryOperator, Expr, Position, Statement};

/// The pieces of a `for (init; condition; update) { body }` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub init:      Statement,
    pub condition: Expr,
    pub update:    Statement,
    pub body:      Vec<Statement>,
    /// Position of the `for` keyword.
    pub pos:       Position,
    /// Position of the body's opening brace.
    pub body_pos:  Position,
}

/// Rewrites a `for` loop into an initializer followed by a `while`.
///
/// ```text
/// for (init; cond; update) { body }
/// ```
/// becomes
/// ```text
/// { init; while (cond) { <loop body> { body } update; } }
/// ```
/// The outer block scopes the loop variable to the loop. The user body is
/// wrapped in [`Statement::LoopBody`], which swallows `continue`, so the
/// update still runs before the condition is re-tested.
#[must_use]
pub fn desugar_for(for_loop: ForLoop) -> Statement {
    let ForLoop { init,
                  condition,
                  update,
                  body,
                  pos,
                  body_pos, } = for_loop;

    let body = vec![Statement::LoopBody { statements: body,
                                          pos:        body_pos, },
                    update];

    Statement::Block { statements: vec![init,
                                        Statement::While { condition,
                                                           body,
                                                           pos }],
                       pos }
}

/// Rewrites `name op= value` into `name = name op value`.
///
/// `name_pos` locates the target, `op_pos` the compound operator; the
/// generated binary expression is reported at the operator.
#[must_use]
pub fn desugar_compound_assignment(name: String,
                                   op: BinaryOperator,
                                   value: Expr,
                                   name_pos: Position,
                                   op_pos: Position)
                                   -> Statement {
    let current = Expr::Identifier { name: name.clone(),
                                     pos:  name_pos, };
    Statement::Assign { name,
                        value: Expr::Binary { left: Box::new(current),
                                              op,
                                              right: Box::new(value),
                                              pos: op_pos },
                        pos: name_pos }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{LiteralValue, Mutability};

    fn int(value: i64) -> Expr {
        Expr::Literal { value: LiteralValue::Int(value),
                        pos:   Position::default(), }
    }

    #[test]
    fn compound_assignment_reads_target_once_on_the_right() {
        let statement = desugar_compound_assignment("x".into(),
                                                    BinaryOperator::Mul,
                                                    int(3),
                                                    Position::new(1, 1),
                                                    Position::new(1, 3));
        let Statement::Assign { name, value, .. } = statement else {
            panic!("expected an assignment");
        };
        assert_eq!(name, "x");
        assert_eq!(value,
                   Expr::Binary { left:  Box::new(Expr::Identifier { name: "x".into(),
                                                                     pos:  Position::new(1, 1), }),
                                  op:    BinaryOperator::Mul,
                                  right: Box::new(int(3)),
                                  pos:   Position::new(1, 3), });
    }

    #[test]
    fn for_loop_puts_update_after_the_continue_boundary() {
        let init = Statement::Let { name:       "i".into(),
                                    value:      int(0),
                                    mutability: Mutability::Mutable,
                                    pos:        Position::default(), };
        let update = Statement::Assign { name:  "i".into(),
                                         value: int(1),
                                         pos:   Position::default(), };
        let user_body = vec![Statement::Continue { pos: Position::default() }];

        let desugared = desugar_for(ForLoop { init:      init.clone(),
                                              condition: Expr::Literal { value: true.into(),
                                                                         pos:   Position::default(), },
                                              update:    update.clone(),
                                              body:      user_body.clone(),
                                              pos:       Position::default(),
                                              body_pos:  Position::default(), });

        let Statement::Block { statements, .. } = desugared else {
            panic!("expected a block");
        };
        assert_eq!(statements[0], init);
        let Statement::While { body, .. } = &statements[1] else {
            panic!("expected a while loop");
        };
        assert_eq!(body[0],
                   Statement::LoopBody { statements: user_body,
                                         pos:        Position::default(), });
        assert_eq!(body[1], update);
    }
}
