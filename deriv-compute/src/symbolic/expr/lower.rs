//! Conversion of a parsed [`AstExpr`] into a [`SymExpr`].
//!
//! Lowering resolves every name in the formula against the variable of differentiation, the named
//! constants, and the function table. It does not stop at the first unknown name: every problem
//! in the formula is collected so that they can be reported together.

use crate::{
    error::{kind, Error},
    funcs::{similar_names, Func, NamedConst},
    primitive::{float_from_str, int_from_str},
    symbolic::simplify::fraction::make_fraction,
};
use deriv_parser::parser::{
    call::Call,
    expr::Expr as AstExpr,
    literal::{LitSym, Literal},
    token::op::{BinOpKind, UnaryOpKind},
};
use super::{Primary, SymExpr};

/// Lowers the given AST into a [`SymExpr`], treating `variable` as the only free variable.
pub fn lower(ast: &AstExpr, variable: &str) -> Result<SymExpr, Error> {
    let mut lowering = Lowering {
        variable,
        parse_errors: Vec::new(),
        unsupported: None,
    };
    let expr = lowering.lower(ast);

    if !lowering.parse_errors.is_empty() {
        return Err(Error::Parse(lowering.parse_errors));
    }
    if let Some(unsupported) = lowering.unsupported {
        return Err(Error::Unsupported(unsupported));
    }

    // an expression is only missing if an error was recorded
    expr.ok_or_else(|| Error::Parse(Vec::new()))
}

/// State of a single lowering pass.
struct Lowering<'a> {
    variable: &'a str,
    parse_errors: Vec<deriv_error::Error>,
    unsupported: Option<deriv_error::Error>,
}

impl Lowering<'_> {
    /// Lowers the expression, returning [`None`] if it, or any subexpression, is invalid.
    fn lower(&mut self, expr: &AstExpr) -> Option<SymExpr> {
        match expr {
            AstExpr::Literal(literal) => self.lower_literal(literal),
            AstExpr::Paren(paren) => self.lower(&paren.expr),
            AstExpr::Call(call) => self.lower_call(call),
            AstExpr::Unary(unary) => {
                let operand = self.lower(&unary.operand)?;
                match unary.op.kind {
                    UnaryOpKind::Neg => Some(-operand),
                }
            },
            AstExpr::Binary(binary) => {
                // lower both sides before bailing out, so that errors on both sides are reported
                let lhs = self.lower(&binary.lhs);
                let rhs = self.lower(&binary.rhs);
                let (lhs, rhs) = (lhs?, rhs?);
                Some(match binary.op.kind {
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs + -rhs,
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => make_fraction(lhs, rhs),
                    BinOpKind::Exp => SymExpr::pow(lhs, rhs),
                })
            },
        }
    }

    fn lower_literal(&mut self, literal: &Literal) -> Option<SymExpr> {
        match literal {
            Literal::Integer(int) => {
                let value = int_from_str(&int.value);
                if value.is_none() {
                    self.parse_error(vec![int.span.clone()], kind::InvalidNumber {
                        literal: int.value.clone(),
                    });
                }
                value.map(|n| SymExpr::Primary(Primary::Integer(n)))
            },
            Literal::Float(float) => {
                let value = float_from_str(&float.value);
                if value.is_none() {
                    self.parse_error(vec![float.span.clone()], kind::InvalidNumber {
                        literal: float.value.clone(),
                    });
                }
                value.map(|n| SymExpr::Primary(Primary::Float(n)))
            },
            Literal::Symbol(sym) => self.lower_symbol(sym),
        }
    }

    fn lower_symbol(&mut self, sym: &LitSym) -> Option<SymExpr> {
        if sym.name == self.variable {
            return Some(SymExpr::symbol(&sym.name));
        }

        if let Some(named) = NamedConst::from_name(&sym.name) {
            return Some(SymExpr::Primary(Primary::Named(named)));
        }

        if Func::from_name(&sym.name).is_some() || sym.name == "sqrt" {
            self.parse_error(vec![sym.span.clone()], kind::MissingArgs {
                name: sym.name.clone(),
            });
        } else {
            self.parse_error(vec![sym.span.clone()], kind::UnknownSymbol {
                name: sym.name.clone(),
                variable: self.variable.to_string(),
                suggestions: similar_names(&sym.name, self.variable),
            });
        }
        None
    }

    fn lower_call(&mut self, call: &Call) -> Option<SymExpr> {
        let name = call.name.name.as_str();
        let args = call.args.iter()
            .map(|arg| self.lower(arg))
            .collect::<Vec<_>>();

        // `x(...)` multiplies the variable by the parenthesized expression
        let is_variable = name == self.variable;
        let func = Func::from_name(name);
        if !is_variable && func.is_none() && name != "sqrt" {
            self.parse_error(vec![call.name.span.clone()], kind::UnknownFunction {
                name: name.to_string(),
                suggestions: similar_names(name, self.variable),
            });
            return None;
        }

        let [arg] = <[Option<SymExpr>; 1]>::try_from(args).ok().or_else(|| {
            if self.unsupported.is_none() {
                self.unsupported = Some(deriv_error::Error::new(
                    call.outer_span().to_vec(),
                    kind::WrongArity { name: name.to_string(), given: call.args.len() },
                ));
            }
            None
        })?;
        let arg = arg?;

        Some(match func {
            _ if is_variable => SymExpr::symbol(name) * arg,
            Some(func) => SymExpr::call(func, arg),
            None => arg.sqrt(),
        })
    }

    fn parse_error(&mut self, spans: Vec<std::ops::Range<usize>>, kind: impl deriv_error::ErrorKind + 'static) {
        self.parse_errors.push(deriv_error::Error::new(spans, kind));
    }
}

#[cfg(test)]
mod tests {
    use deriv_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    fn lower_str(input: &str) -> Result<SymExpr, Error> {
        let ast = Parser::new(input).try_parse_full::<AstExpr>()
            .map_err(|err| Error::Parse(vec![err.into()]))?;
        lower(&ast, "x")
    }

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn subtraction_and_division() {
        assert_eq!(
            lower_str("x - 1/x").unwrap(),
            SymExpr::Add(vec![
                x(),
                SymExpr::Mul(vec![SymExpr::integer(-1), x().recip()]),
            ]),
        );
    }

    #[test]
    fn reciprocal_is_a_power() {
        assert_eq!(lower_str("1/x").unwrap(), x().recip());
        assert_eq!(lower_str("1/(x + 1)").unwrap(), (x() + SymExpr::integer(1)).recip());
    }

    #[test]
    fn sqrt_is_a_power() {
        assert_eq!(lower_str("sqrt(x)").unwrap(), x().sqrt());
    }

    #[test]
    fn variable_call_is_a_product() {
        assert_eq!(
            lower_str("x(x + 1)").unwrap(),
            SymExpr::Mul(vec![x(), x() + SymExpr::integer(1)]),
        );
    }

    #[test]
    fn constants_and_aliases() {
        assert_eq!(
            lower_str("log(pi x)").unwrap(),
            SymExpr::call(Func::Ln, SymExpr::Primary(Primary::Named(NamedConst::Pi)) * x()),
        );
    }

    #[test]
    fn unknown_function() {
        let err = lower_str("foo(x)").unwrap_err();
        assert_eq!(err.kind_name(), "ParseError");
        assert_eq!(err.message(), "the `foo` function does not exist");
        assert_eq!(err.errors()[0].spans, vec![0..3]);
    }

    #[test]
    fn collects_every_unknown_name() {
        let err = lower_str("y + sinn(2)").unwrap_err();
        let spans = err.errors().iter().map(|e| e.spans.clone()).collect::<Vec<_>>();
        assert_eq!(spans, vec![vec![0..1], vec![4..8]]);
    }

    #[test]
    fn missing_args() {
        let err = lower_str("2 sin").unwrap_err();
        assert_eq!(err.message(), "the `sin` function is missing its argument");
    }

    #[test]
    fn wrong_arity() {
        let err = lower_str("sin(x, 2)").unwrap_err();
        assert_eq!(err.kind_name(), "UnsupportedOperationError");
        assert_eq!(err.message(), "the `sin` function takes exactly one argument");

        let err = lower_str("cos()").unwrap_err();
        assert_eq!(err.kind_name(), "UnsupportedOperationError");
    }
}
