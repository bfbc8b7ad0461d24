use crate::ast::{BinaryOp, Expr, Lambda, LogicalOp, UnaryOp};
use crate::error::Error;
use crate::lexer::{Lexer, Token};
use crate::runtime::type_casting::resolve_type;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Token,
    look_pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self, Error> {
        let mut lexer = Lexer::new(input);
        let lookahead = lexer.next_token()?;
        let look_pos = lexer.last_start();
        Ok(Self { lexer, lookahead, look_pos })
    }

    fn bump(&mut self) -> Result<(), Error> {
        self.lookahead = self.lexer.next_token()?;
        self.look_pos = self.lexer.last_start();
        Ok(())
    }

    fn expect(&mut self, tok: Token, msg: &str) -> Result<(), Error> {
        if self.lookahead == tok {
            self.bump()
        } else {
            self.err_here(msg)
        }
    }

    /// Token after the lookahead, without consuming anything.
    fn peek_next(&self) -> Result<Token, Error> {
        self.lexer.clone().next_token()
    }

    fn err_here<T>(&self, msg: &str) -> Result<T, Error> { Err(Error::new(msg, Some(self.look_pos))) }

    /// Parses a whole expression, rejecting trailing input.
    pub fn parse(&mut self) -> Result<Expr, Error> {
        let expr = self.parse_expr()?;
        self.expect_eof()?;
        Ok(expr)
    }

    /// Parses a callable form `p0,p1,...:body`.
    pub fn parse_lambda(&mut self) -> Result<Lambda, Error> {
        let mut params = Vec::new();
        loop {
            match self.lookahead.clone() {
                Token::Identifier(name) => {
                    self.bump()?;
                    params.push(name);
                }
                _ => return self.err_here("Expected parameter name"),
            }
            match self.lookahead {
                Token::Comma => self.bump()?,
                Token::Colon => {
                    self.bump()?;
                    break;
                }
                _ => return self.err_here("Expected ',' or ':' after parameter"),
            }
        }
        let body = self.parse_expr()?;
        self.expect_eof()?;
        Ok(Lambda { params, body })
    }

    fn expect_eof(&self) -> Result<(), Error> {
        match self.lookahead {
            Token::Eof => Ok(()),
            ref other => Err(Error::new(format!("Unexpected trailing token: {:?}", other), Some(self.look_pos))),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, Error> {
        self.parse_ternary()
    }

    fn parse_ternary(&mut self) -> Result<Expr, Error> {
        let cond = self.parse_or()?;
        if let Token::QMark = self.lookahead {
            self.bump()?; // '?'
            let then = self.parse_expr()?;
            self.expect(Token::Colon, "Expected ':' in ternary")?;
            let otherwise = self.parse_expr()?;
            Ok(Expr::Ternary { cond: Box::new(cond), then: Box::new(then), otherwise: Box::new(otherwise) })
        } else {
            Ok(cond)
        }
    }

    fn parse_or(&mut self) -> Result<Expr, Error> {
        let mut node = self.parse_and()?;
        while let Token::Or | Token::OrOr = self.lookahead {
            self.bump()?;
            let rhs = self.parse_and()?;
            node = Expr::Logical(Box::new(node), LogicalOp::Or, Box::new(rhs));
        }
        Ok(node)
    }

    fn parse_and(&mut self) -> Result<Expr, Error> {
        let mut node = self.parse_not()?;
        while let Token::And | Token::AndAnd = self.lookahead {
            self.bump()?;
            let rhs = self.parse_not()?;
            node = Expr::Logical(Box::new(node), LogicalOp::And, Box::new(rhs));
        }
        Ok(node)
    }

    fn parse_not(&mut self) -> Result<Expr, Error> {
        if let Token::Not = self.lookahead {
            self.bump()?;
            let expr = self.parse_not()?;
            return Ok(Expr::Unary(UnaryOp::Not, Box::new(expr)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, Error> {
        let mut node = self.parse_additive()?;
        loop {
            let op = match self.lookahead {
                Token::EqEq => BinaryOp::Eq,
                Token::NotEq => BinaryOp::Ne,
                Token::Greater => BinaryOp::Gt,
                Token::Less => BinaryOp::Lt,
                Token::Ge => BinaryOp::Ge,
                Token::Le => BinaryOp::Le,
                Token::In => BinaryOp::In,
                Token::Not if self.peek_next()? == Token::In => {
                    self.bump()?; // 'not', 'in' is consumed below
                    BinaryOp::NotIn
                }
                _ => break,
            };
            self.bump()?;
            let rhs = self.parse_additive()?;
            node = Expr::Binary(Box::new(node), op, Box::new(rhs));
        }
        Ok(node)
    }

    fn parse_additive(&mut self) -> Result<Expr, Error> {
        let mut node = self.parse_multiplicative()?;
        loop {
            let op = match self.lookahead {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.bump()?;
            let rhs = self.parse_multiplicative()?;
            node = Expr::Binary(Box::new(node), op, Box::new(rhs));
        }
        Ok(node)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, Error> {
        let mut node = self.parse_unary()?;
        loop {
            let op = match self.lookahead {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                Token::DoubleSlash => BinaryOp::FloorDiv,
                Token::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.bump()?;
            let rhs = self.parse_unary()?;
            node = Expr::Binary(Box::new(node), op, Box::new(rhs));
        }
        Ok(node)
    }

    fn parse_unary(&mut self) -> Result<Expr, Error> {
        let op = match self.lookahead {
            Token::Plus => UnaryOp::Plus,
            Token::Minus => UnaryOp::Minus,
            Token::Bang => UnaryOp::Not,
            _ => return self.parse_power(),
        };
        self.bump()?;
        let expr = self.parse_unary()?;
        Ok(Expr::Unary(op, Box::new(expr)))
    }

    fn parse_power(&mut self) -> Result<Expr, Error> {
        // Right associative with higher precedence than unary
        let left = self.parse_cast()?;
        if let Token::DoubleStar | Token::Caret = self.lookahead {
            self.bump()?;
            let right = self.parse_unary()?; // exponent can be unary like -2
            Ok(Expr::Binary(Box::new(left), BinaryOp::Pow, Box::new(right)))
        } else {
            Ok(left)
        }
    }

    fn parse_cast(&mut self) -> Result<Expr, Error> {
        let mut node = self.parse_postfix()?;
        if let Token::DoubleColon = self.lookahead {
            self.bump()?; // '::'
            let ty = match self.lookahead.clone() {
                Token::Identifier(s) => match resolve_type(&s) {
                    Some(ty) => ty,
                    None => return self.err_here("Unknown cast type"),
                },
                Token::Null => crate::ast::TypeName::Null,
                _ => return self.err_here("Expected type name after '::'"),
            };
            self.bump()?;
            node = Expr::TypeCast { expr: Box::new(node), ty };
        }
        Ok(node)
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, Error> {
        // lookahead is '('
        self.bump()?;
        let mut args = Vec::new();
        if let Token::RParen = self.lookahead {
            self.bump()?;
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            match self.lookahead {
                Token::Comma => self.bump()?,
                Token::RParen => {
                    self.bump()?;
                    return Ok(args);
                }
                _ => return self.err_here("Expected ',' or ')' in argument list"),
            }
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr, Error> {
        let mut node = self.parse_atom()?;
        loop {
            match self.lookahead {
                Token::Dot => {
                    self.bump()?; // '.'
                    let name = match self.lookahead.clone() {
                        Token::Identifier(s) => { self.bump()?; s }
                        Token::If => { self.bump()?; "IF".to_string() }
                        _ => return self.err_here("Expected method name after '.'"),
                    };
                    if self.lookahead != Token::LParen {
                        return self.err_here("Expected '(' after method name");
                    }
                    let args = self.parse_args()?;
                    node = Expr::MethodCall { target: Box::new(node), name: name.to_uppercase(), args };
                }
                Token::LBracket => {
                    self.bump()?; // '['
                    // Cases: [expr], [start:end], [:end], [start:]
                    let start = match self.lookahead {
                        Token::RBracket => return self.err_here("Empty index '[]' not allowed"),
                        Token::Colon => None,
                        _ => {
                            let first = self.parse_expr()?;
                            if let Token::RBracket = self.lookahead {
                                self.bump()?;
                                node = Expr::Index { target: Box::new(node), index: Box::new(first) };
                                continue;
                            }
                            Some(first)
                        }
                    };
                    self.expect(Token::Colon, "Expected ':' or ']' in indexing")?;
                    let end = match self.lookahead {
                        Token::RBracket => None,
                        _ => Some(self.parse_expr()?),
                    };
                    self.expect(Token::RBracket, "Expected ']' to close slice")?;
                    node = Expr::Slice { target: Box::new(node), start: start.map(Box::new), end: end.map(Box::new) };
                }
                _ => break,
            }
        }
        Ok(node)
    }

    fn parse_atom(&mut self) -> Result<Expr, Error> {
        match self.lookahead.clone() {
            Token::Integer(n) => { self.bump()?; Ok(Expr::Integer(n)) }
            Token::Float(n) => { self.bump()?; Ok(Expr::Float(n)) }
            Token::String(s) => { self.bump()?; Ok(Expr::StringLit(s)) }
            Token::True => { self.bump()?; Ok(Expr::Boolean(true)) }
            Token::False => { self.bump()?; Ok(Expr::Boolean(false)) }
            Token::Null => { self.bump()?; Ok(Expr::Null) }
            Token::LParen => {
                self.bump()?;
                let expr = self.parse_expr()?;
                self.expect(Token::RParen, "Expected ')'")?;
                Ok(expr)
            }
            Token::Identifier(name) => {
                self.bump()?; // consume ident
                if let Token::LParen = self.lookahead {
                    let args = self.parse_args()?;
                    Ok(Expr::FunctionCall { name: name.to_uppercase(), args })
                } else {
                    Ok(Expr::Variable(name))
                }
            }
            // `if` is a keyword in comprehensions but also the IF built-in
            Token::If => {
                self.bump()?;
                if self.lookahead != Token::LParen {
                    return self.err_here("Expected '(' after 'if'");
                }
                let args = self.parse_args()?;
                Ok(Expr::FunctionCall { name: "IF".to_string(), args })
            }
            Token::LBracket => self.parse_bracket(),
            other => Err(Error::new(format!("Unexpected token: {:?}", other), Some(self.look_pos))),
        }
    }

    /// Array literal `[a, b]` or comprehension `[body for x in iter if cond]`.
    fn parse_bracket(&mut self) -> Result<Expr, Error> {
        self.bump()?; // consume '['
        if let Token::RBracket = self.lookahead {
            self.bump()?;
            return Ok(Expr::Array(Vec::new()));
        }
        let first = self.parse_expr()?;
        if let Token::For = self.lookahead {
            self.bump()?;
            let var = match self.lookahead.clone() {
                Token::Identifier(name) => { self.bump()?; name }
                _ => return self.err_here("Expected loop variable after 'for'"),
            };
            self.expect(Token::In, "Expected 'in' in comprehension")?;
            let iter = self.parse_or()?;
            let filter = if let Token::If = self.lookahead {
                self.bump()?;
                Some(Box::new(self.parse_or()?))
            } else {
                None
            };
            self.expect(Token::RBracket, "Expected ']' to close comprehension")?;
            return Ok(Expr::Comprehension { body: Box::new(first), var, iter: Box::new(iter), filter });
        }
        let mut items = vec![first];
        loop {
            match self.lookahead {
                Token::Comma => {
                    self.bump()?;
                    items.push(self.parse_expr()?);
                }
                Token::RBracket => {
                    self.bump()?;
                    return Ok(Expr::Array(items));
                }
                _ => return self.err_here("Expected ',' or ']' in array"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Expr {
        Parser::new(input).unwrap().parse().unwrap()
    }

    #[test]
    fn lambda_header_and_body() {
        let lambda = Parser::new("_arg0,_arg1:_arg0 + _arg1").unwrap().parse_lambda().unwrap();
        assert_eq!(lambda.params, vec!["_arg0".to_string(), "_arg1".to_string()]);
        assert_eq!(
            lambda.body,
            Expr::Binary(
                Box::new(Expr::Variable("_arg0".into())),
                BinaryOp::Add,
                Box::new(Expr::Variable("_arg1".into()))
            )
        );
    }

    #[test]
    fn comprehension_with_filter() {
        match parse("[x * 2 for x in xs if x > 1]") {
            Expr::Comprehension { var, filter, .. } => {
                assert_eq!(var, "x");
                assert!(filter.is_some());
            }
            other => panic!("expected comprehension, got {:?}", other),
        }
    }

    #[test]
    fn not_in_is_one_operator() {
        assert!(matches!(parse("1 not in xs"), Expr::Binary(_, BinaryOp::NotIn, _)));
        assert!(matches!(parse("not 1 in xs"), Expr::Unary(UnaryOp::Not, _)));
    }

    #[test]
    fn power_binds_tighter_than_unary_minus() {
        assert!(matches!(parse("-3 ** 2"), Expr::Unary(UnaryOp::Minus, _)));
    }

    #[test]
    fn trailing_input_is_rejected() {
        let err = Parser::new("1 2").unwrap().parse().unwrap_err();
        assert_eq!(err.position, Some(2));
    }

    #[test]
    fn function_names_are_uppercased() {
        assert!(matches!(parse("len(x)"), Expr::FunctionCall { ref name, .. } if name == "LEN"));
    }

    #[test]
    fn if_keyword_doubles_as_function() {
        assert!(matches!(parse("if(c, 1, 2)"), Expr::FunctionCall { ref name, ref args } if name == "IF" && args.len() == 3));
        assert!(matches!(parse("c.if(1, 2)"), Expr::MethodCall { ref name, .. } if name == "IF"));
        assert!(matches!(
            parse("[x for x in xs if(x > 1)]"),
            Expr::Comprehension { filter: Some(_), .. }
        ));
        assert!(Parser::new("if + 1").unwrap().parse().is_err());
    }
}
