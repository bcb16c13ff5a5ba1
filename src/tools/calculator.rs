use serde_json::json;
use super::ToolRegistry;

/// Register the `calculator` tool: evaluates a plain arithmetic
/// expression and returns the numeric result as text.
///
/// The grammar is deliberately tiny — numbers, `+ - * /`, parentheses,
/// `**` for exponentiation, and unary minus. No identifiers, no
/// function calls, no code execution of any kind. Malformed input and
/// division by zero come back as `Err` text so the acting step can
/// surface them to the model instead of crashing.
pub fn register_calculator(registry: &mut ToolRegistry) {
    registry.register(
        "calculator",
        "Evaluate an arithmetic expression. Supports numbers, + - * /, \
         parentheses and ** for exponentiation. Use for any calculation.",
        json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The arithmetic expression to evaluate, e.g. \"2 + 3 * 4\""
                }
            },
            "required": ["expression"]
        }),
        Box::new(|args| {
            let expression = args.get("expression")
                .and_then(|v| v.as_str())
                .ok_or_else(|| "calculator requires a string 'expression' argument".to_string())?;
            evaluate(expression)
        }),
    );
}

/// Evaluate `expression` and format the result.
/// Integral results print without a fractional part: "2 + 3 * 4" → "14".
pub fn evaluate(expression: &str) -> Result<String, String> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(format!("unexpected trailing input in '{}'", expression));
    }
    if !value.is_finite() {
        return Err("result is not a finite number".to_string());
    }
    Ok(format_number(value))
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Pow,      // **
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '+' => { tokens.push(Token::Plus); i += 1; }
            '-' => { tokens.push(Token::Minus); i += 1; }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::Pow);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '/' => { tokens.push(Token::Slash); i += 1; }
            '(' => { tokens.push(Token::LParen); i += 1; }
            ')' => { tokens.push(Token::RParen); i += 1; }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal.parse::<f64>()
                    .map_err(|_| format!("malformed number '{}'", literal))?;
                tokens.push(Token::Number(value));
            }
            other => {
                return Err(format!(
                    "unsupported character '{}': only numbers, + - * / ( ) and ** are allowed",
                    other
                ));
            }
        }
    }

    if tokens.is_empty() {
        return Err("empty expression".to_string());
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos:    usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let t = self.peek();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus  => { self.pos += 1; value += self.term()?; }
                Token::Minus => { self.pos += 1; value -= self.term()?; }
                _ => break,
            }
        }
        Ok(value)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => { self.pos += 1; value *= self.unary()?; }
                Token::Slash => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err("division by zero".to_string());
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // unary := '-' unary | power
    fn unary(&mut self) -> Result<f64, String> {
        if self.peek() == Some(Token::Minus) {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        self.power()
    }

    // power := primary ('**' unary)?   — right-associative
    fn power(&mut self) -> Result<f64, String> {
        let base = self.primary()?;
        if self.peek() == Some(Token::Pow) {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    // primary := number | '(' expr ')'
    fn primary(&mut self) -> Result<f64, String> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err("missing closing parenthesis".to_string()),
                }
            }
            Some(other) => Err(format!("expected a number or '(', found {:?}", other)),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}
