#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(i64),
    Float(f64),
    StringLit(String),
    Boolean(bool),
    Null,
    Unary(UnaryOp, Box<Expr>),
    Binary(Box<Expr>, BinaryOp, Box<Expr>),
    /// Short-circuit `and` / `or`.
    Logical(Box<Expr>, LogicalOp, Box<Expr>),
    Ternary { cond: Box<Expr>, then: Box<Expr>, otherwise: Box<Expr> },
    Variable(String),
    FunctionCall { name: String, args: Vec<Expr> },
    MethodCall { target: Box<Expr>, name: String, args: Vec<Expr> },
    Array(Vec<Expr>),
    Comprehension {
        body: Box<Expr>,
        var: String,
        iter: Box<Expr>,
        filter: Option<Box<Expr>>,
    },
    Index { target: Box<Expr>, index: Box<Expr> },
    Slice { target: Box<Expr>, start: Option<Box<Expr>>, end: Option<Box<Expr>> },
    TypeCast { expr: Box<Expr>, ty: TypeName },
}

/// A parsed callable form: `_arg0,_arg1:body`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    Integer,
    Float,
    String,
    Boolean,
    Array,
    Null,
}

impl TypeName {
    pub fn name(&self) -> &'static str {
        match self {
            TypeName::Integer => "int",
            TypeName::Float => "float",
            TypeName::String => "str",
            TypeName::Boolean => "bool",
            TypeName::Array => "list",
            TypeName::Null => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
    In,
    NotIn,
}
