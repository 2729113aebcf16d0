use std::fmt;

use crate::interpreter::lexer::Lexeme;

/// A declared type tag.
///
/// `Int`, `Float` and `String` are the leaf types values can have. `Void` is
/// only valid as a function return type. `Array` never appears in source; it
/// marks a parameter that accepts an array of any shape and leaf type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `string`
    String,
    /// `void`
    Void,
    /// An array of any shape.
    Array,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Void => "void",
            Self::Array => "array",
        };
        f.write_str(name)
    }
}

/// Represents a literal value in the language.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A 64-bit signed integer literal.
    Int(i64),
    /// A 64-bit floating-point literal.
    Float(f64),
    /// A string literal, escapes left unprocessed.
    Str(String),
}

/// A reference to a named variable, with zero or more subscripts.
///
/// A subscript is `None` when written as empty brackets (`a[]`), which is
/// only meaningful as an unsized dimension in a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRef {
    /// Name of the variable.
    pub name:    String,
    /// Subscript expressions in source order.
    pub indices: Vec<Option<Expr>>,
    /// The identifier lexeme.
    pub lexeme:  Lexeme,
}

/// A call to a user-defined or built-in function.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Name of the function being called.
    pub name:      String,
    /// Argument expressions, evaluated left to right.
    pub arguments: Vec<Expr>,
    /// The function name lexeme.
    pub lexeme:    Lexeme,
}

/// An abstract syntax tree (AST) node representing an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value:  Literal,
        /// The literal lexeme.
        lexeme: Lexeme,
    },
    /// An initializer list such as `{1, 2, 3}`.
    InitializerList {
        /// The element expressions.
        elements: Vec<Self>,
        /// The opening brace.
        lexeme:   Lexeme,
    },
    /// A variable read, possibly indexed.
    Variable(VariableRef),
    /// A prefix operator applied to an operand.
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Box<Self>,
        /// The operator lexeme.
        lexeme:  Lexeme,
    },
    /// A binary operation.
    Binary {
        /// Left-hand side.
        left:   Box<Self>,
        /// The operator.
        op:     BinaryOperator,
        /// Right-hand side.
        right:  Box<Self>,
        /// The operator lexeme.
        lexeme: Lexeme,
    },
    /// A C-style cast, `(type) operand`.
    Cast {
        /// The target type.
        target:  TypeName,
        /// The value being converted.
        operand: Box<Self>,
        /// The opening parenthesis.
        lexeme:  Lexeme,
    },
    /// A function call used as a value.
    Call(Call),
}

impl Expr {
    /// Returns the lexeme that best identifies this expression in diagnostics.
    #[must_use]
    pub const fn lexeme(&self) -> &Lexeme {
        match self {
            Self::Literal { lexeme, .. }
            | Self::InitializerList { lexeme, .. }
            | Self::Unary { lexeme, .. }
            | Self::Binary { lexeme, .. }
            | Self::Cast { lexeme, .. } => lexeme,
            Self::Variable(variable) => &variable.lexeme,
            Self::Call(call) => &call.lexeme,
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Bitwise and (`&`)
    BitAnd,
    /// Bitwise or (`|`)
    BitOr,
    /// Bitwise exclusive or (`^`)
    BitXor,
    /// Left shift (`<<`)
    ShiftLeft,
    /// Right shift (`>>`)
    ShiftRight,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::And => "&&",
            Self::Or => "||",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        };
        f.write_str(operator)
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Bitwise complement (`~x`).
    BitNot,
    /// Logical NOT (`!x`).
    Not,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Negate => "-",
                        Self::BitNot => "~",
                        Self::Not => "!",
                    })
    }
}

/// An assignment operator: plain `=` or a compound form such as `+=`.
///
/// A compound form carries the binary operator it applies before storing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssignOperator {
    /// `=`
    Assign,
    /// `op=`
    Compound(BinaryOperator),
}

impl fmt::Display for AssignOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign => f.write_str("="),
            Self::Compound(op) => write!(f, "{op}="),
        }
    }
}

/// A `type name[dims] = initializer` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The declared leaf type.
    pub ty:          TypeName,
    /// The declared name together with its dimension expressions.
    pub target:      VariableRef,
    /// The optional initializer.
    pub initializer: Option<Expr>,
}

/// A `{ ... }` block. Executing it opens a new scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The statements, in order.
    pub statements: Vec<Statement>,
    /// The opening brace.
    pub lexeme:     Lexeme,
}

/// One typed parameter of a function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Declared leaf type.
    pub ty:     TypeName,
    /// Parameter name.
    pub name:   String,
    /// Number of `[]` suffixes; zero for a scalar parameter.
    pub dims:   usize,
    /// The parameter name lexeme.
    pub lexeme: Lexeme,
}

/// The body of a function: a block of statements or a built-in routine.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    /// A user-defined body.
    Block(Block),
    /// Marks a routine provided by the interpreter, identified by name.
    Builtin(&'static str),
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The declared return type.
    pub return_type: TypeName,
    /// The function name.
    pub name:        String,
    /// Number of `[]` suffixes written after the name. Always rejected at
    /// declaration time; kept so the evaluator can report it.
    pub return_dims: usize,
    /// Parameters in order.
    pub parameters:  Vec<Parameter>,
    /// The function body.
    pub body:        FunctionBody,
    /// The function name lexeme.
    pub lexeme:      Lexeme,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A lone `;`.
    Empty,
    /// A variable declaration.
    Declaration(Declaration),
    /// An assignment, plain or compound, to a variable or array element.
    Assignment {
        /// The assigned-to variable.
        target: VariableRef,
        /// The assignment operator.
        op:     AssignOperator,
        /// The right-hand side.
        value:  Expr,
        /// The operator lexeme.
        lexeme: Lexeme,
    },
    /// A function call whose result is discarded.
    Call(Call),
    /// A nested block.
    Block(Block),
    /// `if` / `else if` / `else`.
    If {
        /// Condition and body pairs, tested in order.
        branches:  Vec<(Expr, Self)>,
        /// The trailing `else` body.
        otherwise: Option<Box<Self>>,
        /// The `if` keyword.
        lexeme:    Lexeme,
    },
    /// `for (init; condition; increment) body`.
    For {
        /// Runs once in the loop scope.
        init:      Option<Box<Self>>,
        /// Checked before every iteration.
        condition: Expr,
        /// Runs after every iteration.
        increment: Option<Box<Self>>,
        /// The loop body.
        body:      Box<Self>,
        /// The `for` keyword.
        lexeme:    Lexeme,
    },
    /// `while (condition) body`.
    While {
        /// Checked before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
        /// The `while` keyword.
        lexeme:    Lexeme,
    },
    /// `do body while (condition);`.
    DoWhile {
        /// The loop body, run at least once.
        body:      Box<Self>,
        /// Checked after every iteration.
        condition: Expr,
        /// The `do` keyword.
        lexeme:    Lexeme,
    },
    /// `break;`
    Break(Lexeme),
    /// `continue;`
    Continue(Lexeme),
    /// `return [value];`
    Return {
        /// The returned expression, absent for `return;`.
        value:  Option<Expr>,
        /// The `return` keyword.
        lexeme: Lexeme,
    },
}

/// A top-level item.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A function declaration.
    Function(FunctionDecl),
    /// A global variable declaration.
    Global(Declaration),
}

/// A whole parsed program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level items in source order.
    pub items: Vec<Item>,
}
