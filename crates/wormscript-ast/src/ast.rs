//! Abstract Syntax Tree types for worm control scripts
//!
//! The parser builds these once per script; the interpreter only reads them.
//! Expressions are statically tagged with the kind of value they produce and
//! every statement carries the source location used as a resumption checkpoint.

use std::fmt;

/// Position of a statement in the script source (1-based).
///
/// Ordering is document order: line first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The variant of a runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Double,
    Entity,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Double => "double",
            Kind::Entity => "entity",
        };
        f.write_str(name)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Equal,
    NotEqual,
    And,
    Or,
}

impl BinOp {
    /// Kind of the value this operator produces.
    pub fn result_kind(self) -> Kind {
        match self {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => Kind::Double,
            _ => Kind::Bool,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Less => "<",
            BinOp::LessEq => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEq => ">=",
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not,
    Neg,
    Sqrt,
    Sin,
    Cos,
}

impl UnOp {
    pub fn result_kind(self) -> Kind {
        match self {
            UnOp::Not => Kind::Bool,
            UnOp::Neg | UnOp::Sqrt | UnOp::Sin | UnOp::Cos => Kind::Double,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UnOp::Not => "!",
            UnOp::Neg => "-",
            UnOp::Sqrt => "sqrt",
            UnOp::Sin => "sin",
            UnOp::Cos => "cos",
        }
    }
}

/// Numeric properties that can be read from a world entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    X,
    Y,
    Radius,
    Direction,
    HitPoints,
    MaxHitPoints,
    ActionPoints,
    MaxActionPoints,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Property::X => "x",
            Property::Y => "y",
            Property::Radius => "radius",
            Property::Direction => "direction",
            Property::HitPoints => "hit points",
            Property::MaxHitPoints => "max hit points",
            Property::ActionPoints => "action points",
            Property::MaxActionPoints => "max action points",
        };
        f.write_str(name)
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Bool(bool),
    Double(f64),
    /// The absent entity
    Null,
    /// The worm running the script
    SelfWorm,
    /// Read of a global, annotated with its declared kind
    Variable { name: String, kind: Kind },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    /// Property read on an entity
    Query {
        property: Property,
        entity: Box<Expr>,
    },
    IsWorm(Box<Expr>),
    IsFood(Box<Expr>),
    /// Whether the entity is a worm on the script owner's team
    SameTeam(Box<Expr>),
}

impl Expr {
    /// The kind of value this expression evaluates to.
    pub fn kind(&self) -> Kind {
        match self {
            Expr::Bool(_) => Kind::Bool,
            Expr::Double(_) => Kind::Double,
            Expr::Null | Expr::SelfWorm => Kind::Entity,
            Expr::Variable { kind, .. } => *kind,
            Expr::Binary { op, .. } => op.result_kind(),
            Expr::Unary { op, .. } => op.result_kind(),
            Expr::Query { .. } => Kind::Double,
            Expr::IsWorm(_) | Expr::IsFood(_) | Expr::SameTeam(_) => Kind::Bool,
        }
    }

    pub fn variable(name: impl Into<String>, kind: Kind) -> Self {
        Expr::Variable {
            name: name.into(),
            kind,
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn query(property: Property, entity: Expr) -> Self {
        Expr::Query {
            property,
            entity: Box::new(entity),
        }
    }
}

/// A statement with the location it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub location: SourceLocation,
    pub node: Stmt,
}

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Statements executed in order
    Sequence(Vec<Statement>),
    If {
        condition: Expr,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    While {
        condition: Expr,
        body: Box<Statement>,
    },
    /// Counted loop, the count is rounded to an integer
    Repeat {
        count: Expr,
        body: Box<Statement>,
    },
    /// Assignment to a declared global
    Assign { name: String, value: Expr },
    Print(Expr),
    Skip,
    Move,
    /// Turn by an angle in radians
    Turn(Expr),
    Jump,
    /// Fire the active weapon with a yield percentage
    Fire(Expr),
    ToggleWeapon,
}

impl Statement {
    pub fn new(location: SourceLocation, node: Stmt) -> Self {
        Self { location, node }
    }

    pub fn at(line: u32, column: u32, node: Stmt) -> Self {
        Self::new(SourceLocation::new(line, column), node)
    }

    /// Whether this statement has no child statements.
    ///
    /// Leaves are the points at which an activation can stop and later resume.
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self.node,
            Stmt::Sequence(_) | Stmt::If { .. } | Stmt::While { .. } | Stmt::Repeat { .. }
        )
    }

    /// Direct child statements, in document order.
    pub fn children(&self) -> Vec<&Statement> {
        match &self.node {
            Stmt::Sequence(stmts) => stmts.iter().collect(),
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                let mut children = vec![then_branch.as_ref()];
                if let Some(else_branch) = else_branch {
                    children.push(else_branch.as_ref());
                }
                children
            }
            Stmt::While { body, .. } | Stmt::Repeat { body, .. } => vec![body.as_ref()],
            _ => Vec::new(),
        }
    }

    /// Whether the leaf at `location` is this statement or lies inside it.
    pub fn contains_checkpoint(&self, location: SourceLocation) -> bool {
        if self.is_leaf() {
            return self.location == location;
        }
        self.children()
            .into_iter()
            .any(|child| child.contains_checkpoint(location))
    }
}
