//! Predicate Tree
//!
//! Filter conditions as a tree of leaf comparisons and nested groups.
//! Every node records how it joins its left sibling; the first node of a
//! sibling sequence has its connector ignored.
//!
//! Operators are stored exactly as given. Translation to the remote
//! dialect happens in the compiler.

use noco_core::types::Scalar;

/// Boolean connector joining a node to its preceding sibling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connector {
    #[default]
    And,
    Or,
}

impl Connector {
    /// Lower-case dialect token
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// A leaf comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Column name, possibly table-qualified (`leads.Id`)
    pub column: String,
    /// Operator token as supplied by the caller (`=`, `>=`, `not like`, ...)
    pub operator: String,
    pub value: Scalar,
    pub connector: Connector,
}

impl Comparison {
    pub fn new(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
            connector: Connector::And,
        }
    }
}

/// A nested sub-tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub children: Vec<Predicate>,
    pub connector: Connector,
}

impl Group {
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A node in the predicate tree
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Comparison(Comparison),
    Group(Group),
}

impl Predicate {
    /// Leaf comparison joined with AND
    pub fn comparison(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Self {
        Self::Comparison(Comparison::new(column, operator, value))
    }

    /// Equality leaf joined with AND
    pub fn equals(column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::comparison(column, "=", value)
    }

    /// Group of children joined with AND
    pub fn group(children: Vec<Predicate>) -> Self {
        Self::Group(Group {
            children,
            connector: Connector::And,
        })
    }

    pub fn connector(&self) -> Connector {
        match self {
            Self::Comparison(c) => c.connector,
            Self::Group(g) => g.connector,
        }
    }

    /// Replace the connector to the left sibling
    pub fn with_connector(mut self, connector: Connector) -> Self {
        match &mut self {
            Self::Comparison(c) => c.connector = connector,
            Self::Group(g) => g.connector = connector,
        }
        self
    }

    pub fn or(self) -> Self {
        self.with_connector(Connector::Or)
    }

    /// True when the subtree holds no comparison at all
    pub fn is_empty(&self) -> bool {
        self.leaf_count() == 0
    }

    /// Number of comparison leaves in the subtree
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Comparison(_) => 1,
            Self::Group(g) => g.children.iter().map(Predicate::leaf_count).sum(),
        }
    }
}

impl From<Comparison> for Predicate {
    fn from(c: Comparison) -> Self {
        Self::Comparison(c)
    }
}

impl From<Group> for Predicate {
    fn from(g: Group) -> Self {
        Self::Group(g)
    }
}
