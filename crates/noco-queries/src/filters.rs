//! Operator translation
//!
//! Host-level comparison tokens map onto the canonical dialect operators.
//! The table is total: anything unrecognized compiles as `eq`.

use std::fmt;

/// Host-level operator tokens accepted by the builder
pub mod tokens {
    pub const EQ: &str = "=";
    pub const NEQ: &str = "!=";
    pub const NEQ_ALT: &str = "<>";
    pub const GT: &str = ">";
    pub const GE: &str = ">=";
    pub const LT: &str = "<";
    pub const LE: &str = "<=";
    pub const LIKE: &str = "like";
    pub const NOT_LIKE: &str = "not like";
}

/// Canonical dialect operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatorKind {
    #[default]
    Eq,
    Neq,
    Gt,
    Ge,
    Lt,
    Le,
    Like,
    Nlike,
}

impl OperatorKind {
    /// Translate a host token. Matching is case-insensitive; unknown
    /// tokens fall back to `Eq`.
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            tokens::EQ => Self::Eq,
            tokens::NEQ | tokens::NEQ_ALT => Self::Neq,
            tokens::GT => Self::Gt,
            tokens::GE => Self::Ge,
            tokens::LT => Self::Lt,
            tokens::LE => Self::Le,
            tokens::LIKE => Self::Like,
            tokens::NOT_LIKE => Self::Nlike,
            _ => Self::Eq,
        }
    }

    /// Dialect token
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Like => "like",
            Self::Nlike => "nlike",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drop any table qualifier: `leads.Id` becomes `Id`.
///
/// Splits on the last `.`, not the first, so `crm.leads.status` becomes
/// `status` rather than `leads.status`. A compiled column never contains
/// a `.`. With a single qualifier both splits agree.
pub fn strip_table_prefix(column: &str) -> &str {
    match column.rsplit_once('.') {
        Some((_, bare)) => bare,
        None => column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_table() {
        let cases = [
            ("=", "eq"),
            ("!=", "neq"),
            ("<>", "neq"),
            (">", "gt"),
            (">=", "ge"),
            ("<", "lt"),
            ("<=", "le"),
            ("like", "like"),
            ("not like", "nlike"),
        ];
        for (token, expected) in cases {
            assert_eq!(
                OperatorKind::from_token(token).as_str(),
                expected,
                "{}",
                token
            );
        }
    }

    #[test]
    fn test_operator_matching_ignores_case() {
        assert_eq!(OperatorKind::from_token("LIKE"), OperatorKind::Like);
        assert_eq!(OperatorKind::from_token("Not Like"), OperatorKind::Nlike);
    }

    #[test]
    fn test_unknown_operators_fall_back_to_eq() {
        assert_eq!(OperatorKind::from_token("~="), OperatorKind::Eq);
        assert_eq!(OperatorKind::from_token(""), OperatorKind::Eq);
        assert_eq!(OperatorKind::from_token("between"), OperatorKind::Eq);
        assert_eq!(OperatorKind::from_token("ilike"), OperatorKind::Eq);
    }

    #[test]
    fn test_strip_table_prefix() {
        assert_eq!(strip_table_prefix("leads.Id"), "Id");
        assert_eq!(strip_table_prefix("Id"), "Id");
        assert_eq!(strip_table_prefix("crm.leads.status"), "status");
    }
}
