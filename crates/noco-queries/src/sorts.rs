//! Sort Specs
//!
//! An ordered list of sort keys. Order is significant and is preserved
//! verbatim in the compiled `sort` parameter.

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order (A-Z, 1-9, oldest first)
    #[default]
    Asc,
    /// Descending order (Z-A, 9-1, newest first)
    Desc,
}

impl SortDirection {
    /// Column prefix in the `sort` parameter
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Asc => "",
            Self::Desc => "-",
        }
    }
}

/// A single sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortCriterion {
    pub column: String,
    pub direction: SortDirection,
}

impl SortCriterion {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Asc)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Desc)
    }

    /// `-column` for descending, `column` for ascending
    pub fn to_param(&self) -> String {
        format!("{}{}", self.direction.prefix(), self.column)
    }
}

/// Ordered collection of sort keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortOrder {
    criteria: Vec<SortCriterion>,
}

impl SortOrder {
    pub fn new() -> Self {
        Self { criteria: vec![] }
    }

    /// Create with a single criterion
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            criteria: vec![SortCriterion::new(column, direction)],
        }
    }

    pub fn by_asc(column: impl Into<String>) -> Self {
        Self::by(column, SortDirection::Asc)
    }

    pub fn by_desc(column: impl Into<String>) -> Self {
        Self::by(column, SortDirection::Desc)
    }

    /// Add a sort criterion
    pub fn add(&mut self, criterion: SortCriterion) -> &mut Self {
        self.criteria.push(criterion);
        self
    }

    /// Add a sort criterion (builder pattern)
    pub fn then(mut self, criterion: SortCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn then_asc(self, column: impl Into<String>) -> Self {
        self.then(SortCriterion::asc(column))
    }

    pub fn then_desc(self, column: impl Into<String>) -> Self {
        self.then(SortCriterion::desc(column))
    }

    pub fn criteria(&self) -> &[SortCriterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Comma-joined `sort` parameter, `None` when there are no keys
    pub fn to_param(&self) -> Option<String> {
        if self.criteria.is_empty() {
            return None;
        }

        Some(
            self.criteria
                .iter()
                .map(SortCriterion::to_param)
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}
