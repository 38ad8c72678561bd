//! Filter language operators and their SQL symbols

use std::fmt;

/// Operator keyword accepted by the log filter language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Lt,
    Gt,
    Lte,
    Gte,
    In,
    Nin,
    Contains,
    NContains,
}

impl Operator {
    pub const ALL: [Self; 8] = [
        Self::Lt,
        Self::Gt,
        Self::Lte,
        Self::Gte,
        Self::In,
        Self::Nin,
        Self::Contains,
        Self::NContains,
    ];

    /// Look up an operator keyword, ignoring ASCII case
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.keyword().eq_ignore_ascii_case(keyword))
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Lte => "lte",
            Self::Gte => "gte",
            Self::In => "in",
            Self::Nin => "nin",
            Self::Contains => "contains",
            Self::NContains => "ncontains",
        }
    }

    /// SQL symbol emitted in place of the keyword
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::In => "IN",
            Self::Nin => "NOT IN",
            Self::Contains => "ILIKE",
            Self::NContains => "NOT ILIKE",
        }
    }

    /// Text-search operators build a pattern instead of substituting in place
    pub fn is_text_search(self) -> bool {
        matches!(self, Self::Contains | Self::NContains)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
