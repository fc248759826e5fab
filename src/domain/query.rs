use std::fmt;

/// Lookup strategy for the `find_*` operations
///
/// `ById` resolves through a direct get, `ByName` and `ByLogin` filter the
/// full listing client-side. Not every entity kind supports every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdmQuery {
    ById,
    ByName,
    ByLogin,
}

impl fmt::Display for IdmQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdmQuery::ById => write!(f, "by id"),
            IdmQuery::ByName => write!(f, "by name"),
            IdmQuery::ByLogin => write!(f, "by login"),
        }
    }
}
