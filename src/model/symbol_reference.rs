//! The result of every lookup.

/// Outcome of resolving a name.
///
/// "Not found" and "several equally good answers" are ordinary values,
/// not errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolReference<T> {
    /// Resolved to exactly one declaration.
    Solved(T),
    /// Several candidates fit equally well.
    Ambiguous(Vec<T>),
    /// Nothing matched.
    Unsolved,
}

impl<T> SymbolReference<T> {
    pub fn solved(value: T) -> Self {
        Self::Solved(value)
    }

    pub fn unsolved() -> Self {
        Self::Unsolved
    }

    /// Zero candidates are unsolved, one is solved, more are ambiguous.
    pub fn from_candidates(mut candidates: Vec<T>) -> Self {
        match candidates.len() {
            0 => Self::Unsolved,
            1 => match candidates.pop() {
                Some(only) => Self::Solved(only),
                None => Self::Unsolved,
            },
            _ => Self::Ambiguous(candidates),
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }

    pub fn is_unsolved(&self) -> bool {
        matches!(self, Self::Unsolved)
    }

    /// The declaration, if resolution was unambiguous.
    pub fn corresponding_declaration(&self) -> Option<&T> {
        match self {
            Self::Solved(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_solved(self) -> Option<T> {
        match self {
            Self::Solved(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> SymbolReference<U> {
        match self {
            Self::Solved(value) => SymbolReference::Solved(f(value)),
            Self::Ambiguous(values) => SymbolReference::Ambiguous(values.into_iter().map(f).collect()),
            Self::Unsolved => SymbolReference::Unsolved,
        }
    }

    /// Keep `self` unless it is unsolved.
    pub fn or_else(self, f: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Unsolved => f(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_candidates() {
        assert_eq!(SymbolReference::<u32>::from_candidates(vec![]), SymbolReference::Unsolved);
        assert_eq!(SymbolReference::from_candidates(vec![1]), SymbolReference::Solved(1));
        assert_eq!(
            SymbolReference::from_candidates(vec![1, 2]),
            SymbolReference::Ambiguous(vec![1, 2])
        );
    }

    #[test]
    fn test_map_and_accessors() {
        let solved = SymbolReference::solved(2).map(|v| v * 10);
        assert!(solved.is_solved());
        assert_eq!(solved.corresponding_declaration(), Some(&20));

        let ambiguous = SymbolReference::Ambiguous(vec![1, 2]).map(|v| v + 1);
        assert!(ambiguous.is_ambiguous());
        assert_eq!(ambiguous.corresponding_declaration(), None);

        let unsolved = SymbolReference::<u32>::unsolved().or_else(|| SymbolReference::solved(7));
        assert_eq!(unsolved.into_solved(), Some(7));
    }
}
