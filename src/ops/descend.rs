use crate::model::item::Item;

/// Failure to resolve a label path against the tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Nothing visible matched the segment, exactly or fuzzily.
    /// `available` lists the visible sibling labels in order.
    #[error("no match for {segment}")]
    NoMatch {
        segment: String,
        available: Vec<String>,
    },
    /// More than one visible child matched within the same tier.
    #[error("ambiguous match for '{segment}'")]
    AmbiguousPath {
        segment: String,
        candidates: Vec<String>,
    },
}

impl PathError {
    pub fn segment(&self) -> &str {
        match self {
            PathError::NoMatch { segment, .. } | PathError::AmbiguousPath { segment, .. } => {
                segment
            }
        }
    }
}

impl Item {
    /// Walk down the tree one segment at a time. An empty path selects
    /// `self`.
    pub fn descend<S: AsRef<str>>(&self, path: &[S]) -> Result<&Item, PathError> {
        match path.split_first() {
            None => Ok(self),
            Some((segment, rest)) => {
                let idx = self.match_child(segment.as_ref())?;
                self.children[idx].descend(rest)
            }
        }
    }

    /// Mutable counterpart of [`Item::descend`]; resolves identically.
    pub fn descend_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Result<&mut Item, PathError> {
        match path.split_first() {
            None => Ok(self),
            Some((segment, rest)) => {
                let idx = self.match_child(segment.as_ref())?;
                self.children[idx].descend_mut(rest)
            }
        }
    }

    /// Index of the single visible child matching `segment`. Exact matches
    /// shadow fuzzy ones entirely; ties within a tier are an error.
    fn match_child(&self, segment: &str) -> Result<usize, PathError> {
        let visible = || self.children.iter().enumerate().filter(|(_, c)| !c.hidden);

        let mut candidates: Vec<usize> = visible()
            .filter(|(_, c)| c.has_label(segment))
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            candidates = visible()
                .filter(|(_, c)| c.has_label_like(segment))
                .map(|(i, _)| i)
                .collect();
        }

        match candidates.as_slice() {
            [] => Err(PathError::NoMatch {
                segment: segment.to_string(),
                available: visible().map(|(_, c)| c.label.clone()).collect(),
            }),
            [idx] => Ok(*idx),
            many => Err(PathError::AmbiguousPath {
                segment: segment.to_string(),
                candidates: many
                    .iter()
                    .map(|&i| self.children[i].label.clone())
                    .collect(),
            }),
        }
    }
}
