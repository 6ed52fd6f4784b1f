use crate::error::AppResult;

/// In-progress edit of one list entry.
///
/// Updates go to `draft`; the original list entry is only replaced after a
/// successful commit, and cancelling simply drops the session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession<T> {
    id: i64,
    original: T,
    draft: T,
}

impl<T: Clone + PartialEq> EditSession<T> {
    pub fn start(id: i64, entry: T) -> Self {
        Self {
            id,
            original: entry.clone(),
            draft: entry,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn original(&self) -> &T {
        &self.original
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.original != self.draft
    }

    /// Runs `update` on a copy of the draft and keeps the copy only if it succeeds.
    pub fn apply<F>(&mut self, update: F) -> AppResult<()>
    where
        F: FnOnce(&mut T) -> AppResult<()>,
    {
        let mut next = self.draft.clone();
        update(&mut next)?;
        self.draft = next;
        Ok(())
    }
}
