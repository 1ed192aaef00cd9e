use super::owner::OwnerRef;

/// What the current public request is rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueriedView {
    SingleItem(i64),
    TermArchive(i64),
    Other,
}

impl QueriedView {
    /// The owner whose metadata drives the head links, if any.
    pub fn owner(&self) -> Option<OwnerRef> {
        match *self {
            QueriedView::SingleItem(id) => Some(OwnerRef::item(id)),
            QueriedView::TermArchive(id) => Some(OwnerRef::term(id)),
            QueriedView::Other => None,
        }
    }
}
