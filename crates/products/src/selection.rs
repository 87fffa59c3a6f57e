use crate::product::ProductId;

/// Products marked for a bulk action, in the order they were picked.
///
/// The set is not pruned when a different page is loaded, so ids from an
/// earlier page stay selected until toggled off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<ProductId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `id` if selected, otherwise add it. Returns whether `id` is
    /// selected afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        match self.ids.iter().position(|selected| *selected == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        }
    }

    pub fn to_vec(&self) -> Vec<ProductId> {
        self.ids.clone()
    }
}
