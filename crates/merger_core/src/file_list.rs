use crate::MergerError;

/// Fewest files the merge action accepts.
pub const MIN_MERGE_FILES: usize = 2;

/// Ordered identifiers of files already stored by the merge service.
///
/// Display order is merge order. Duplicates are allowed; the service decides
/// what identifiers it hands out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileList {
    ids: Vec<String>,
}

impl FileList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, id: impl Into<String>) {
        self.ids.push(id.into());
    }

    /// Appends every identifier in iteration order.
    pub fn extend<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.ids.extend(ids);
    }

    pub fn remove_at(&mut self, index: usize) -> Result<String, MergerError> {
        self.check_index(index)?;
        Ok(self.ids.remove(index))
    }

    /// Exchanges two entries. Every other entry keeps its position.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), MergerError> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i != j {
            self.ids.swap(i, j);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    pub fn can_merge(&self) -> bool {
        self.ids.len() >= MIN_MERGE_FILES
    }

    fn check_index(&self, index: usize) -> Result<(), MergerError> {
        if index < self.ids.len() {
            Ok(())
        } else {
            Err(MergerError::IndexOutOfRange {
                index,
                len: self.ids.len(),
            })
        }
    }
}
