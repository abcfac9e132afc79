use parking_lot::Mutex;
use std::sync::Arc;

use crate::document::Document;
use crate::error::Result;
use crate::value::AttrValue;

/// A document that several threads can build into.
///
/// Each call resolves its path and commits under a single lock acquisition,
/// so the attach walk never interleaves with another commit.
#[derive(Debug, Clone)]
pub struct SharedDocument {
    inner: Arc<Mutex<Document>>,
}

impl SharedDocument {
    pub fn new(document: Document) -> Self {
        Self {
            inner: Arc::new(Mutex::new(document)),
        }
    }

    /// Resolve a dotted path and commit it with `attributes`
    pub fn commit<I, K, V>(&self, path: &str, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        let mut document = self.inner.lock();
        let cursor = document.path(path);
        document.commit(&cursor, attributes)
    }

    /// Merge an independently built document under `path`
    pub fn graft(&self, path: &str, subtree: &Document) -> Result<()> {
        let mut document = self.inner.lock();
        let cursor = document.path(path);
        document.graft(&cursor, subtree)
    }

    /// Run `f` with exclusive access to the document
    pub fn with<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn to_xml(&self) -> Result<String> {
        self.inner.lock().to_xml()
    }

    /// Take the document back, cloning it if other handles are still alive
    pub fn into_inner(self) -> Document {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner(),
            Err(shared) => shared.lock().clone(),
        }
    }
}

impl From<Document> for SharedDocument {
    fn from(document: Document) -> Self {
        Self::new(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;

    #[test]
    fn test_commit_through_handle() {
        let shared = SharedDocument::new(Document::new("root"));
        let other = shared.clone();
        shared.commit("a.b", attrs! { "n" => 1 }).unwrap();
        other.commit("a.b", attrs! { "n" => 2 }).unwrap();

        let doc = shared.into_inner();
        assert_eq!(doc.root_node().children().len(), 1);
        assert_eq!(doc.node_count(), 4);
    }

    #[test]
    fn test_with_gives_mutable_access() {
        let shared = SharedDocument::from(Document::new("root"));
        let count = shared.with(|doc| {
            let cursor = doc.path("x");
            doc.commit(&cursor, attrs!()).map(|()| doc.node_count())
        });
        assert_eq!(count.unwrap(), 2);
    }
}
