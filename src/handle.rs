// File: src/handle.rs
use crate::core::classifier::ClassifierModel;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shares one immutable model between readers and lets a rebuilt model be
/// swapped in atomically. Readers keep whatever snapshot they took; nobody
/// ever sees a half-updated table.
#[derive(Debug)]
pub struct ModelHandle {
    current: RwLock<Arc<ClassifierModel>>,
}

impl ModelHandle {
    pub fn new(model: ClassifierModel) -> Self {
        Self { current: RwLock::new(Arc::new(model)) }
    }

    /// The model as of now. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<ClassifierModel> {
        Arc::clone(&*self.current.read())
    }

    /// Replaces the model, returning the previous one.
    pub fn swap(&self, model: ClassifierModel) -> Arc<ClassifierModel> {
        std::mem::replace(&mut *self.current.write(), Arc::new(model))
    }
}
