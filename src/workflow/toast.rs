use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crate::workflow::store::Store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Short-lived messages shown to the user, oldest first.
#[derive(Clone, Default)]
pub struct ToastQueue {
    toasts: Store<Vec<Toast>>,
    next_id: Arc<AtomicU64>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            kind,
            message: message.into(),
        };

        self.toasts.update(|toasts| toasts.push(toast));

        id
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.get()
    }

    pub fn store(&self) -> &Store<Vec<Toast>> {
        &self.toasts
    }
}

#[cfg(test)]
mod tests {
    use super::{ToastKind, ToastQueue};

    #[test]
    fn push_and_dismiss() {
        let queue = ToastQueue::new();

        let first = queue.push(ToastKind::Info, "one");
        queue.push(ToastKind::Error, "two");
        queue.dismiss(first);

        let toasts = queue.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "two");
        assert_eq!(toasts[0].kind, ToastKind::Error);
    }
}
