//! User-facing notices.
//!
//! The store reports failures as [`CartError`] values; callers that want the
//! classic toast behaviour route them through a [`NoticeSink`] with [`report`].

use std::fmt;

use crate::error::{CartError, CartOp};

/// The message classes a storefront shows after a rejected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    InsufficientStock,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl Notice {
    /// The generic failure notice for `op`.
    pub fn failure(op: CartOp) -> Self {
        match op {
            CartOp::Add => Notice::AddFailed,
            CartOp::Remove => Notice::RemoveFailed,
            CartOp::Update => Notice::UpdateFailed,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::InsufficientStock => "Requested quantity is out of stock",
            Notice::AddFailed => "Error adding product",
            Notice::RemoveFailed => "Error removing product",
            Notice::UpdateFailed => "Error changing product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Fire-and-forget destination for notices.
pub trait NoticeSink {
    fn notify(&self, notice: Notice);
}

impl<F: Fn(Notice)> NoticeSink for F {
    fn notify(&self, notice: Notice) {
        self(notice)
    }
}

/// Unwrap `result`, sending the notice for an error to `sink`.
pub fn report<T>(result: Result<T, CartError>, sink: &dyn NoticeSink) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, "cart operation rejected");
            sink.notify(e.notice());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use std::cell::RefCell;

    #[test]
    fn test_report_forwards_errors_only() {
        let seen = RefCell::new(Vec::new());
        let sink = |notice: Notice| seen.borrow_mut().push(notice);

        assert_eq!(report(Ok::<_, CartError>(true), &sink), Some(true));
        assert_eq!(
            report::<bool>(
                Err(CartError::NotInCart {
                    op: CartOp::Update,
                    product_id: ProductId::new(4),
                }),
                &sink,
            ),
            None
        );

        assert_eq!(*seen.borrow(), vec![Notice::UpdateFailed]);
    }

    #[test]
    fn test_messages_are_distinct() {
        let all = [
            Notice::InsufficientStock,
            Notice::AddFailed,
            Notice::RemoveFailed,
            Notice::UpdateFailed,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.message(), b.message());
            }
        }
    }
}
