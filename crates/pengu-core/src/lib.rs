pub mod events;
pub mod player;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::cell::RefCell;

    use crate::events::NotificationSink;

    /// Sink that keeps every notification it receives, in order.
    #[derive(Debug)]
    pub struct RecordingSink<N> {
        received: RefCell<Vec<N>>,
    }

    impl<N> Default for RecordingSink<N> {
        fn default() -> Self {
            Self {
                received: RefCell::new(Vec::new()),
            }
        }
    }

    impl<N: Clone> RecordingSink<N> {
        /// Copy of everything published so far.
        pub fn received(&self) -> Vec<N> {
            self.received.borrow().clone()
        }

        pub fn len(&self) -> usize {
            self.received.borrow().len()
        }

        pub fn is_empty(&self) -> bool {
            self.received.borrow().is_empty()
        }

        pub fn clear(&self) {
            self.received.borrow_mut().clear();
        }
    }

    impl<N> NotificationSink<N> for RecordingSink<N> {
        fn publish(&self, notification: N) {
            self.received.borrow_mut().push(notification);
        }
    }
}
