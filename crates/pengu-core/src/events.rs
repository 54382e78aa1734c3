use std::fmt::Debug;
use std::rc::Rc;

/// Receiver for gameplay notifications (HUD, audio, scene glue).
///
/// Sinks are shared between the player, the obstacles, and the collision
/// detector of one level, so `publish` takes `&self`; implementations that
/// buffer use interior mutability.
pub trait NotificationSink<N> {
    fn publish(&self, notification: N);
}

/// Shared handle to a notification sink, injected at construction.
pub type SharedSink<N> = Rc<dyn NotificationSink<N>>;

/// Sink that drops every notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSink;

impl<N> NotificationSink<N> for NullSink {
    fn publish(&self, _notification: N) {}
}

impl NullSink {
    /// A shared handle to a `NullSink`, for owners that need a sink but have
    /// no listeners.
    pub fn shared<N: 'static>() -> SharedSink<N> {
        Rc::new(NullSink)
    }
}

/// Publish `notification` to `sink`, tracing it first.
pub fn notify<N: Debug>(sink: &dyn NotificationSink<N>, notification: N) {
    tracing::trace!(?notification, "publishing notification");
    sink.publish(notification);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::RecordingSink;

    #[test]
    fn null_sink_accepts_anything() {
        let sink = NullSink::shared::<u32>();
        sink.publish(1);
        sink.publish(2);
    }

    #[test]
    fn notify_reaches_recording_sink() {
        let recorder = Rc::new(RecordingSink::<&'static str>::default());
        let shared: SharedSink<&'static str> = Rc::clone(&recorder) as SharedSink<_>;

        notify(shared.as_ref(), "first");
        notify(shared.as_ref(), "second");

        assert_eq!(recorder.received(), vec!["first", "second"]);
        assert_eq!(recorder.len(), 2);

        recorder.clear();
        assert!(recorder.is_empty());
        notify(shared.as_ref(), "third");
        assert_eq!(recorder.received(), vec!["third"]);
    }
}
