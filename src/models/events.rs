use serde::Serialize;
use std::sync::mpsc::Sender;
use log::info;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub enum UndoEvent {
    AvailabilityChanged(bool),
    Message(String),
}

/// Receives undo-availability changes and user-facing status text.
pub trait UndoObserver {
    fn on_undo_availability_changed(&self, available: bool);
    fn on_message(&self, message: &str);
}

pub struct NullObserver;

impl UndoObserver for NullObserver {
    fn on_undo_availability_changed(&self, _available: bool) {}
    fn on_message(&self, _message: &str) {}
}

pub struct LogObserver;

impl UndoObserver for LogObserver {
    fn on_undo_availability_changed(&self, available: bool) {
        info!("Undo available: {}", available);
    }

    fn on_message(&self, message: &str) {
        info!("{}", message);
    }
}

/// Single-consumer event channel. A dropped receiver is ignored.
pub struct ChannelObserver(pub Sender<UndoEvent>);

impl UndoObserver for ChannelObserver {
    fn on_undo_availability_changed(&self, available: bool) {
        let _ = self.0.send(UndoEvent::AvailabilityChanged(available));
    }

    fn on_message(&self, message: &str) {
        let _ = self.0.send(UndoEvent::Message(message.to_string()));
    }
}

pub struct FnObserver<F: Fn(&UndoEvent)>(pub F);

impl<F: Fn(&UndoEvent)> UndoObserver for FnObserver<F> {
    fn on_undo_availability_changed(&self, available: bool) {
        (self.0)(&UndoEvent::AvailabilityChanged(available));
    }

    fn on_message(&self, message: &str) {
        (self.0)(&UndoEvent::Message(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::mpsc::channel;

    #[test]
    fn test_channel_observer_forwards_events() {
        let (tx, rx) = channel();
        let observer = ChannelObserver(tx);
        observer.on_undo_availability_changed(true);
        observer.on_message("hello");
        let events: Vec<UndoEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![UndoEvent::AvailabilityChanged(true), UndoEvent::Message("hello".to_string())]
        );
    }

    #[test]
    fn test_channel_observer_survives_dropped_receiver() {
        let (tx, rx) = channel();
        drop(rx);
        ChannelObserver(tx).on_message("nobody listening");
    }

    #[test]
    fn test_fn_observer() {
        let seen = RefCell::new(Vec::new());
        let observer = FnObserver(|e: &UndoEvent| seen.borrow_mut().push(e.clone()));
        observer.on_undo_availability_changed(false);
        assert_eq!(seen.borrow().as_slice(), &[UndoEvent::AvailabilityChanged(false)]);
    }
}
