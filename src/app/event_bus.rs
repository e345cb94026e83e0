use std::time::Duration;

use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::event::DomainEvent;

/// Background producers feeding the page loop: terminal input and the
/// animation-frame clock.
pub(crate) struct EventBusRuntime {
    tasks: Vec<JoinHandle<()>>,
}

impl EventBusRuntime {
    pub(crate) fn spawn(frame_interval: Duration) -> (UnboundedReceiver<DomainEvent>, Self) {
        let (tx, rx) = unbounded_channel();
        let tasks = vec![
            spawn_input_task(tx.clone()),
            spawn_frame_task(tx, frame_interval),
        ];
        (rx, Self { tasks })
    }

    pub(crate) fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for EventBusRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_input_task(tx: UnboundedSender<DomainEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut input_stream = EventStream::new();
        while let Some(event) = input_stream.next().await {
            let loop_event = match event {
                Ok(event) => DomainEvent::Input(event),
                Err(err) => DomainEvent::InputError(err.to_string()),
            };
            if tx.send(loop_event).is_err() {
                return;
            }
        }
    })
}

fn spawn_frame_task(tx: UnboundedSender<DomainEvent>, frame_interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut frame_tick = time::interval(frame_interval);
        frame_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            frame_tick.tick().await;
            if tx.send(DomainEvent::FrameTick).is_err() {
                return;
            }
        }
    })
}
