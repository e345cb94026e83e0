use crossterm::event::Event;

#[derive(Debug)]
pub(crate) enum DomainEvent {
    Input(Event),
    InputError(String),
    FrameTick,
}
