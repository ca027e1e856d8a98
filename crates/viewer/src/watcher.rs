use crate::message::Message;
use cosmic::iced::{Subscription, time};
use std::time::Duration;

/// Fires [`Message::Tick`] every `interval` for the session's file poll.
pub fn poll_ticks(interval: Duration) -> Subscription<Message> {
    time::every(interval).map(|_| Message::Tick)
}
