//! Transcript sanitization before replay to a provider.

use crate::types::Message;

/// Copy `messages` without the fields a provider must never see replayed:
/// past reasoning traces and provider metadata.
pub fn strip_volatile_fields(messages: &[Message]) -> Vec<Message> {
    messages.iter().map(strip_message).collect()
}

fn strip_message(message: &Message) -> Message {
    let mut next = message.clone();
    next.reasoning_content = None;
    next.provider_specific_fields = None;
    next
}
