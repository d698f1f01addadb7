use biometrics::{Collector, Counter};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("rasaline.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("rasaline.client.request_errors");

pub(crate) static STREAM_LINES: Counter = Counter::new("rasaline.stream.lines");
pub(crate) static STREAM_ERRORS: Counter = Counter::new("rasaline.stream.errors");

pub(crate) static CHAT_MESSAGES_SENT: Counter = Counter::new("rasaline.chat.messages_sent");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&STREAM_LINES);
    collector.register_counter(&STREAM_ERRORS);

    collector.register_counter(&CHAT_MESSAGES_SENT);
}
