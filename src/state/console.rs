// Console state.
// Activity log shown on the Console tab.

use chrono::{DateTime, Utc};

/// Console message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Warn,
    Error,
}

/// A console message for the activity log.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self::at(ConsoleLevel::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::at(ConsoleLevel::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::at(ConsoleLevel::Error, message)
    }

    fn at(level: ConsoleLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded activity log.
#[derive(Debug, Default)]
pub struct ConsoleLog {
    messages: Vec<ConsoleMessage>,
}

impl ConsoleLog {
    const MAX_MESSAGES: usize = 200;

    pub fn push(&mut self, message: ConsoleMessage) {
        self.messages.push(message);
        if self.messages.len() > Self::MAX_MESSAGES {
            let excess = self.messages.len() - Self::MAX_MESSAGES;
            self.messages.drain(..excess);
        }
    }

    pub fn messages(&self) -> &[ConsoleMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(ConsoleMessage::info("a").level, ConsoleLevel::Info);
        assert_eq!(ConsoleMessage::warn("b").level, ConsoleLevel::Warn);
        assert_eq!(ConsoleMessage::error("c").level, ConsoleLevel::Error);
    }

    #[test]
    fn test_log_is_bounded() {
        let mut log = ConsoleLog::default();
        for i in 0..250 {
            log.push(ConsoleMessage::info(format!("msg {}", i)));
        }

        assert_eq!(log.messages().len(), 200);
        assert_eq!(log.messages()[0].message, "msg 50");
        assert_eq!(log.messages()[199].message, "msg 249");
    }
}
