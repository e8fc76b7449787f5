//! Message formatting utilities for client display.

use idobata_shared::time::timestamp_to_rfc3339;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a system notice (welcome, join, leave)
    ///
    /// # Arguments
    ///
    /// * `message` - The notice text from the server
    /// * `time_stamp` - Unix timestamp when the notice was stamped (milliseconds)
    ///
    /// # Returns
    ///
    /// A formatted string with the system notice
    pub fn format_system_message(message: &str, time_stamp: i64) -> String {
        let timestamp_str = timestamp_to_rfc3339(time_stamp);
        format!("\n* {} ({})\n", message, timestamp_str)
    }

    /// Format a chat message from another session
    ///
    /// # Arguments
    ///
    /// * `sender` - The display name of the sender
    /// * `message` - The message content
    /// * `time_stamp` - Unix timestamp when the relay stamped the message (milliseconds)
    ///
    /// # Returns
    ///
    /// A formatted string with the chat message
    pub fn format_chat_message(sender: &str, message: &str, time_stamp: i64) -> String {
        let timestamp_str = timestamp_to_rfc3339(time_stamp);
        format!(
            "\n\n------------------------------------------------------------\n\
             @{}: {}\n\
             sent at {}\n\
             ------------------------------------------------------------\n",
            sender, message, timestamp_str
        )
    }

    /// Format a binary message notification
    ///
    /// # Arguments
    ///
    /// * `byte_count` - The number of bytes received
    ///
    /// # Returns
    ///
    /// A formatted string with the binary data notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    ///
    /// # Arguments
    ///
    /// * `text` - The raw text received
    ///
    /// # Returns
    ///
    /// A formatted string with the raw message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
