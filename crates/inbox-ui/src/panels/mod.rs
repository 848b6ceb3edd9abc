pub mod chat;
pub mod conversations;
pub mod no_assistant;
pub mod notices;
pub mod status;
