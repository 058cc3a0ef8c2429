pub mod message_list;
pub mod status_bar;

pub use message_list::MessageListWidget;
pub use status_bar::StatusBar;
