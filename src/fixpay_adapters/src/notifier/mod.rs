pub mod channel_notifier;

pub use channel_notifier::{
    notification_channel, CapturingNotifier, ChannelNotifier, NotificationWorker,
};
