pub mod peer_notifier;
pub mod peers;
