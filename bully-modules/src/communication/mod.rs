pub mod inproc;
pub mod mailbox;
