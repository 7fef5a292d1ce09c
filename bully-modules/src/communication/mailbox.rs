use crossbeam_channel::{Receiver, Sender};

use bully::{new_err, BullyError};

/// Named unbounded inbound queue of one node.
#[derive(Clone, Debug)]
pub struct Mailbox<T> {
    name: String,
    tx: Sender<T>,
    rx: Receiver<T>,
}

impl<T> Mailbox<T> {
    /// Creates new Mailbox with the name used in error messages.
    pub fn new(name: String) -> Mailbox<T> {
        let (tx, rx): (Sender<T>, Receiver<T>) = crossbeam_channel::unbounded();

        Mailbox { name, tx, rx }
    }

    /// Returns the receiver end of the mailbox.
    pub fn rx(&self) -> Receiver<T> {
        self.rx.clone()
    }

    /// Queues the item. Items from one sender keep their order.
    pub fn deliver(&self, item: T) -> Result<(), BullyError> {
        if let Err(err) = self.tx.send(item) {
            return new_err(
                format!("Cannot deliver message. Mailbox : {}", self.name),
                err.to_string(),
            );
        }

        Ok(())
    }
}
