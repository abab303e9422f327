use std::sync::mpsc::{self, Receiver, SyncSender};

#[derive(Debug, Clone, Copy)]
pub struct FeedConfig {
    pub queue_capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FeedError {
    #[error("feed queue is full")]
    Full,
    #[error("feed peer disconnected")]
    Disconnected,
}

/// Producer half; lives on whatever thread decodes incoming data.
#[derive(Debug)]
pub struct FeedSender<T> {
    sender: SyncSender<T>,
}

impl<T> Clone for FeedSender<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Consumer half; owned by the thread that owns the stores.
#[derive(Debug)]
pub struct FeedReceiver<T> {
    receiver: Receiver<T>,
}

pub fn bounded<T>(config: FeedConfig) -> (FeedSender<T>, FeedReceiver<T>) {
    let (sender, receiver) = mpsc::sync_channel(config.queue_capacity.max(1));
    (FeedSender { sender }, FeedReceiver { receiver })
}

impl<T> FeedSender<T> {
    pub fn try_send(&self, value: T) -> Result<(), FeedError> {
        self.sender.try_send(value).map_err(|err| match err {
            mpsc::TrySendError::Full(_) => FeedError::Full,
            mpsc::TrySendError::Disconnected(_) => FeedError::Disconnected,
        })
    }

    /// Blocks while the queue is full.
    pub fn send(&self, value: T) -> Result<(), FeedError> {
        self.sender
            .send(value)
            .map_err(|_| FeedError::Disconnected)
    }
}

impl<T> FeedReceiver<T> {
    pub fn try_recv(&self) -> Result<Option<T>, FeedError> {
        match self.receiver.try_recv() {
            Ok(value) => Ok(Some(value)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(FeedError::Disconnected),
        }
    }

    /// Everything queued right now, in send order. Never blocks.
    pub fn drain(&self) -> impl Iterator<Item = T> + '_ {
        self.receiver.try_iter()
    }
}
