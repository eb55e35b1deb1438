//! Completion handle for asynchronous image loads

use super::{AssetError, AssetResult, ImageData};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Sending half handed to whatever performs the load
pub type ImageSender = Sender<AssetResult<ImageData>>;

/// An image load that may not have finished yet
///
/// The frame loop calls [`PendingImage::poll`] once per frame. It returns
/// `None` while the load is in flight and hands out the result exactly once.
#[derive(Debug)]
pub struct PendingImage {
    label: String,
    receiver: Option<Receiver<AssetResult<ImageData>>>,
}

impl PendingImage {
    /// Create a pending load and the sender that completes it
    pub fn channel(label: impl Into<String>) -> (ImageSender, Self) {
        let (sender, receiver) = mpsc::channel();
        (
            sender,
            Self {
                label: label.into(),
                receiver: Some(receiver),
            },
        )
    }

    /// A load that has already succeeded
    pub fn ready(label: impl Into<String>, image: ImageData) -> Self {
        Self::completed(label, Ok(image))
    }

    /// A load that has already failed
    pub fn failed(label: impl Into<String>, error: AssetError) -> Self {
        Self::completed(label, Err(error))
    }

    fn completed(label: impl Into<String>, result: AssetResult<ImageData>) -> Self {
        let (sender, pending) = Self::channel(label);
        // The receiver is alive in `pending`, so this send cannot fail.
        let _ = sender.send(result);
        pending
    }

    /// Name of the asset being loaded
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the result has already been handed out
    pub fn is_finished(&self) -> bool {
        self.receiver.is_none()
    }

    /// Check for completion without blocking
    pub fn poll(&mut self) -> Option<AssetResult<ImageData>> {
        let receiver = self.receiver.as_ref()?;
        let outcome = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(AssetError::LoaderDropped(self.label.clone())),
        };
        self.receiver = None;
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_until_sent() {
        let (sender, mut pending) = PendingImage::channel("stars.png");
        assert!(pending.poll().is_none());
        sender.send(Ok(ImageData::solid([255; 4]))).unwrap();
        assert_eq!(pending.poll(), Some(Ok(ImageData::solid([255; 4]))));
        assert!(pending.is_finished());
        assert!(pending.poll().is_none());
    }

    #[test]
    fn test_dropped_sender_reports_error() {
        let (sender, mut pending) = PendingImage::channel("stars.png");
        drop(sender);
        assert_eq!(
            pending.poll(),
            Some(Err(AssetError::LoaderDropped("stars.png".to_string())))
        );
    }

    #[test]
    fn test_completed_constructors() {
        let mut ready = PendingImage::ready("a", ImageData::solid([0, 0, 0, 255]));
        assert!(matches!(ready.poll(), Some(Ok(_))));

        let mut failed = PendingImage::failed("b", AssetError::NotFound("b".into()));
        assert!(matches!(failed.poll(), Some(Err(AssetError::NotFound(_)))));
        assert_eq!(failed.label(), "b");
    }

    #[test]
    fn test_delivery_from_another_thread() {
        let (sender, mut pending) = PendingImage::channel("thread");
        std::thread::spawn(move || {
            let _ = sender.send(Ok(ImageData::solid([1, 2, 3, 4])));
        })
        .join()
        .unwrap();
        assert!(matches!(pending.poll(), Some(Ok(image)) if image.pixels == vec![1, 2, 3, 4]));
    }
}
