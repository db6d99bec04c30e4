use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use tracing::{info, warn};

use canopy_loader::load_dataset;

use crate::endpoint::Endpoint;
use crate::error::ClientError;
use crate::net::TcpSender;
use crate::wire;

/// Tagged result of one upload attempt. Failures carry the stage that
/// produced them so callers can render categorized messages.
#[derive(Debug)]
pub enum Outcome {
    Delivered { records: usize, bytes_sent: usize },
    LoadFailed(ClientError),
    TransmitFailed(ClientError),
}

impl Outcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Outcome::Delivered { .. })
    }
}

/// Runs one upload: load, encode, send, strictly in sequence. The
/// sender is never invoked after a load or encode failure, and no
/// state is shared between successive calls.
pub fn upload(path: &Path, endpoint: &Endpoint) -> Outcome {
    upload_with(&TcpSender::new(), path, endpoint)
}

pub fn upload_with(sender: &TcpSender, path: &Path, endpoint: &Endpoint) -> Outcome {
    let dataset = match load_dataset(path) {
        Ok(dataset) => dataset,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "dataset load failed");
            return Outcome::LoadFailed(err.into());
        }
    };
    info!(path = %path.display(), records = dataset.len(), "dataset loaded");

    // Payload production belongs to the load stage: nothing has
    // touched the network yet.
    let payload = match wire::encode(&dataset) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "payload encoding failed");
            return Outcome::LoadFailed(err);
        }
    };

    match sender.send(endpoint, &payload) {
        Ok(delivery) => {
            info!(%endpoint, bytes = delivery.bytes_sent, "payload delivered");
            Outcome::Delivered {
                records: dataset.len(),
                bytes_sent: delivery.bytes_sent,
            }
        }
        Err(err) => {
            warn!(%endpoint, error = %err, "transmission failed");
            Outcome::TransmitFailed(err.into())
        }
    }
}

/// Runs the upload on a worker thread and hands the outcome back over
/// a channel, so a presentation layer stays responsive while the file
/// read and socket write block.
pub fn spawn_upload(path: PathBuf, endpoint: Endpoint) -> mpsc::Receiver<Outcome> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = upload(&path, &endpoint);
        // The receiver may have gone away; nothing to do then.
        let _ = tx.send(outcome);
    });
    rx
}
