use std::path::Path;

use crossbeam::channel;
use crossbeam::thread;
use log::debug;

use crate::count::count_range;
use crate::error::{Error, Result};
use crate::handoff;
use crate::settings::Settings;
use crate::table::FrequencyMap;

/// Runs `first` on the calling thread and `second` on one spawned thread,
/// then waits for both.
///
/// The spawned side owns its table until it is encoded; only the payload
/// bytes come back over the channel. If the thread dies before sending,
/// the channel disconnects and this returns [`Error::WorkerFailed`] rather
/// than an empty table.
pub fn join_halves<F, S>(first: F, second: S) -> Result<(FrequencyMap, FrequencyMap)>
where
    F: FnOnce() -> Result<FrequencyMap>,
    S: FnOnce() -> Result<FrequencyMap> + Send,
{
    let (tx, rx) = channel::bounded::<Result<Vec<u8>>>(1);

    let joined = thread::scope(|s| {
        s.spawn(move |_| {
            let payload = second().and_then(|t| handoff::encode(&t));
            // receiver only goes away if the first half already failed
            let _ = tx.send(payload);
        });

        let left = first();
        let right = match rx.recv() {
            Ok(payload) => payload.and_then(|bytes| {
                debug!("received {} byte payload from second worker", bytes.len());
                handoff::decode(&bytes)
            }),
            Err(_) => Err(Error::WorkerFailed),
        };
        (left, right)
    });

    // a panic in the spawned thread closes the channel first, so `right` is
    // already WorkerFailed in that case
    let (left, right) = joined.map_err(|_| Error::WorkerFailed)?;
    Ok((left?, right?))
}

/// Counts `[0, split)` here and `[split, size)` on a second thread.
pub fn count_halves(
    path: &Path,
    split: u64,
    size: u64,
    settings: &Settings,
) -> Result<(FrequencyMap, FrequencyMap)> {
    let read_buffer = settings.read_buffer;
    join_halves(
        || Ok(count_range(path, 0..split, read_buffer)?),
        move || Ok(count_range(path, split..size, read_buffer)?),
    )
}
