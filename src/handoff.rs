//! Byte encoding of a [`FrequencyMap`] for the trip from the second worker
//! back to the coordinator.

use bincode::Options;

use crate::error::{Error, Result};
use crate::schema;
use crate::table::FrequencyMap;

// varint lengths, and a payload with bytes left over is rejected
fn options() -> impl Options {
    bincode::DefaultOptions::new()
}

pub fn encode(table: &FrequencyMap) -> Result<Vec<u8>> {
    options()
        .serialize(table)
        .map_err(|e| Error::HandoffCorrupt(format!("encode: {e}")))
}

pub fn decode(payload: &[u8]) -> Result<FrequencyMap> {
    let table: FrequencyMap = options()
        .deserialize(payload)
        .map_err(|e| Error::HandoffCorrupt(e.to_string()))?;

    for (i, (key, &count)) in table.iter().enumerate() {
        if !schema::is_valid_key(key) {
            return Err(Error::HandoffCorrupt(format!(
                "entry {i}: key of {} bytes is too short",
                key.len()
            )));
        }
        if count == 0 {
            return Err(Error::HandoffCorrupt(format!("entry {i}: zero count")));
        }
    }
    Ok(table)
}
