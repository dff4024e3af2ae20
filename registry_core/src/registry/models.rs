use serde::{Deserialize, Serialize};

/// One regular file in the registry directory.
///
/// `size` is read from the filesystem at listing time, never cached, so it
/// reflects on-disk state even after out-of-band modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub name: String,
    pub size: u64,
}
