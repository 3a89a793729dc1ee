use crate::dispatch::BackupJob;
use crate::error::ApiError;
use crate::models::{BackupRecord, RemoteEntry, StorageUsage};
use crate::restore::RestoreDetails;
use crate::session::Session;

/// Completions delivered from spawned request tasks back into the event
/// loop. Each task sends exactly one of these; the components decide whether
/// the completion is still current (generations) or how to classify it.
#[derive(Debug)]
pub enum AppEvent {
    ListingDone {
        generation: u64,
        result: Result<Vec<RemoteEntry>, ApiError>,
    },
    BackupDone {
        job: BackupJob,
        result: Result<(), ApiError>,
    },
    VaultDone {
        generation: u64,
        result: Result<Vec<BackupRecord>, ApiError>,
    },
    RestoreDone {
        result: Result<RestoreDetails, ApiError>,
    },
    StorageDone {
        result: Result<StorageUsage, ApiError>,
    },
    LoginDone {
        result: Result<Session, ApiError>,
    },
    RegisterDone {
        username: String,
        result: Result<(), ApiError>,
    },
}
