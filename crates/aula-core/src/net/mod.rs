pub mod api;
pub mod worker;

pub use api::{
    ApiClient, NewActivityRequest, NewMessageRequest, NewReportRequest, ProfileEditRequest,
    Resource,
};
pub use worker::{ClientCommand, DataChange, SyncWorker};
