pub mod activities_store;
pub mod app_data_store;
pub mod list_sync;
pub mod messages_store;
pub mod people_store;
pub mod reports_store;

pub use activities_store::ActivitiesStore;
pub use app_data_store::AppDataStore;
pub use list_sync::{FilterState, ListSync, LoadState};
pub use messages_store::MessagesStore;
pub use people_store::PeopleStore;
pub use reports_store::ReportsStore;
