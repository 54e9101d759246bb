//! Background worker owning all server I/O.
//!
//! The worker runs on its own thread with its own tokio runtime. The
//! consumer sends `ClientCommand`s in and receives `DataChange`s out over
//! plain mpsc channels, so the store side stays synchronous and
//! single-threaded.
//!
//! Bulk fetches are spawned as tasks keyed by resource: re-issuing a fetch
//! aborts the in-flight one, so a stale response can never land after a
//! newer request, and shutdown aborts everything still running.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use crate::config::CoreConfig;
use crate::models::{Activity, Grade, Message, Person, Report, User};
use crate::net::api::{ApiClient, Resource};
use crate::session::Session;
use crate::streaming::{LiveEvent, SocketClient};

#[derive(Debug)]
pub enum ClientCommand {
    /// Bulk-fetch one resource; supersedes any in-flight fetch for it.
    Fetch(Resource),
    /// Open the live socket (one per session; repeat connects are ignored).
    Connect,
    Shutdown,
}

#[derive(Debug)]
pub enum DataChange {
    InfoLoaded(User),
    MessagesLoaded(Vec<Message>),
    ActivitiesLoaded(Vec<Activity>),
    ReportsLoaded(Vec<Report>),
    PeopleLoaded(Vec<Person>),
    GradesLoaded(Vec<Grade>),
    /// A bulk fetch failed; carries the server or transport error message.
    FetchFailed { resource: Resource, error: String },
    Live(LiveEvent),
    /// The live socket closed. There is no automatic reconnect; the consumer
    /// surfaces this and the user decides when to retry.
    ConnectionLost,
}

pub struct SyncWorker {
    config: CoreConfig,
    session: Session,
    command_rx: Receiver<ClientCommand>,
    data_tx: Sender<DataChange>,
}

impl SyncWorker {
    pub fn new(
        config: CoreConfig,
        session: Session,
        command_rx: Receiver<ClientCommand>,
        data_tx: Sender<DataChange>,
    ) -> Self {
        Self {
            config,
            session,
            command_rx,
            data_tx,
        }
    }

    pub fn run(self) {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!(error = %e, "failed to start worker runtime");
                return;
            }
        };

        let api = Arc::new(ApiClient::new(&self.config, self.session.clone()));
        let mut fetches: HashMap<Resource, tokio::task::JoinHandle<()>> = HashMap::new();
        let mut socket_task: Option<tokio::task::JoinHandle<()>> = None;

        while let Ok(command) = self.command_rx.recv() {
            match command {
                ClientCommand::Fetch(resource) => {
                    if let Some(previous) = fetches.remove(&resource) {
                        previous.abort();
                    }
                    let api = api.clone();
                    let data_tx = self.data_tx.clone();
                    fetches.insert(
                        resource,
                        runtime.spawn(async move {
                            let change = fetch_resource(&api, resource).await;
                            let _ = data_tx.send(change);
                        }),
                    );
                }
                ClientCommand::Connect => {
                    let connected = socket_task
                        .as_ref()
                        .map(|task| !task.is_finished())
                        .unwrap_or(false);
                    if !connected {
                        let client = SocketClient::new(&self.config, &self.session);
                        let data_tx = self.data_tx.clone();
                        socket_task = Some(runtime.spawn(client.run(data_tx)));
                    }
                }
                ClientCommand::Shutdown => break,
            }
        }

        for (_, task) in fetches {
            task.abort();
        }
        if let Some(task) = socket_task {
            task.abort();
        }
        runtime.shutdown_background();
    }
}

async fn fetch_resource(api: &ApiClient, resource: Resource) -> DataChange {
    let result = match resource {
        Resource::Info => api.fetch_info().await.map(DataChange::InfoLoaded),
        Resource::Messages => api.fetch_messages().await.map(DataChange::MessagesLoaded),
        Resource::Activities => api
            .fetch_activities()
            .await
            .map(DataChange::ActivitiesLoaded),
        Resource::Reports => api.fetch_reports().await.map(DataChange::ReportsLoaded),
        Resource::People => api.fetch_people().await.map(DataChange::PeopleLoaded),
        Resource::Grades => api.fetch_grades().await.map(DataChange::GradesLoaded),
    };
    result.unwrap_or_else(|e| DataChange::FetchFailed {
        resource,
        error: e.to_string(),
    })
}
