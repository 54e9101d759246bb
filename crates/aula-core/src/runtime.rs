use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use crate::config::CoreConfig;
use crate::net::worker::{ClientCommand, DataChange, SyncWorker};
use crate::session::Session;
use crate::store::AppDataStore;

/// Cheap handle for sending commands to the worker from anywhere.
#[derive(Clone)]
pub struct CoreHandle {
    command_tx: Sender<ClientCommand>,
}

impl CoreHandle {
    pub fn send(&self, command: ClientCommand) -> Result<(), mpsc::SendError<ClientCommand>> {
        self.command_tx.send(command)
    }
}

/// Bundles the data store, the worker thread, and the channels between them.
/// The consumer drains `DataChange`s (via `take_data_rx` or `poll_change`)
/// and feeds each one to `process_change` on its own thread.
pub struct CoreRuntime {
    data_store: Rc<RefCell<AppDataStore>>,
    data_rx: Option<Receiver<DataChange>>,
    handle: CoreHandle,
    worker_handle: Option<JoinHandle<()>>,
}

impl CoreRuntime {
    pub fn new(config: CoreConfig, session: Session) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<ClientCommand>();
        let (data_tx, data_rx) = mpsc::channel::<DataChange>();

        let worker = SyncWorker::new(config, session, command_rx, data_tx);
        let worker_handle = std::thread::spawn(move || worker.run());

        Self {
            data_store: Rc::new(RefCell::new(AppDataStore::new())),
            data_rx: Some(data_rx),
            handle: CoreHandle { command_tx },
            worker_handle: Some(worker_handle),
        }
    }

    pub fn handle(&self) -> CoreHandle {
        self.handle.clone()
    }

    pub fn data_store(&self) -> Rc<RefCell<AppDataStore>> {
        self.data_store.clone()
    }

    /// Take ownership of the change receiver, for consumers that run their
    /// own receive loop.
    pub fn take_data_rx(&mut self) -> Option<Receiver<DataChange>> {
        self.data_rx.take()
    }

    /// Next pending change, if any, without blocking.
    pub fn poll_change(&mut self) -> Option<DataChange> {
        self.data_rx.as_ref()?.try_recv().ok()
    }

    pub fn process_change(&self, change: DataChange) {
        self.data_store.borrow_mut().apply(change);
    }

    pub fn shutdown(&mut self) {
        let _ = self.handle.send(ClientCommand::Shutdown);
        if let Some(worker_handle) = self.worker_handle.take() {
            let _ = worker_handle.join();
        }
    }
}

impl Drop for CoreRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}
