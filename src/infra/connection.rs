use std::future::Future;

use bson::doc;
use futures::future::{BoxFuture, FutureExt, Shared};
use mongodb::{options::ClientOptions, Client, Database};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::config::{Config, DEFAULT_DATABASE_NAME};
use crate::error::AppError;

type PendingConnect<C, E> = Shared<BoxFuture<'static, Result<C, E>>>;

enum Slot<C, E> {
    Empty,
    Pending(PendingConnect<C, E>),
    Ready(C),
}

/// Caches one connection handle and coalesces concurrent first callers onto a
/// single in-flight attempt. A failed attempt is handed to everyone waiting on
/// it and then cleared so the next call starts over.
pub struct ConnectionManager<C, E> {
    slot: Mutex<Slot<C, E>>,
}

impl<C, E> ConnectionManager<C, E>
where
    C: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub const fn new() -> Self {
        Self {
            slot: Mutex::const_new(Slot::Empty),
        }
    }

    pub async fn get_or_connect<F, Fut>(&self, connect: F) -> Result<C, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, E>> + Send + 'static,
    {
        let pending = {
            let mut slot = self.slot.lock().await;
            // A settled attempt can linger here if its waiters were cancelled
            // before recording the outcome.
            let settled = match &*slot {
                Slot::Ready(conn) => return Ok(conn.clone()),
                Slot::Pending(pending) => pending.peek().cloned(),
                Slot::Empty => None,
            };

            match settled {
                Some(Ok(conn)) => {
                    *slot = Slot::Ready(conn.clone());
                    return Ok(conn);
                }
                Some(Err(_)) => Self::start(&mut slot, connect),
                None => match &*slot {
                    Slot::Pending(pending) => pending.clone(),
                    _ => Self::start(&mut slot, connect),
                },
            }
        };

        let result = pending.clone().await;

        let mut slot = self.slot.lock().await;
        if let Slot::Pending(current) = &*slot {
            if current.ptr_eq(&pending) {
                *slot = match &result {
                    Ok(conn) => Slot::Ready(conn.clone()),
                    Err(_) => Slot::Empty,
                };
            }
        }

        result
    }

    fn start<F, Fut>(slot: &mut Slot<C, E>, connect: F) -> PendingConnect<C, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, E>> + Send + 'static,
    {
        let pending = connect().boxed().shared();
        *slot = Slot::Pending(pending.clone());
        pending
    }

    pub async fn cached(&self) -> Option<C> {
        match &*self.slot.lock().await {
            Slot::Ready(conn) => Some(conn.clone()),
            _ => None,
        }
    }

    pub async fn reset(&self) {
        *self.slot.lock().await = Slot::Empty;
    }
}

impl<C, E> Default for ConnectionManager<C, E>
where
    C: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

static MONGO: ConnectionManager<Client, mongodb::error::Error> = ConnectionManager::new();

/// Process-wide MongoDB client. The first call connects, later calls reuse it.
pub async fn connect(config: &Config) -> Result<Client, AppError> {
    let uri = config.mongodb_uri.clone();
    let timeout = config.server_selection_timeout;

    MONGO
        .get_or_connect(move || async move {
            info!("Initializing MongoDB connection...");
            let mut options = ClientOptions::parse(&uri).await?;
            options.server_selection_timeout = Some(timeout);
            options.app_name.get_or_insert_with(|| "event-listing".to_string());

            let client = Client::with_options(options)?;
            client.database("admin").run_command(doc! { "ping": 1 }).await?;
            info!("Connected to MongoDB");
            Ok::<_, mongodb::error::Error>(client)
        })
        .await
        .map_err(|e| {
            error!("MongoDB connection failed: {}", e);
            AppError::Database(e)
        })
}

/// Database named in config, else the URI's default database, else `DEFAULT_DATABASE_NAME`.
pub fn database(client: &Client, config: &Config) -> Database {
    match &config.database_name {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE_NAME)),
    }
}
