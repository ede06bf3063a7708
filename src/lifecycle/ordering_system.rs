use super::config::OrderingConfig;
use super::session::Session;
use crate::clients::{CartClient, ContactClient, OrderClient};
use crate::contact_actor::{ContactStore, JsonFileStore};
use crate::model::{catalog, Catalog};
use crate::order_actor::OrderError;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Starts, wires and stops the ordering actors.
///
/// # Architecture
///
/// - **Cart actor**: one cart per session, no dependencies
/// - **Contact actor**: one directory per session, persisted through a [`ContactStore`]
/// - **Order actor**: one tracker per session, reads and clears the cart and
///   reads the selected contact
///
/// # Example
///
/// ```ignore
/// let system = OrderingSystem::new(OrderingConfig::load(), Arc::new(MemoryStore::new()));
/// let session = system.open_session().await?;
///
/// let line = session.add_item(ItemId(1)).await?;
/// session.add_phone(Some("Casa".into()), "555 123 4567").await?;
/// session.submit().await?;
///
/// session.close().await?;
/// system.shutdown().await?;
/// ```
pub struct OrderingSystem {
    pub cart_client: CartClient,
    pub contact_client: ContactClient,
    pub order_client: OrderClient,
    config: OrderingConfig,
    catalog: Arc<Catalog>,
    shutdown: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl OrderingSystem {
    /// Spawns the three actors. Must be called inside a Tokio runtime.
    pub fn new(config: OrderingConfig, store: Arc<dyn ContactStore>) -> Self {
        let shutdown = CancellationToken::new();

        // 1. Create actors (no dependencies)
        let (cart_actor, cart_client) = crate::cart_actor::new();
        let (contact_actor, contact_client) = crate::contact_actor::new();
        let (order_actor, order_client) = crate::order_actor::new(config.timing, shutdown.clone());

        // 2. Start actors with injected context
        let cart_handle = tokio::spawn(cart_actor.run(()));
        let contact_handle = tokio::spawn(contact_actor.run(store));
        let order_handle =
            tokio::spawn(order_actor.run((cart_client.clone(), contact_client.clone())));

        info!(
            stages = config.stages.len(),
            step_ms = config.timing.step_dwell.as_millis() as u64,
            final_ms = config.timing.final_dwell.as_millis() as u64,
            "Ordering system started"
        );

        Self {
            cart_client,
            contact_client,
            order_client,
            config,
            catalog: Arc::new(catalog()),
            shutdown,
            handles: vec![order_handle, cart_handle, contact_handle],
        }
    }

    /// Uses a [`JsonFileStore`] rooted at `config.store_dir`.
    pub fn with_file_store(config: OrderingConfig) -> Self {
        let store = Arc::new(JsonFileStore::new(config.store_dir.clone()));
        Self::new(config, store)
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.clone()
    }

    /// Opens a cart, a contact directory (restored from the store) and a
    /// tracker bound to both.
    pub async fn open_session(&self) -> Result<Session, OrderError> {
        let cart = self.cart_client.open().await?;
        let contacts = self.contact_client.open().await?;
        let order = self
            .order_client
            .open(cart, contacts, self.config.stages.clone())
            .await?;
        info!(%cart, %contacts, %order, "Session opened");

        Ok(Session::new(cart, contacts, order, self))
    }

    /// Gracefully shuts down the system.
    ///
    /// Pending submission timers are cancelled first, so no stage advances
    /// after this call. Every [`Session`] must have been closed or dropped,
    /// since a live session keeps the actors' channels open.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        self.shutdown.cancel();

        drop(self.order_client);
        drop(self.cart_client);
        drop(self.contact_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
