use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use crate::client::{ClientRegistry, handle_client};
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::protocol::responses::{self, format_response};
use crate::storage::{StoreHandle, open_store};

pub struct Server {
    client_registry: Arc<Mutex<ClientRegistry>>,
    store: StoreHandle,
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Opens the configured credential store and binds the control listener.
    pub async fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let store = open_store(&config.store)?;
        Self::with_store(config, store).await
    }

    /// Binds the control listener around an already opened store.
    pub async fn with_store(config: ServerConfig, store: StoreHandle) -> Result<Self, ServerError> {
        let socket = config.control_socket();
        let listener = TcpListener::bind(&socket).await.map_err(|e| {
            error!("Failed to bind to {}: {}", socket, e);
            e
        })?;
        info!("Server bound to {}", listener.local_addr()?);

        Ok(Self {
            client_registry: Arc::new(Mutex::new(ClientRegistry::new(config.max_clients))),
            store,
            listener,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn start(&self) {
        info!(
            "Starting RAX auth server on {} (max {} clients)",
            self.config.control_socket(),
            self.config.max_clients
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let client_registry = Arc::clone(&self.client_registry);
                    let store = self.store.clone();
                    let config = Arc::clone(&self.config);

                    // Spawn a task for each client so accept loop doesn't block
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_new_client(stream, addr, store, client_registry, config).await
                        {
                            warn!("Failed to handle client {}: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}

/// Registers a new client, then runs its session until it ends.
async fn handle_new_client(
    mut stream: TcpStream,
    client_addr: SocketAddr,
    store: StoreHandle,
    client_registry: Arc<Mutex<ClientRegistry>>,
    config: Arc<ServerConfig>,
) -> Result<(), std::io::Error> {
    {
        let mut clients = client_registry.lock().await;
        if !clients.try_insert(client_addr) {
            drop(clients);
            warn!("Rejecting {}: connection limit reached", client_addr);
            stream
                .write_all(
                    format_response(
                        responses::SERVICE_UNAVAILABLE,
                        "Too many connections. Try again later.",
                    )
                    .as_bytes(),
                )
                .await?;
            return Ok(());
        }
        info!(
            "Client connected: {} ({}/{} clients, {} authenticated)",
            client_addr,
            clients.len(),
            clients.max_clients(),
            clients.authenticated_count()
        );
    }

    let result = handle_client(
        stream,
        client_addr,
        store,
        Arc::clone(&client_registry),
        config,
    )
    .await;

    let mut clients = client_registry.lock().await;
    let username = clients.remove(&client_addr).and_then(|c| c.username);
    info!(
        "Client {} disconnected{} ({} clients, {} authenticated)",
        client_addr,
        username.map(|u| format!(" as '{}'", u)).unwrap_or_default(),
        clients.len(),
        clients.authenticated_count()
    );
    result
}
