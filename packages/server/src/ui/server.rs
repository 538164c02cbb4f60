//! Server lifecycle: spawn one listener thread per address, join them on
//! shutdown.

use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

use crate::domain::Desk;

use super::{error::ConfigError, listener::Listener};

struct RunningListener {
    index: usize,
    addr: SocketAddr,
    enabled: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Multi-port desk server
///
/// # Example
///
/// ```ignore
/// let server = Server::start(desk, &config.listen_addrs()?)?;
/// // ... run the operator console ...
/// server.shutdown();
/// ```
pub struct Server {
    desk: Arc<Desk>,
    listeners: Vec<RunningListener>,
}

impl Server {
    /// Bind and spawn a listener for every address.
    ///
    /// Listener `i` serves session slot `i`, so the desk needs at least as many
    /// slots as there are addresses. An address that cannot be bound is
    /// logged and skipped; the other listeners still start.
    pub fn start(desk: Arc<Desk>, addrs: &[SocketAddr]) -> Result<Self, ConfigError> {
        let sessions = desk.lock().sessions.capacity();
        if addrs.len() > sessions {
            return Err(ConfigError::TooManyListeners {
                listeners: addrs.len(),
                sessions,
            });
        }

        let mut listeners = Vec::with_capacity(addrs.len());
        for (index, addr) in addrs.iter().enumerate() {
            let enabled = Arc::new(AtomicBool::new(true));
            let listener = match Listener::bind(index, *addr, desk.clone(), enabled.clone()) {
                Ok(listener) => listener,
                Err(e) => {
                    tracing::error!("Skipping listener {}: {}", index, e);
                    continue;
                }
            };

            let addr = listener.local_addr();
            let spawned = thread::Builder::new()
                .name(format!("listener-{}", index))
                .spawn(move || listener.run());
            match spawned {
                Ok(handle) => listeners.push(RunningListener {
                    index,
                    addr,
                    enabled,
                    handle,
                }),
                Err(e) => tracing::error!("Cannot spawn listener {}: {}", index, e),
            }
        }

        tracing::info!("{} of {} listeners started", listeners.len(), addrs.len());
        Ok(Self { desk, listeners })
    }

    /// Number of listeners that were started
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Bound address of the listener serving session slot `index`
    pub fn local_addr(&self, index: usize) -> Option<SocketAddr> {
        self.listeners
            .iter()
            .find(|listener| listener.index == index)
            .map(|listener| listener.addr)
    }

    /// Whether the listener for slot `index` is still serving
    pub fn is_serving(&self, index: usize) -> bool {
        self.listeners
            .iter()
            .any(|listener| listener.index == index && !listener.handle.is_finished())
    }

    /// Disable every listener and wait for its thread to exit
    pub fn shutdown(self) {
        tracing::info!("Shutting down {} listeners", self.listeners.len());
        for listener in &self.listeners {
            listener.enabled.store(false, Ordering::SeqCst);
        }
        // listeners blocked reading an idle connection only notice the flag
        // once that connection is gone
        for (index, channel) in self.desk.lock().sessions.attached() {
            match channel.close() {
                Ok(()) => tracing::debug!("Closed open connection of slot {}", index),
                Err(e) => tracing::debug!("Slot {} connection already closed: {}", index, e),
            }
        }
        for listener in self.listeners {
            if listener.handle.join().is_err() {
                tracing::error!("Listener {} panicked", listener.index);
            }
        }
        tracing::info!("Server shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Inventory, SessionRegistry, inventory::DEFAULT_MAX_SEATS},
        infrastructure::repository::BTreeFlightStore,
    };
    use std::net::Ipv4Addr;

    fn create_test_desk(slots: usize) -> Arc<Desk> {
        let inventory = Inventory::new(Box::new(BTreeFlightStore::new()), DEFAULT_MAX_SEATS);
        Arc::new(Desk::new(inventory, SessionRegistry::new(slots)))
    }

    fn loopback() -> SocketAddr {
        SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 0)
    }

    #[test]
    fn test_start_rejects_more_listeners_than_slots() {
        // テスト項目: セッション数より多いリスナーは起動前に拒否される
        // given (前提条件):
        let desk = create_test_desk(1);

        // when (操作):
        let result = Server::start(desk, &[loopback(), loopback()]);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ConfigError::TooManyListeners {
                listeners: 2,
                sessions: 1
            })
        ));
    }

    #[test]
    fn test_start_and_shutdown() {
        // テスト項目: 全リスナーが起動し shutdown で終了する
        // given (前提条件):
        let desk = create_test_desk(3);

        // when (操作):
        let server = Server::start(desk, &[loopback(), loopback(), loopback()]).unwrap();

        // then (期待する結果):
        assert_eq!(server.listener_count(), 3);
        assert!((0..3).all(|index| server.local_addr(index).is_some()));
        assert!(server.is_serving(2));
        server.shutdown();
    }

    #[test]
    fn test_start_skips_unbindable_address() {
        // テスト項目: bind できないアドレスは読み飛ばされ他のリスナーは起動する
        // given (前提条件):
        let taken = std::net::TcpListener::bind(loopback()).unwrap();
        let desk = create_test_desk(2);

        // when (操作):
        let server = Server::start(desk, &[taken.local_addr().unwrap(), loopback()]).unwrap();

        // then (期待する結果):
        assert_eq!(server.listener_count(), 1);
        assert!(server.local_addr(0).is_none());
        assert!(server.local_addr(1).is_some());
        server.shutdown();
    }
}
