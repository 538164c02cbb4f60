//! Validated server configuration.

use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

use super::error::ConfigError;

/// Default upper bound on the number of listener ports
pub const DEFAULT_MAX_PORTS: usize = 10;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ip_address: IpAddr,
    pub start_port: u16,
    pub port_count: usize,
    pub max_ports: usize,
    pub max_seats: u32,
    pub seed_file: PathBuf,
    pub output_file: PathBuf,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port_count == 0 || self.port_count > self.max_ports {
            return Err(ConfigError::PortCount {
                count: self.port_count,
                max: self.max_ports,
            });
        }
        let last = u16::try_from(self.port_count - 1)
            .ok()
            .and_then(|offset| self.start_port.checked_add(offset));
        if last.is_none() {
            return Err(ConfigError::PortRange {
                start: self.start_port,
                count: self.port_count,
            });
        }
        Ok(())
    }

    /// One address per listener, `start_port` upwards. Index `i` of the
    /// result is the session slot served by that listener.
    pub fn listen_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.validate()?;
        Ok((0..self.port_count)
            .filter_map(|offset| u16::try_from(offset).ok())
            .map(|offset| SocketAddr::new(self.ip_address, self.start_port + offset))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::DEFAULT_MAX_SEATS;
    use std::net::Ipv4Addr;

    fn create_test_config(start_port: u16, port_count: usize) -> ServerConfig {
        ServerConfig {
            ip_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            start_port,
            port_count,
            max_ports: DEFAULT_MAX_PORTS,
            max_seats: DEFAULT_MAX_SEATS,
            seed_file: PathBuf::from("seed.txt"),
            output_file: PathBuf::from("out.txt"),
        }
    }

    #[test]
    fn test_listen_addrs_are_consecutive() {
        // テスト項目: 開始ポートから連続したアドレスが生成される
        // given (前提条件):
        let config = create_test_config(9000, 3);

        // when (操作):
        let addrs = config.listen_addrs().unwrap();

        // then (期待する結果):
        let ports: Vec<u16> = addrs.iter().map(|addr| addr.port()).collect();
        assert_eq!(ports, vec![9000, 9001, 9002]);
        assert!(addrs.iter().all(|addr| addr.ip().is_loopback()));
    }

    #[test]
    fn test_port_count_bounds() {
        // テスト項目: ポート数は 1 以上かつ上限以下でなければならない
        // given (前提条件):
        let zero = create_test_config(9000, 0);
        let too_many = create_test_config(9000, DEFAULT_MAX_PORTS + 1);

        // when (操作):
        let zero = zero.validate();
        let too_many = too_many.validate();

        // then (期待する結果):
        assert_eq!(zero, Err(ConfigError::PortCount { count: 0, max: 10 }));
        assert_eq!(too_many, Err(ConfigError::PortCount { count: 11, max: 10 }));
    }

    #[test]
    fn test_port_range_overflow() {
        // テスト項目: ポート番号が u16 を超える構成は拒否される
        // given (前提条件):
        let config = create_test_config(u16::MAX - 1, 3);

        // when (操作):
        let result = config.listen_addrs();

        // then (期待する結果):
        assert!(matches!(result, Err(ConfigError::PortRange { .. })));
    }
}
