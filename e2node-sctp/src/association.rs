//! SCTP association management for E2AP transport.

use bytes::Bytes;
use e2node_common::SctpOptions;
use sctp_proto::{
    Association, AssociationHandle, ClientConfig, DatagramEvent, Endpoint, EndpointConfig, Event,
    Payload, PayloadProtocolIdentifier, TransportConfig, Transmit,
};
use std::{
    collections::{BTreeSet, VecDeque},
    fmt, io,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    sync::Arc,
    time::{Duration, Instant},
};
use thiserror::Error;
use tokio::{net::UdpSocket, time::timeout};
use tracing::{debug, info, trace, warn};

/// E2AP Payload Protocol Identifier (O-RAN.WG3.E2GAP)
pub const E2AP_PPID: u32 = 70;
/// Default number of SCTP streams
pub const DEFAULT_NUM_STREAMS: u16 = 2;
/// Default maximum message size (64KB)
pub const DEFAULT_MAX_MESSAGE_SIZE: u32 = 65536;
/// Default receive buffer size (256KB)
pub const DEFAULT_RECEIVE_BUFFER_SIZE: u32 = 262144;

/// SCTP association errors
#[derive(Debug, Error)]
pub enum SctpError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Association closed")]
    AssociationClosed,
    #[error("Stream error: {0}")]
    StreamError(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type for SCTP operations
pub type Result<T> = std::result::Result<T, SctpError>;

/// SCTP association state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssociationState {
    #[default]
    Closed,
    Connecting,
    Established,
    ShuttingDown,
}

impl fmt::Display for AssociationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssociationState::Closed => write!(f, "Closed"),
            AssociationState::Connecting => write!(f, "Connecting"),
            AssociationState::Established => write!(f, "Established"),
            AssociationState::ShuttingDown => write!(f, "ShuttingDown"),
        }
    }
}

/// Configuration for an SCTP association
#[derive(Debug, Clone)]
pub struct SctpConfig {
    pub max_outbound_streams: u16,
    pub max_inbound_streams: u16,
    pub max_message_size: u32,
    pub max_receive_buffer_size: u32,
    pub rto_initial_ms: u64,
    pub rto_min_ms: u64,
    pub rto_max_ms: u64,
    /// INIT retransmission attempts before the connect is abandoned
    pub init_max_attempts: u16,
    /// Upper bound of a single INIT attempt
    pub init_max_timeout: Duration,
}

impl SctpConfig {
    /// Total time allowed for the 4-way handshake.
    pub fn handshake_deadline(&self) -> Duration {
        self.init_max_timeout * u32::from(self.init_max_attempts.max(1))
    }
}

impl Default for SctpConfig {
    fn default() -> Self {
        Self::from(&SctpOptions::default())
    }
}

impl From<&SctpOptions> for SctpConfig {
    fn from(options: &SctpOptions) -> Self {
        Self {
            max_outbound_streams: options.num_streams,
            max_inbound_streams: options.num_streams,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_receive_buffer_size: DEFAULT_RECEIVE_BUFFER_SIZE,
            rto_initial_ms: options.rto_initial_ms,
            rto_min_ms: options.rto_min_ms,
            rto_max_ms: options.rto_max_ms,
            init_max_attempts: options.init_max_attempts,
            init_max_timeout: Duration::from_millis(options.init_max_timeout_ms),
        }
    }
}

/// Received SCTP message
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub stream_id: u16,
    pub data: Bytes,
    pub ppid: u32,
}

/// Peer-status notifications raised by the association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SctpNotification {
    /// The peer shut the association down, or it was lost
    Shutdown,
    /// The peer address stopped answering
    PeerAddressUnreachable,
    /// The peer reported an operational error
    RemoteError(String),
    /// The association came up or went down
    AssociationChange { up: bool },
}

impl fmt::Display for SctpNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SctpNotification::Shutdown => write!(f, "SHUTDOWN_EVENT"),
            SctpNotification::PeerAddressUnreachable => write!(f, "PEER_ADDR_UNREACHABLE"),
            SctpNotification::RemoteError(reason) => write!(f, "REMOTE_ERROR ({reason})"),
            SctpNotification::AssociationChange { up: true } => write!(f, "ASSOC_CHANGE (COMM_UP)"),
            SctpNotification::AssociationChange { up: false } => {
                write!(f, "ASSOC_CHANGE (COMM_LOST)")
            }
        }
    }
}

/// SCTP association events
#[derive(Debug, Clone)]
pub enum SctpEvent {
    DataReceived(ReceivedMessage),
    Notification(SctpNotification),
}

/// SCTP association wrapper for E2AP transport
pub struct SctpAssociation {
    socket: UdpSocket,
    remote_addr: SocketAddr,
    local_addr: SocketAddr,
    endpoint: Endpoint,
    handle: AssociationHandle,
    association: Association,
    state: AssociationState,
    pending_transmits: VecDeque<Transmit>,
    pending_events: VecDeque<SctpEvent>,
    /// Streams opened locally or accepted from the peer
    streams: BTreeSet<u16>,
    config: SctpConfig,
}

impl SctpAssociation {
    /// Connect to a remote SCTP endpoint (RIC) from an ephemeral local port
    pub async fn connect(remote_addr: SocketAddr, config: SctpConfig) -> Result<Self> {
        let unspecified = if remote_addr.is_ipv6() {
            IpAddr::V6(Ipv6Addr::UNSPECIFIED)
        } else {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        };
        Self::connect_with_local(SocketAddr::new(unspecified, 0), remote_addr, config).await
    }

    /// Connect to a remote SCTP endpoint from a specific local address
    pub async fn connect_with_local(
        local_addr: SocketAddr,
        remote_addr: SocketAddr,
        config: SctpConfig,
    ) -> Result<Self> {
        info!("Connecting to SCTP endpoint at {}", remote_addr);

        let socket = UdpSocket::bind(local_addr).await?;
        let actual_local = socket.local_addr()?;
        debug!("Bound to local address: {}", actual_local);

        let mut endpoint = Endpoint::new(Arc::new(EndpointConfig::new()), None);

        let transport_config = TransportConfig::default()
            .with_max_num_outbound_streams(config.max_outbound_streams)
            .with_max_num_inbound_streams(config.max_inbound_streams)
            .with_max_message_size(config.max_message_size)
            .with_max_receive_buffer_size(config.max_receive_buffer_size)
            .with_rto_initial_ms(config.rto_initial_ms)
            .with_rto_min_ms(config.rto_min_ms)
            .with_rto_max_ms(config.rto_max_ms);
        debug!(
            "RTO initial={}ms min={}ms max={}ms, INIT attempts={} timeout={:?}",
            config.rto_initial_ms,
            config.rto_min_ms,
            config.rto_max_ms,
            config.init_max_attempts,
            config.init_max_timeout
        );

        let mut client_config = ClientConfig::new();
        client_config.transport = Arc::new(transport_config);

        let (handle, association) = endpoint
            .connect(client_config, remote_addr)
            .map_err(|e| SctpError::ConnectionFailed(e.to_string()))?;

        let mut assoc = Self {
            socket,
            remote_addr,
            local_addr: actual_local,
            endpoint,
            handle,
            association,
            state: AssociationState::Connecting,
            pending_transmits: VecDeque::new(),
            pending_events: VecDeque::new(),
            streams: BTreeSet::new(),
            config,
        };

        assoc.perform_handshake().await?;

        Ok(assoc)
    }

    /// Perform the SCTP 4-way handshake
    async fn perform_handshake(&mut self) -> Result<()> {
        let deadline = Instant::now() + self.config.handshake_deadline();

        while self.state == AssociationState::Connecting {
            if Instant::now() > deadline {
                return Err(SctpError::Timeout("Connection handshake timed out".into()));
            }

            self.flush_transmits().await?;
            self.poll_events();

            if !self.association.is_handshaking() {
                self.state = AssociationState::Established;
                info!("SCTP association established with {}", self.remote_addr);
                return Ok(());
            }

            match timeout(Duration::from_millis(100), self.handle_incoming()).await {
                Ok(Ok(())) => {}
                Ok(Err(SctpError::Io(e))) if e.kind() == io::ErrorKind::ConnectionRefused => {
                    return Err(SctpError::ConnectionFailed(format!(
                        "{} refused the connection",
                        self.remote_addr
                    )));
                }
                Ok(Err(e)) => {
                    warn!("Error handling incoming packet: {}", e);
                }
                Err(_) => {
                    trace!("Receive timeout, continuing handshake");
                }
            }
        }

        if self.state == AssociationState::Established {
            Ok(())
        } else {
            Err(SctpError::ConnectionFailed(format!(
                "association with {} closed during handshake",
                self.remote_addr
            )))
        }
    }

    /// Wait for one UDP datagram and feed it to the endpoint
    async fn handle_incoming(&mut self) -> Result<()> {
        let mut buf = vec![0u8; self.config.max_receive_buffer_size as usize];
        let (len, from) = self.socket.recv_from(&mut buf).await?;
        buf.truncate(len);
        self.handle_datagram(from, buf);
        Ok(())
    }

    fn handle_datagram(&mut self, from: SocketAddr, data: Vec<u8>) {
        trace!("Received {} bytes from {}", data.len(), from);

        if let Some((handle, event)) =
            self.endpoint
                .handle(Instant::now(), from, None, None, Bytes::from(data))
        {
            if handle == self.handle {
                match event {
                    DatagramEvent::AssociationEvent(assoc_event) => {
                        self.association.handle_event(assoc_event);
                    }
                    DatagramEvent::NewAssociation(_) => {
                        debug!("Ignoring new association event (client mode)");
                    }
                }
            }
        }
    }

    /// Poll for association events and collect outgoing transmits
    fn poll_events(&mut self) {
        while let Some(event) = self.association.poll() {
            match event {
                Event::Connected => {
                    debug!("Association connected event");
                    self.state = AssociationState::Established;
                    self.pending_events
                        .push_back(SctpEvent::Notification(SctpNotification::AssociationChange {
                            up: true,
                        }));
                }
                Event::AssociationLost { reason } => {
                    warn!("Association lost: {}", reason);
                    let was_established = self.state == AssociationState::Established;
                    self.state = AssociationState::Closed;
                    if was_established {
                        self.pending_events
                            .push_back(SctpEvent::Notification(SctpNotification::Shutdown));
                    }
                }
                Event::Stream(stream_event) => {
                    trace!("Stream event: {:?}", stream_event);
                }
                Event::DatagramReceived => {
                    trace!("Datagram received event");
                }
            }
        }

        if let Some(timeout_instant) = self.association.poll_timeout() {
            let now = Instant::now();
            if now >= timeout_instant {
                self.association.handle_timeout(now);
            }
        }

        while let Some(transmit) = self.association.poll_transmit(Instant::now()) {
            self.pending_transmits.push_back(transmit);
        }
        while let Some(transmit) = self.endpoint.poll_transmit() {
            self.pending_transmits.push_back(transmit);
        }
    }

    /// Flush pending transmits to the network
    async fn flush_transmits(&mut self) -> Result<()> {
        while let Some(transmit) = self.pending_transmits.pop_front() {
            match &transmit.payload {
                Payload::RawEncode(chunks) => {
                    for chunk in chunks {
                        self.socket.send_to(chunk, transmit.remote).await?;
                        trace!("Sent {} bytes to {}", chunk.len(), transmit.remote);
                    }
                }
                Payload::PartialDecode(_) => {
                    trace!("Skipping PartialDecode payload for transmit");
                }
            }
        }
        Ok(())
    }

    /// Send data on a stream with the E2AP PPID
    pub async fn send(&mut self, stream_id: u16, data: &[u8]) -> Result<()> {
        self.send_with_ppid(stream_id, data, E2AP_PPID).await
    }

    /// Send data on a stream with a custom PPID
    pub async fn send_with_ppid(&mut self, stream_id: u16, data: &[u8], ppid: u32) -> Result<()> {
        if self.state != AssociationState::Established {
            return Err(SctpError::InvalidState(format!(
                "cannot send in state {}",
                self.state
            )));
        }

        let ppi = PayloadProtocolIdentifier::from(ppid);
        if !self.streams.contains(&stream_id) {
            self.association
                .open_stream(stream_id, ppi)
                .map_err(|e| SctpError::StreamError(e.to_string()))?;
            self.streams.insert(stream_id);
            debug!("Opened stream {}", stream_id);
        }
        self.association
            .stream(stream_id)
            .and_then(|mut stream| stream.write_with_ppi(data, ppi))
            .map_err(|e| SctpError::StreamError(e.to_string()))?;

        debug!(
            "Queued {} bytes on stream {} with PPID {}",
            data.len(),
            stream_id,
            ppid
        );

        self.poll_events();
        self.flush_transmits().await?;
        Ok(())
    }

    /// Drive the association without blocking and return the next event.
    ///
    /// Drains every datagram already queued on the socket, runs protocol
    /// timers, flushes acknowledgements, then returns buffered data or a
    /// notification. Returns `Ok(None)` when nothing is pending.
    pub async fn poll(&mut self) -> Result<Option<SctpEvent>> {
        if let Some(event) = self.pending_events.pop_front() {
            return Ok(Some(event));
        }
        if self.state == AssociationState::Closed {
            return Err(SctpError::AssociationClosed);
        }

        let mut buf = vec![0u8; self.config.max_receive_buffer_size as usize];
        loop {
            match self.socket.try_recv_from(&mut buf) {
                Ok((len, from)) => self.handle_datagram(from, buf[..len].to_vec()),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::ConnectionRefused => {
                    warn!("Peer {} unreachable", self.remote_addr);
                    self.pending_events.push_back(SctpEvent::Notification(
                        SctpNotification::PeerAddressUnreachable,
                    ));
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.poll_events();
        self.flush_transmits().await?;

        self.drain_streams();
        Ok(self.pending_events.pop_front())
    }

    /// Move every complete message buffered on any known stream into the
    /// event queue
    fn drain_streams(&mut self) {
        while let Some(stream) = self.association.accept_stream() {
            let stream_id = stream.stream_identifier();
            if self.streams.insert(stream_id) {
                debug!("Accepted stream {}", stream_id);
            }
        }

        for stream_id in self.streams.iter().copied() {
            let Ok(mut stream) = self.association.stream(stream_id) else {
                continue;
            };
            loop {
                let chunks = match stream.read() {
                    Ok(Some(chunks)) => chunks,
                    Ok(None) => break,
                    Err(e) => {
                        trace!("Stream {} not readable: {}", stream_id, e);
                        break;
                    }
                };
                if chunks.is_empty() {
                    continue;
                }
                let ppid = match chunks.ppi {
                    PayloadProtocolIdentifier::Dcep => 50,
                    PayloadProtocolIdentifier::String => 51,
                    PayloadProtocolIdentifier::Binary => 53,
                    PayloadProtocolIdentifier::StringEmpty => 56,
                    PayloadProtocolIdentifier::BinaryEmpty => 57,
                    PayloadProtocolIdentifier::Unknown => E2AP_PPID,
                };
                let mut buf = vec![0u8; chunks.len()];
                match chunks.read(&mut buf) {
                    Ok(len) => {
                        buf.truncate(len);
                        debug!(
                            "Received {} bytes on stream {} with PPID {}",
                            len, stream_id, ppid
                        );
                        self.pending_events
                            .push_back(SctpEvent::DataReceived(ReceivedMessage {
                                stream_id,
                                data: Bytes::from(buf),
                                ppid,
                            }));
                    }
                    Err(e) => warn!("Failed to read message on stream {}: {}", stream_id, e),
                }
            }
        }
    }

    /// Initiate graceful shutdown
    pub async fn shutdown(&mut self) -> Result<()> {
        if self.state == AssociationState::Closed {
            return Ok(());
        }

        info!("Initiating SCTP shutdown");
        self.state = AssociationState::ShuttingDown;

        let _ = self.association.shutdown();
        self.poll_events();
        self.flush_transmits().await?;

        let deadline = Instant::now() + Duration::from_secs(5);
        while self.state == AssociationState::ShuttingDown && Instant::now() < deadline {
            let _ = timeout(Duration::from_millis(100), self.handle_incoming()).await;
            self.poll_events();
            self.flush_transmits().await?;

            if self.association.is_closed() {
                break;
            }
        }

        self.state = AssociationState::Closed;
        self.pending_events.clear();
        info!("SCTP shutdown complete");
        Ok(())
    }

    /// Close the association immediately
    pub fn close(&mut self) {
        if self.state != AssociationState::Closed {
            let _ = self.association.close();
            self.state = AssociationState::Closed;
        }
    }

    /// Check if the association is established
    pub fn is_established(&self) -> bool {
        self.state == AssociationState::Established
    }

    /// Check if the association is closed
    pub fn is_closed(&self) -> bool {
        self.state == AssociationState::Closed
    }

    /// Get the current state
    pub fn state(&self) -> AssociationState {
        self.state
    }

    /// Get the remote address
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// Get the local address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Drop for SctpAssociation {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sctp_proto::ServerConfig;
    use tokio::sync::mpsc;

    /// Runs an sctp-proto server endpoint on loopback that echoes every
    /// message back on the stream it arrived on.
    async fn spawn_echo_peer() -> (SocketAddr, mpsc::UnboundedReceiver<(u16, Bytes)>) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut server_config = ServerConfig::new();
            server_config.transport = Arc::new(
                TransportConfig::default()
                    .with_max_num_inbound_streams(DEFAULT_NUM_STREAMS)
                    .with_max_num_outbound_streams(DEFAULT_NUM_STREAMS),
            );
            let mut endpoint = Endpoint::new(
                Arc::new(EndpointConfig::new()),
                Some(Arc::new(server_config)),
            );
            let mut peer: Option<(AssociationHandle, Association)> = None;
            let mut streams = BTreeSet::new();
            let mut buf = vec![0u8; DEFAULT_RECEIVE_BUFFER_SIZE as usize];

            loop {
                if let Ok(Ok((len, from))) =
                    timeout(Duration::from_millis(10), socket.recv_from(&mut buf)).await
                {
                    let data = Bytes::copy_from_slice(&buf[..len]);
                    match endpoint.handle(Instant::now(), from, None, None, data) {
                        Some((handle, DatagramEvent::NewAssociation(association))) => {
                            peer = Some((handle, association));
                        }
                        Some((handle, DatagramEvent::AssociationEvent(event))) => {
                            if let Some((known, association)) = peer.as_mut() {
                                if *known == handle {
                                    association.handle_event(event);
                                }
                            }
                        }
                        None => {}
                    }
                }

                let Some((_, association)) = peer.as_mut() else {
                    continue;
                };
                while association.poll().is_some() {}
                let now = Instant::now();
                if association.poll_timeout().is_some_and(|t| now >= t) {
                    association.handle_timeout(now);
                }

                while let Some(stream) = association.accept_stream() {
                    streams.insert(stream.stream_identifier());
                }
                for &id in &streams {
                    let mut stream = association.stream(id).unwrap();
                    while let Ok(Some(chunks)) = stream.read() {
                        let mut data = vec![0u8; chunks.len()];
                        chunks.read(&mut data).unwrap();
                        stream.write_with_ppi(&data, chunks.ppi).unwrap();
                        let _ = tx.send((id, Bytes::from(data)));
                    }
                }

                let mut transmits = Vec::new();
                while let Some(transmit) = association.poll_transmit(Instant::now()) {
                    transmits.push(transmit);
                }
                while let Some(transmit) = endpoint.poll_transmit() {
                    transmits.push(transmit);
                }
                for transmit in transmits {
                    if let Payload::RawEncode(chunks) = &transmit.payload {
                        for chunk in chunks {
                            let _ = socket.send_to(chunk, transmit.remote).await;
                        }
                    }
                }
            }
        });

        (addr, rx)
    }

    async fn next_message(assoc: &mut SctpAssociation) -> ReceivedMessage {
        timeout(Duration::from_secs(5), async {
            loop {
                match assoc.poll().await.unwrap() {
                    Some(SctpEvent::DataReceived(msg)) => return msg,
                    Some(SctpEvent::Notification(_)) | None => {
                        tokio::time::sleep(Duration::from_millis(5)).await;
                    }
                }
            }
        })
        .await
        .expect("echoed message")
    }

    #[tokio::test]
    async fn test_multiple_messages_each_way_on_one_stream() {
        let (peer_addr, mut peer_rx) = spawn_echo_peer().await;
        let mut assoc = SctpAssociation::connect(peer_addr, SctpConfig::default())
            .await
            .unwrap();
        assert!(assoc.is_established());

        assoc.send(0, b"setup-request").await.unwrap();
        assoc.send(0, b"subscription-response").await.unwrap();

        let first = next_message(&mut assoc).await;
        let second = next_message(&mut assoc).await;
        assert_eq!(first.stream_id, 0);
        assert_eq!(&first.data[..], b"setup-request");
        assert_eq!(second.stream_id, 0);
        assert_eq!(&second.data[..], b"subscription-response");

        let received = timeout(Duration::from_secs(1), async {
            vec![peer_rx.recv().await.unwrap(), peer_rx.recv().await.unwrap()]
        })
        .await
        .unwrap();
        assert_eq!(&received[0].1[..], b"setup-request");
        assert_eq!(&received[1].1[..], b"subscription-response");

        assoc.close();
    }

    #[test]
    fn test_default_config() {
        let config = SctpConfig::default();
        assert_eq!(config.max_outbound_streams, DEFAULT_NUM_STREAMS);
        assert_eq!(config.max_inbound_streams, DEFAULT_NUM_STREAMS);
        assert_eq!(config.max_message_size, DEFAULT_MAX_MESSAGE_SIZE);
        assert_eq!(config.rto_max_ms, 6000);
        assert_eq!(config.init_max_attempts, 3);
        assert_eq!(config.init_max_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_handshake_deadline() {
        let config = SctpConfig::default();
        assert_eq!(config.handshake_deadline(), Duration::from_secs(15));

        let config = SctpConfig {
            init_max_attempts: 0,
            ..SctpConfig::default()
        };
        assert_eq!(config.handshake_deadline(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_from_options() {
        let options = SctpOptions {
            num_streams: 4,
            rto_max_ms: 2000,
            ..SctpOptions::default()
        };
        let config = SctpConfig::from(&options);
        assert_eq!(config.max_outbound_streams, 4);
        assert_eq!(config.max_inbound_streams, 4);
        assert_eq!(config.rto_max_ms, 2000);
    }

    #[test]
    fn test_e2ap_ppid() {
        assert_eq!(E2AP_PPID, 70);
    }

    #[test]
    fn test_notification_display() {
        assert_eq!(SctpNotification::Shutdown.to_string(), "SHUTDOWN_EVENT");
        assert_eq!(
            SctpNotification::AssociationChange { up: false }.to_string(),
            "ASSOC_CHANGE (COMM_LOST)"
        );
        assert!(SctpNotification::RemoteError("abort".into())
            .to_string()
            .contains("abort"));
    }

    #[test]
    fn test_sctp_error_display() {
        let io_err = SctpError::Io(io::Error::new(io::ErrorKind::Other, "test"));
        assert!(io_err.to_string().contains("I/O error"));

        let conn_err = SctpError::ConnectionFailed("test".into());
        assert!(conn_err.to_string().contains("Connection failed"));

        assert!(SctpError::AssociationClosed.to_string().contains("closed"));
    }

    #[tokio::test]
    async fn test_connect_refused_fails_within_deadline() {
        // Bind then drop a socket to get a port nobody listens on.
        let port = {
            let probe = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
            probe.local_addr().unwrap().port()
        };
        let remote: SocketAddr = format!("127.0.0.1:{port}").parse().unwrap();
        let config = SctpConfig {
            init_max_attempts: 1,
            init_max_timeout: Duration::from_millis(300),
            ..SctpConfig::default()
        };

        let result = SctpAssociation::connect(remote, config).await;
        assert!(result.is_err());
    }
}
