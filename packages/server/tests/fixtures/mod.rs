//! Test fixtures shared by the server integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use parlor_server::{Server, ServerConfig, ServerError};
use parlor_shared::{Frame, FrameCodec, MemoryDisplay};
use tokio::{
    io::{AsyncWriteExt, BufReader, DuplexStream},
    net::TcpStream,
    task::JoinHandle,
    time::timeout,
};
use tokio_util::codec::Framed;

const WAIT: Duration = Duration::from_secs(5);

/// In-process server whose console is fed through an in-memory pipe
pub struct TestServer {
    pub addr: SocketAddr,
    pub display: Arc<MemoryDisplay>,
    console: DuplexStream,
    handle: Option<JoinHandle<Result<(), ServerError>>>,
}

impl TestServer {
    pub async fn start(port: u16) -> Self {
        let display = Arc::new(MemoryDisplay::new());
        let server = Server::new(ServerConfig { port }, display.clone());
        server.start().await.expect("Failed to start server");
        let addr = server.local_addr().expect("Server is not listening");

        let (console, console_input) = tokio::io::duplex(4096);
        let handle = tokio::spawn(server.run(BufReader::new(console_input)));

        let test_server = Self {
            addr,
            display,
            console,
            handle: Some(handle),
        };
        test_server
            .wait_for_display(&format!("Server listening for connections on port {port}"))
            .await;
        test_server
    }

    /// Type a line on the operator console.
    pub async fn console(&mut self, line: &str) {
        self.console
            .write_all(format!("{line}\n").as_bytes())
            .await
            .expect("Failed to write to console");
    }

    pub async fn connect(&self) -> TestClient {
        self.connect_to(self.addr.port()).await
    }

    pub async fn connect_to(&self, port: u16) -> TestClient {
        let socket = TcpStream::connect(("127.0.0.1", port))
            .await
            .expect("Failed to connect");
        TestClient {
            framed: Framed::new(socket, FrameCodec::new()),
        }
    }

    /// Wait until `line` shows up on the operator console.
    pub async fn wait_for_display(&self, line: &str) {
        let display = self.display.clone();
        let found = timeout(WAIT, async {
            while !display.contains(line) {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await;
        assert!(
            found.is_ok(),
            "'{}' was never displayed; got {:?}",
            line,
            self.display.lines()
        );
    }

    /// Wait for the run loop to return.
    pub async fn wait_for_exit(mut self) -> Result<(), ServerError> {
        let handle = self.handle.take().expect("Server already joined");
        timeout(WAIT, handle)
            .await
            .expect("Server did not exit")
            .expect("Server task panicked")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Raw protocol client
pub struct TestClient {
    framed: Framed<TcpStream, FrameCodec>,
}

impl TestClient {
    pub async fn send(&mut self, payload: &str) {
        self.framed
            .send(Frame::new(payload))
            .await
            .expect("Failed to send frame");
    }

    pub async fn login(&mut self, login: &str) {
        self.send(&format!("#login {login}")).await;
    }

    /// Next payload, or `None` once the server closed the connection.
    pub async fn recv(&mut self) -> Option<String> {
        match timeout(WAIT, self.framed.next()).await {
            Ok(Some(Ok(frame))) => Some(frame.payload),
            Ok(Some(Err(e))) => panic!("Failed to decode frame: {e}"),
            Ok(None) => None,
            Err(_) => panic!("Timed out waiting for a frame"),
        }
    }
}
