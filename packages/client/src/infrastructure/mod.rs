pub mod transport;

pub use transport::TcpClientTransport;
