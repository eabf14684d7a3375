//! SFTP client implementation
//!
//! Wraps ssh2 and implements the RemoteStore and Connector traits from
//! sl-core. Every call blocks until the server answers.

use std::fs::File;
use std::net::TcpStream;
use std::path::Path;

use ssh2::{ErrorCode, HashType, Session, Sftp};

use sl_core::{Connector, Credentials, Error, FileAttrs, RemotePath, RemoteStore, Result};

// SFTP status codes (draft-ietf-secsh-filexfer-02)
const SSH_FX_NO_SUCH_FILE: i32 = 2;
const SSH_FX_PERMISSION_DENIED: i32 = 3;
const SSH_FX_NO_SUCH_PATH: i32 = 10;

/// Mode requested for new directories; the server applies its umask
const DIR_MODE: i32 = 0o777;

/// Opens password-authenticated SFTP sessions
#[derive(Debug, Clone, Default)]
pub struct SftpConnector {
    timeout_ms: u32,
}

impl SftpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocking timeout for every session call (0 = none)
    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl Connector for SftpConnector {
    type Store = SftpClient;

    fn connect(&self, credentials: &Credentials) -> Result<SftpClient> {
        SftpClient::connect(credentials, self.timeout_ms)
    }
}

/// One authenticated SSH transport with its SFTP channel
pub struct SftpClient {
    sftp: Option<Sftp>,
    session: Session,
    address: String,
}

impl SftpClient {
    /// Establish transport, authenticate with a password and open SFTP
    pub fn connect(credentials: &Credentials, timeout_ms: u32) -> Result<Self> {
        let address = credentials.address();

        let tcp = TcpStream::connect(&address)
            .map_err(|e| Error::Connection(format!("TCP connect to {address} failed: {e}")))?;

        let mut session = Session::new()
            .map_err(|e| Error::Protocol(format!("Failed to create SSH session: {e}")))?;
        if timeout_ms > 0 {
            session.set_timeout(timeout_ms);
        }
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .map_err(|e| Error::Protocol(format!("SSH handshake with {address} failed: {e}")))?;

        if let Some(hash) = session.host_key_hash(HashType::Sha256) {
            tracing::debug!("Host key SHA256 for {address}: {}", hex(hash));
        }

        session
            .userauth_password(&credentials.username, &credentials.password)
            .map_err(|e| Error::Auth(format!("{}@{address}: {}", credentials.username, e.message())))?;
        if !session.authenticated() {
            return Err(Error::Auth(format!(
                "{}@{address}: authentication failed",
                credentials.username
            )));
        }

        let sftp = session
            .sftp()
            .map_err(|e| Error::Protocol(format!("Failed to open SFTP channel: {e}")))?;

        tracing::debug!("SFTP session established with {address}");
        Ok(Self {
            sftp: Some(sftp),
            session,
            address,
        })
    }

    fn sftp(&self) -> Result<&Sftp> {
        self.sftp
            .as_ref()
            .ok_or_else(|| Error::Protocol(format!("SFTP session to {} is closed", self.address)))
    }
}

impl RemoteStore for SftpClient {
    fn put(&self, local: &Path, remote: &RemotePath) -> Result<u64> {
        let sftp = self.sftp()?;

        let mut source = File::open(local)?;
        let expected = source.metadata()?.len();

        let mut target = sftp
            .create(Path::new(remote.as_str()))
            .map_err(|e| map_sftp_error(e, remote))?;
        let written = std::io::copy(&mut source, &mut target)
            .map_err(|e| Error::Protocol(format!("{remote}: {e}")))?;
        drop(target);

        // Confirm the transfer by comparing the remote size with the local one.
        let size = sftp
            .stat(Path::new(remote.as_str()))
            .map_err(|e| map_sftp_error(e, remote))?
            .size;
        if size != Some(expected) {
            return Err(Error::Protocol(format!(
                "size mismatch in put! {} != {expected}",
                size.map_or_else(|| "unknown".to_string(), |s| s.to_string())
            )));
        }

        Ok(written)
    }

    fn remove(&self, path: &RemotePath) -> Result<()> {
        self.sftp()?
            .unlink(Path::new(path.as_str()))
            .map_err(|e| map_sftp_error(e, path))
    }

    fn mkdir(&self, path: &RemotePath) -> Result<()> {
        self.sftp()?
            .mkdir(Path::new(path.as_str()), DIR_MODE)
            .map_err(|e| map_sftp_error(e, path))
    }

    fn rmdir(&self, path: &RemotePath) -> Result<()> {
        self.sftp()?
            .rmdir(Path::new(path.as_str()))
            .map_err(|e| map_sftp_error(e, path))
    }

    fn stat(&self, path: &RemotePath) -> Result<FileAttrs> {
        let stat = self
            .sftp()?
            .stat(Path::new(path.as_str()))
            .map_err(|e| map_sftp_error(e, path))?;

        Ok(FileAttrs {
            size: stat.size,
            mtime: stat.mtime,
            is_dir: stat.is_dir(),
        })
    }

    fn list_dir(&self, path: &RemotePath) -> Result<Vec<String>> {
        let entries = self
            .sftp()?
            .readdir(Path::new(path.as_str()))
            .map_err(|e| map_sftp_error(e, path))?;

        Ok(entries
            .into_iter()
            .filter_map(|(entry, _)| {
                entry
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
            })
            .filter(|name| name != "." && name != "..")
            .collect())
    }

    fn close(&mut self) -> Result<()> {
        if self.sftp.take().is_none() {
            return Ok(());
        }
        self.session
            .disconnect(None, "closing session", None)
            .map_err(|e| Error::Protocol(format!("Failed to disconnect from {}: {e}", self.address)))
    }
}

/// Map ssh2 errors on SFTP requests to the core taxonomy
fn map_sftp_error(e: ssh2::Error, path: &RemotePath) -> Error {
    match e.code() {
        ErrorCode::SFTP(SSH_FX_NO_SUCH_FILE) | ErrorCode::SFTP(SSH_FX_NO_SUCH_PATH) => {
            Error::NotFound(path.to_string())
        }
        ErrorCode::SFTP(SSH_FX_PERMISSION_DENIED) => {
            Error::Protocol(format!("{path}: permission denied"))
        }
        _ => Error::Protocol(format!("{path}: {}", e.message())),
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
