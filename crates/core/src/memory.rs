//! In-memory remote store
//!
//! Behaves like a small SFTP server: directories must exist before files are
//! put into them, `mkdir` refuses existing paths, `rmdir` refuses non-empty
//! directories. Used by tests of this crate's dependents.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::path::RemotePath;
use crate::traits::{Connector, FileAttrs, RemoteStore};

/// Modification time reported for every node
pub const MEMORY_MTIME: u64 = 1_700_000_000;

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
}

#[derive(Debug, Default)]
struct State {
    nodes: BTreeMap<String, Node>,
    connects: usize,
    closes: usize,
}

fn key(path: &RemotePath) -> String {
    if path.is_absolute() {
        path.as_str().to_string()
    } else if path.as_str() == "." {
        "/".to_string()
    } else {
        format!("/{path}")
    }
}

fn parent_key(key: &str) -> Option<String> {
    RemotePath::new(key).parent().map(|p| p.as_str().to_string())
}

/// Connector handing out stores that share one in-memory tree
#[derive(Debug, Clone)]
pub struct MemoryConnector {
    state: Rc<RefCell<State>>,
    password: Option<String>,
}

impl Default for MemoryConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConnector {
    /// An empty tree containing only `/`
    pub fn new() -> Self {
        let mut state = State::default();
        state.nodes.insert("/".to_string(), Node::Dir);
        Self {
            state: Rc::new(RefCell::new(state)),
            password: None,
        }
    }

    /// Reject logins whose password differs from `password`
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Add a directory, creating missing parents
    pub fn with_dir(self, path: &str) -> Self {
        self.insert_dirs(&key(&RemotePath::new(path)));
        self
    }

    /// Add a file, creating missing parents
    pub fn with_file(self, path: &str, content: &[u8]) -> Self {
        let key = key(&RemotePath::new(path));
        if let Some(parent) = parent_key(&key) {
            self.insert_dirs(&parent);
        }
        self.state
            .borrow_mut()
            .nodes
            .insert(key, Node::File(content.to_vec()));
        self
    }

    fn insert_dirs(&self, key: &str) {
        let mut current = Some(key.to_string());
        let mut state = self.state.borrow_mut();
        while let Some(k) = current {
            current = parent_key(&k);
            state.nodes.entry(k).or_insert(Node::Dir);
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.state
            .borrow()
            .nodes
            .contains_key(&key(&RemotePath::new(path)))
    }

    pub fn is_dir(&self, path: &str) -> bool {
        matches!(
            self.state.borrow().nodes.get(&key(&RemotePath::new(path))),
            Some(Node::Dir)
        )
    }

    /// Contents of a file, if present
    pub fn read(&self, path: &str) -> Option<Vec<u8>> {
        match self.state.borrow().nodes.get(&key(&RemotePath::new(path))) {
            Some(Node::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    /// Number of successful connects
    pub fn connects(&self) -> usize {
        self.state.borrow().connects
    }

    /// Number of closed stores
    pub fn closes(&self) -> usize {
        self.state.borrow().closes
    }
}

impl Connector for MemoryConnector {
    type Store = MemoryStore;

    fn connect(&self, credentials: &Credentials) -> Result<MemoryStore> {
        if let Some(expected) = &self.password {
            if &credentials.password != expected {
                return Err(Error::Auth(format!(
                    "password rejected for {}",
                    credentials.username
                )));
            }
        }
        self.state.borrow_mut().connects += 1;
        Ok(MemoryStore {
            state: Rc::clone(&self.state),
            closed: false,
        })
    }
}

/// One session against the in-memory tree
#[derive(Debug)]
pub struct MemoryStore {
    state: Rc<RefCell<State>>,
    closed: bool,
}

impl MemoryStore {
    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::Protocol("session closed".into()));
        }
        Ok(())
    }

    fn require_dir(&self, key: &str) -> Result<()> {
        match self.state.borrow().nodes.get(key) {
            Some(Node::Dir) => Ok(()),
            Some(Node::File(_)) => Err(Error::Protocol(format!("{key}: not a directory"))),
            None => Err(Error::NotFound(key.to_string())),
        }
    }
}

impl RemoteStore for MemoryStore {
    fn put(&self, local: &Path, remote: &RemotePath) -> Result<u64> {
        self.ensure_open()?;
        let content = std::fs::read(local)?;
        let key = key(remote);
        if let Some(parent) = parent_key(&key) {
            self.require_dir(&parent)?;
        }
        let mut state = self.state.borrow_mut();
        if let Some(Node::Dir) = state.nodes.get(&key) {
            return Err(Error::Protocol(format!("{key}: is a directory")));
        }
        let len = content.len() as u64;
        state.nodes.insert(key, Node::File(content));
        Ok(len)
    }

    fn remove(&self, path: &RemotePath) -> Result<()> {
        self.ensure_open()?;
        let key = key(path);
        let mut state = self.state.borrow_mut();
        match state.nodes.get(&key) {
            Some(Node::File(_)) => {}
            Some(Node::Dir) => return Err(Error::Protocol(format!("{key}: Failure"))),
            None => return Err(Error::NotFound(key)),
        }
        state.nodes.remove(&key);
        Ok(())
    }

    fn mkdir(&self, path: &RemotePath) -> Result<()> {
        self.ensure_open()?;
        let key = key(path);
        if self.state.borrow().nodes.contains_key(&key) {
            return Err(Error::Protocol(format!("{key}: Failure")));
        }
        if let Some(parent) = parent_key(&key) {
            self.require_dir(&parent)?;
        }
        self.state.borrow_mut().nodes.insert(key, Node::Dir);
        Ok(())
    }

    fn rmdir(&self, path: &RemotePath) -> Result<()> {
        self.ensure_open()?;
        let key = key(path);
        self.require_dir(&key)?;
        if !self.list_dir(path)?.is_empty() {
            return Err(Error::Protocol(format!("{key}: Failure")));
        }
        self.state.borrow_mut().nodes.remove(&key);
        Ok(())
    }

    fn stat(&self, path: &RemotePath) -> Result<FileAttrs> {
        self.ensure_open()?;
        let key = key(path);
        match self.state.borrow().nodes.get(&key) {
            Some(Node::File(content)) => Ok(FileAttrs::file(content.len() as u64, MEMORY_MTIME)),
            Some(Node::Dir) => Ok(FileAttrs::dir(MEMORY_MTIME)),
            None => Err(Error::NotFound(key)),
        }
    }

    fn list_dir(&self, path: &RemotePath) -> Result<Vec<String>> {
        self.ensure_open()?;
        let key = key(path);
        self.require_dir(&key)?;
        let state = self.state.borrow();
        let names = state
            .nodes
            .keys()
            .filter(|k| k.as_str() != key && parent_key(k).as_deref() == Some(key.as_str()))
            .filter_map(|k| RemotePath::new(k).file_name().map(str::to_string))
            .collect();
        Ok(names)
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.state.borrow_mut().closes += 1;
        }
        Ok(())
    }
}
