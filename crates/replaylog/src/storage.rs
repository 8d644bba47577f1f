// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage handle contract
//!
//! The log knows nothing about paths or files beyond this trait. It needs
//! sequential reads and writes, absolute seeks, a durability sync, and an
//! explicit close.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, Write};

/// Byte storage backing a log.
///
/// Implementations must not be written to by anything other than the owning
/// log. There is no cross-process coordination.
pub trait Storage: Read + Write + Seek {
    /// Commit written bytes to stable storage
    fn sync(&mut self) -> io::Result<()>;

    /// Release the handle, reporting any failure to do so
    fn close(self) -> io::Result<()>
    where
        Self: Sized;
}

impl Storage for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }

    fn close(self) -> io::Result<()> {
        // std surfaces no error from the close itself, so flush metadata
        // first to report what can still fail.
        self.sync_all()
    }
}

/// In-memory storage, mostly for tests and ephemeral logs
impl Storage for Cursor<Vec<u8>> {
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn close(self) -> io::Result<()> {
        Ok(())
    }
}
