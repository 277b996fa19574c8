//! Fixed binary records of the UDP tracker protocol ([BEP-15]).
//!
//! Every integer is big-endian on the wire.
//!
//! | Record | Layout |
//! |--------|--------|
//! | connect request (16) | `connection_id: u64 = 0x41727101980`, `action: u32 = 0`, `transaction_id: u32` |
//! | connect response (>= 16) | `action: u32`, `transaction_id: u32`, `connection_id: u64` |
//! | scrape request (36) | `connection_id: u64`, `action: u32 = 2`, `transaction_id: u32`, `info_hash: [u8; 20]` |
//! | scrape response (>= 20) | `action: u32`, `transaction_id: u32`, `seeders: u32`, `completed: u32`, `leechers: u32` |
//! | error response (>= 8) | `action: u32 = 3`, `transaction_id: u32`, message bytes |
//!
//! [BEP-15]: http://bittorrent.org/beps/bep_0015.html

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::constants::{UDP_ACTION_CONNECT, UDP_ACTION_SCRAPE, UDP_PROTOCOL_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectRequest {
    pub transaction_id: u32,
}

impl ConnectRequest {
    pub const LEN: usize = 16;

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        buf.put_u64(UDP_PROTOCOL_ID);
        buf.put_u32(UDP_ACTION_CONNECT);
        buf.put_u32(self.transaction_id);
        buf.freeze()
    }

    /// Parses a request as a tracker would receive it.
    pub fn decode(mut data: &[u8]) -> Option<Self> {
        if data.len() < Self::LEN {
            return None;
        }
        if data.get_u64() != UDP_PROTOCOL_ID || data.get_u32() != UDP_ACTION_CONNECT {
            return None;
        }
        Some(Self {
            transaction_id: data.get_u32(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectResponse {
    pub action: u32,
    pub transaction_id: u32,
    pub connection_id: u64,
}

impl ConnectResponse {
    pub const MIN_LEN: usize = 16;

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::MIN_LEN);
        buf.put_u32(self.action);
        buf.put_u32(self.transaction_id);
        buf.put_u64(self.connection_id);
        buf.freeze()
    }

    /// Returns `None` if fewer than 16 bytes are present; extra bytes are
    /// ignored.
    pub fn decode(mut data: &[u8]) -> Option<Self> {
        if data.len() < Self::MIN_LEN {
            return None;
        }
        Some(Self {
            action: data.get_u32(),
            transaction_id: data.get_u32(),
            connection_id: data.get_u64(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub connection_id: u64,
    pub transaction_id: u32,
    pub info_hash: [u8; 20],
}

impl ScrapeRequest {
    pub const LEN: usize = 36;

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::LEN);
        buf.put_u64(self.connection_id);
        buf.put_u32(UDP_ACTION_SCRAPE);
        buf.put_u32(self.transaction_id);
        buf.put_slice(&self.info_hash);
        buf.freeze()
    }

    pub fn decode(mut data: &[u8]) -> Option<Self> {
        if data.len() < Self::LEN {
            return None;
        }
        let connection_id = data.get_u64();
        if data.get_u32() != UDP_ACTION_SCRAPE {
            return None;
        }
        let transaction_id = data.get_u32();
        let mut info_hash = [0u8; 20];
        data.copy_to_slice(&mut info_hash);
        Some(Self {
            connection_id,
            transaction_id,
            info_hash,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeResponse {
    pub action: u32,
    pub transaction_id: u32,
    pub seeders: u32,
    pub completed: u32,
    pub leechers: u32,
}

impl ScrapeResponse {
    pub const MIN_LEN: usize = 20;

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::MIN_LEN);
        buf.put_u32(self.action);
        buf.put_u32(self.transaction_id);
        buf.put_u32(self.seeders);
        buf.put_u32(self.completed);
        buf.put_u32(self.leechers);
        buf.freeze()
    }

    /// Reads the first info hash's counts; later entries are ignored.
    pub fn decode(mut data: &[u8]) -> Option<Self> {
        if data.len() < Self::MIN_LEN {
            return None;
        }
        Some(Self {
            action: data.get_u32(),
            transaction_id: data.get_u32(),
            seeders: data.get_u32(),
            completed: data.get_u32(),
            leechers: data.get_u32(),
        })
    }
}

/// Leading `action` and `transaction_id` shared by every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub action: u32,
    pub transaction_id: u32,
}

impl ResponseHeader {
    pub const LEN: usize = 8;

    pub fn decode(mut data: &[u8]) -> Option<Self> {
        if data.len() < Self::LEN {
            return None;
        }
        Some(Self {
            action: data.get_u32(),
            transaction_id: data.get_u32(),
        })
    }
}

/// Message text carried after the header of an error response.
pub fn error_message(data: &[u8]) -> String {
    data.get(ResponseHeader::LEN..)
        .map(|msg| String::from_utf8_lossy(msg).into_owned())
        .unwrap_or_default()
}
