//! Payload Hand-off Buffer
//!
//! Holds one pending message between the producer (a scheduled task in the
//! main context) and the consumer (the keying interrupt).
//!
//! A new message is only admitted once the previous one has been drained
//! completely, so the interrupt can never observe a message being
//! overwritten underneath it. Writes happen inside a critical section;
//! reads happen from the interrupt, which the critical section masks out.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;

use crate::config::MAX_PAYLOAD_SIZE;
use crate::types::{TxError, TxResult};

/// Single-message buffer with a read cursor
///
/// Invariant: `read_pos <= bytes.len() <= N`.
#[derive(Clone, Debug, Default)]
pub struct PayloadBuffer<const N: usize = MAX_PAYLOAD_SIZE> {
    bytes: Vec<u8, N>,
    read_pos: usize,
}

impl<const N: usize> PayloadBuffer<N> {
    /// Create an empty (drained) buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            read_pos: 0,
        }
    }

    /// Load a new message, truncated to capacity
    ///
    /// Returns the number of bytes stored, or [`TxError::Busy`] without
    /// touching the buffer if the previous message is still being read.
    pub fn load(&mut self, data: &[u8]) -> TxResult<usize> {
        if !self.is_drained() {
            return Err(TxError::Busy);
        }

        let len = data.len().min(N);
        self.bytes.clear();
        self.read_pos = 0;
        // Cannot fail: len is bounded by capacity
        let _ = self.bytes.extend_from_slice(&data[..len]);
        Ok(len)
    }

    /// Take the next unread byte
    pub fn next_byte(&mut self) -> TxResult<u8> {
        let byte = *self.bytes.get(self.read_pos).ok_or(TxError::Finished)?;
        self.read_pos += 1;
        Ok(byte)
    }

    /// Check if every stored byte has been read
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.read_pos == self.bytes.len()
    }

    /// Length of the current message
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if no message is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes not yet read
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.read_pos
    }

    /// Maximum message length
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }
}

/// Payload buffer shared between the main context and the keying interrupt
///
/// Construct once at startup and hand out `&'static` references.
pub struct SharedPayload<const N: usize = MAX_PAYLOAD_SIZE> {
    inner: Mutex<RefCell<PayloadBuffer<N>>>,
}

impl<const N: usize> SharedPayload<N> {
    /// Create an empty shared buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(PayloadBuffer::new())),
        }
    }

    /// Hand a new message to the interrupt
    ///
    /// The whole admission check and copy run with interrupts masked; the
    /// mask is released on return, including the early [`TxError::Busy`]
    /// return.
    pub fn set_payload(&self, data: &[u8]) -> TxResult<usize> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).load(data))
    }

    /// Take the next byte (keying interrupt side)
    pub fn get_byte(&self) -> TxResult<u8> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).next_byte())
    }

    /// Check if the current message has been fully transmitted
    #[must_use]
    pub fn is_drained(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_drained())
    }

    /// Bytes still waiting to be transmitted
    #[must_use]
    pub fn remaining(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).remaining())
    }

    /// Length of the current message
    #[must_use]
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).len())
    }

    /// Check if no message has been stored yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_empty())
    }

    /// Maximum message length
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for SharedPayload<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of bytes for the bit framer
pub trait ByteSource {
    /// Pull the next byte, or [`TxError::Finished`] when drained
    fn pull(&mut self) -> TxResult<u8>;
}

impl<const N: usize> ByteSource for PayloadBuffer<N> {
    fn pull(&mut self) -> TxResult<u8> {
        self.next_byte()
    }
}

impl<const N: usize> ByteSource for &SharedPayload<N> {
    fn pull(&mut self) -> TxResult<u8> {
        self.get_byte()
    }
}
