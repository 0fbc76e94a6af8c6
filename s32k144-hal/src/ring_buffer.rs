//! Fixed-capacity byte FIFO
//!
//! A bounded circular queue over a caller-supplied backing slice, used by
//! interrupt-driven serial IO to hand received bytes from an interrupt
//! handler to application code. The queue never allocates and never owns its
//! storage; the borrow keeps the backing memory alive for as long as the
//! queue exists.
//!
//! Full and empty are tracked with a running element count rather than by
//! comparing the two indices, so a full queue and an empty queue are never
//! ambiguous. A push onto a full queue and a pop from an empty queue are
//! rejected without touching any state.
//!
//! The queue itself provides no atomicity. When one end lives in an
//! interrupt handler, wrap both ends in `critical_section::with`.
//!
//! ```
//! use s32k144_hal::ring_buffer::RingBuffer;
//!
//! let mut storage = [0u8; 16];
//! let mut queue = RingBuffer::from_slice(&mut storage);
//!
//! queue.push(0x2A).unwrap();
//! assert_eq!(queue.pop(), Ok(0x2A));
//! assert!(queue.is_empty());
//! ```

/// Error type for queue operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The queue holds `capacity` elements; the pushed byte was discarded.
    Full,
    /// The queue holds no elements; nothing was popped.
    Empty,
    /// A queue cannot be created with a capacity of zero.
    ZeroCapacity,
    /// The backing slice is shorter than the requested capacity.
    StorageTooSmall,
}

/// A bounded FIFO of bytes over borrowed storage.
///
/// Elements occupy `front, front + 1, .., front + len - 1` (modulo the
/// capacity) within the backing slice. `new` performs no clearing of the
/// slice; a slot is never read before a push has written it.
pub struct RingBuffer<'a> {
    storage: &'a mut [u8],
    capacity: usize,
    front: usize,
    tail: usize,
    size: usize,
}

impl<'a> RingBuffer<'a> {
    /// Binds a queue to `storage` with the given capacity.
    ///
    /// `capacity` must be non-zero and no larger than `storage.len()`;
    /// anything else is a caller error and is reported rather than silently
    /// truncated.
    pub fn new(storage: &'a mut [u8], capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if storage.len() < capacity {
            return Err(Error::StorageTooSmall);
        }
        Ok(Self {
            storage,
            capacity,
            front: 0,
            tail: 0,
            size: 0,
        })
    }

    /// Binds a queue to `storage`, using the whole slice as capacity.
    ///
    /// An empty slice yields a queue on which every push fails with
    /// `Error::Full` and every pop with `Error::Empty`. Prefer
    /// [`RingBuffer::new`] when the capacity is caller-provided.
    pub fn from_slice(storage: &'a mut [u8]) -> Self {
        let capacity = storage.len();
        Self {
            storage,
            capacity,
            front: 0,
            tail: 0,
            size: 0,
        }
    }

    /// Appends a byte at the tail of the queue.
    ///
    /// On a full queue the byte is discarded and `Error::Full` returned;
    /// the queue state is left untouched (drop-newest policy - the oldest
    /// buffered bytes are never overwritten).
    pub fn push(&mut self, value: u8) -> Result<(), Error> {
        if self.is_full() {
            return Err(Error::Full);
        }
        self.storage[self.tail] = value;
        self.tail = (self.tail + 1) % self.capacity;
        self.size += 1;
        Ok(())
    }

    /// Removes and returns the byte at the front of the queue.
    ///
    /// Returns `Error::Empty` on an empty queue, leaving the state
    /// untouched. Zero is a valid payload byte and is only ever returned
    /// for a byte that was actually pushed.
    pub fn pop(&mut self) -> Result<u8, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let value = self.storage[self.front];
        self.front = (self.front + 1) % self.capacity;
        self.size -= 1;
        Ok(value)
    }

    /// Number of bytes currently buffered.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Maximum number of bytes the queue can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` if no bytes are buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// `true` if a push would be rejected.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.size == self.capacity
    }

    /// Index of the next byte to be popped. Exposed for diagnostics.
    #[inline]
    pub fn front(&self) -> usize {
        self.front
    }

    /// Index of the next free slot. Exposed for diagnostics.
    #[inline]
    pub fn tail(&self) -> usize {
        self.tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_capacity() {
        let mut storage = [0u8; 4];
        assert!(matches!(
            RingBuffer::new(&mut storage, 0),
            Err(Error::ZeroCapacity)
        ));
    }

    #[test]
    fn rejects_undersized_storage() {
        let mut storage = [0u8; 4];
        assert!(matches!(
            RingBuffer::new(&mut storage, 5),
            Err(Error::StorageTooSmall)
        ));
    }

    #[test]
    fn capacity_may_be_smaller_than_storage() {
        let mut storage = [0u8; 8];
        let mut queue = RingBuffer::new(&mut storage, 3).unwrap();
        assert_eq!(queue.capacity(), 3);
        for v in 0..3 {
            queue.push(v).unwrap();
        }
        assert_eq!(queue.push(3), Err(Error::Full));
    }

    #[test]
    fn pop_on_fresh_queue_is_empty() {
        let mut storage = [0u8; 4];
        let mut queue = RingBuffer::from_slice(&mut storage);
        assert_eq!(queue.pop(), Err(Error::Empty));
    }

    #[test]
    fn single_byte_round_trip() {
        let mut storage = [0u8; 4];
        let mut queue = RingBuffer::from_slice(&mut storage);
        queue.push(0xA5).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Ok(0xA5));
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), Err(Error::Empty));
    }

    #[test]
    fn fifo_ordering() {
        let mut storage = [0u8; 8];
        let mut queue = RingBuffer::from_slice(&mut storage);
        for v in 10..18 {
            queue.push(v).unwrap();
        }
        for v in 10..18 {
            assert_eq!(queue.pop(), Ok(v));
        }
    }

    #[test]
    fn capacity_bound_holds() {
        let mut storage = [0u8; 4];
        let mut queue = RingBuffer::from_slice(&mut storage);
        for v in 0..4 {
            queue.push(v).unwrap();
        }
        assert!(queue.is_full());
        assert_eq!(queue.push(99), Err(Error::Full));
        assert_eq!(queue.len(), 4);
        // The rejected byte must not have clobbered anything.
        for v in 0..4 {
            assert_eq!(queue.pop(), Ok(v));
        }
    }

    #[test]
    fn rejected_operations_leave_state_untouched() {
        let mut storage = [0u8; 2];
        let mut queue = RingBuffer::from_slice(&mut storage);

        let (front, tail, len) = (queue.front(), queue.tail(), queue.len());
        assert_eq!(queue.pop(), Err(Error::Empty));
        assert_eq!((queue.front(), queue.tail(), queue.len()), (front, tail, len));

        queue.push(1).unwrap();
        queue.push(2).unwrap();
        let (front, tail, len) = (queue.front(), queue.tail(), queue.len());
        assert_eq!(queue.push(3), Err(Error::Full));
        assert_eq!((queue.front(), queue.tail(), queue.len()), (front, tail, len));
    }

    #[test]
    fn wrap_around_preserves_ordering() {
        let mut storage = [0u8; 4];
        let mut queue = RingBuffer::from_slice(&mut storage);

        for v in [b'A', b'B', b'C', b'D'] {
            queue.push(v).unwrap();
        }
        assert_eq!(queue.pop(), Ok(b'A'));
        queue.push(b'E').unwrap(); // tail wraps to slot 0
        for v in [b'B', b'C', b'D', b'E'] {
            assert_eq!(queue.pop(), Ok(v));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn sustained_churn_past_capacity() {
        let mut storage = [0u8; 3];
        let mut queue = RingBuffer::from_slice(&mut storage);

        // Push/pop far more elements than the capacity, forcing both
        // indices to cycle through the storage repeatedly.
        for v in 0..=255u8 {
            queue.push(v).unwrap();
            assert_eq!(queue.pop(), Ok(v));
        }
        assert_eq!(queue.front(), queue.tail());
    }

    #[test]
    fn interleaved_scenario() {
        let mut storage = [0u8; 3];
        let mut queue = RingBuffer::from_slice(&mut storage);

        assert_eq!(queue.push(1), Ok(()));
        assert_eq!(queue.push(2), Ok(()));
        assert_eq!(queue.push(3), Ok(()));
        assert_eq!(queue.push(4), Err(Error::Full));
        assert_eq!(queue.pop(), Ok(1));
        assert_eq!(queue.push(4), Ok(()));
        assert_eq!(queue.pop(), Ok(2));
        assert_eq!(queue.pop(), Ok(3));
        assert_eq!(queue.pop(), Ok(4));
        assert_eq!(queue.pop(), Err(Error::Empty));
    }

    #[test]
    fn zero_is_a_valid_payload() {
        let mut storage = [0xFFu8; 2];
        let mut queue = RingBuffer::from_slice(&mut storage);
        queue.push(0).unwrap();
        assert_eq!(queue.pop(), Ok(0));
        assert_eq!(queue.pop(), Err(Error::Empty));
    }
}
