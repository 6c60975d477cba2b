//! Overflow-Safe Sized Allocation
//!
//! Wrapper around a pluggable backing allocator that computes
//! `items * item_size` with explicit overflow detection, enforces a
//! minimum nonzero request, and zero-fills by hand when the backing
//! allocator has no dedicated zeroing primitive.

use std::alloc::{self, Layout};
use std::ptr::NonNull;
use thiserror::Error;

/// Largest index the sparse engine can address. Requests whose clamped
/// operands or byte product exceed this are rejected before any
/// allocator call is made.
pub const MAX_INDEX: u64 = 1 << 60;

/// Errors from the allocation primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// Size computation overflowed, an operand exceeded [`MAX_INDEX`],
    /// or the backing allocator returned no memory.
    #[error("out of memory")]
    OutOfMemory,
}

/// Pluggable backing allocator for [`Block`].
///
/// Implementations hand out raw byte regions; [`Block`] layers the
/// overflow checking and zero-fill guarantee on top.
pub trait Allocator {
    /// Allocate `size` bytes with no fill guarantee. `size` is nonzero.
    fn allocate(&self, size: usize) -> Option<NonNull<u8>>;

    /// Allocate `size` bytes of zeroed memory. `size` is nonzero.
    fn allocate_zeroed(&self, size: usize) -> Option<NonNull<u8>>;

    /// Release a region previously returned by this allocator.
    fn deallocate(&self, ptr: NonNull<u8>, size: usize);

    /// Whether [`Allocator::allocate_zeroed`] is backed by a dedicated
    /// zeroing primitive. When `false`, [`Block::zeroed`] falls back to
    /// [`Allocator::allocate`] plus an explicit fill; the resulting
    /// block is indistinguishable either way.
    fn has_zeroed(&self) -> bool {
        true
    }
}

/// Default backing allocator over `std::alloc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAllocator;

impl SystemAllocator {
    fn layout(size: usize) -> Option<Layout> {
        Layout::from_size_align(size, 1).ok()
    }
}

impl Allocator for SystemAllocator {
    fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        let layout = Self::layout(size)?;
        // SAFETY: layout has nonzero size; callers of the trait
        // guarantee size >= 1.
        NonNull::new(unsafe { alloc::alloc(layout) })
    }

    fn allocate_zeroed(&self, size: usize) -> Option<NonNull<u8>> {
        let layout = Self::layout(size)?;
        // SAFETY: as above.
        NonNull::new(unsafe { alloc::alloc_zeroed(layout) })
    }

    fn deallocate(&self, ptr: NonNull<u8>, size: usize) {
        if let Some(layout) = Self::layout(size) {
            // SAFETY: ptr was returned by alloc/alloc_zeroed with the
            // same layout and has not been freed.
            unsafe { alloc::dealloc(ptr.as_ptr(), layout) }
        }
    }
}

/// Overflow-checked element count for a typed buffer.
///
/// Validates that `items * size_of::<T>()` neither overflows nor
/// exceeds [`MAX_INDEX`], with the same clamping rule as
/// [`Block::zeroed`], and returns the count usable as a `Vec` capacity.
/// Library code reserves large buffers through this instead of trusting
/// untrusted sizes read from input files.
pub fn checked_capacity<T>(items: u64) -> Result<usize, AllocError> {
    let item_size = (std::mem::size_of::<T>() as u64).max(1);
    let clamped = items.max(1);
    let size = clamped
        .checked_mul(item_size)
        .ok_or(AllocError::OutOfMemory)?;
    if clamped > MAX_INDEX || item_size > MAX_INDEX || size > MAX_INDEX {
        return Err(AllocError::OutOfMemory);
    }
    usize::try_from(items).map_err(|_| AllocError::OutOfMemory)
}

/// An owned, zero-filled byte block obtained through the overflow-safe
/// allocation path. Freed on drop on every exit path.
pub struct Block<'a, A: Allocator> {
    ptr: NonNull<u8>,
    len: usize,
    allocator: &'a A,
}

impl<'a, A: Allocator> Block<'a, A> {
    /// Allocate a zero-filled block of `items * item_size` bytes.
    ///
    /// Both operands are clamped to a minimum of 1 first, so at least
    /// one byte is always requested. Returns
    /// [`AllocError::OutOfMemory`] if the product overflows, either
    /// clamped operand exceeds [`MAX_INDEX`], or the backing allocator
    /// yields no memory. On the overflow paths the allocator is never
    /// called.
    pub fn zeroed(items: u64, item_size: u64, allocator: &'a A) -> Result<Self, AllocError> {
        // make sure at least one item of at least one byte is requested
        let items = items.max(1);
        let item_size = item_size.max(1);

        let size = items
            .checked_mul(item_size)
            .ok_or(AllocError::OutOfMemory)?;
        if items > MAX_INDEX || item_size > MAX_INDEX || size > MAX_INDEX {
            return Err(AllocError::OutOfMemory);
        }
        let size = usize::try_from(size).map_err(|_| AllocError::OutOfMemory)?;

        let ptr = if allocator.has_zeroed() {
            allocator.allocate_zeroed(size)
        } else {
            // zeroing allocator unavailable: allocate raw and fill
            allocator.allocate(size).map(|ptr| {
                // SAFETY: ptr points to `size` freshly allocated bytes.
                unsafe { ptr.as_ptr().write_bytes(0, size) };
                ptr
            })
        };

        let ptr = ptr.ok_or(AllocError::OutOfMemory)?;
        Ok(Self {
            ptr,
            len: size,
            allocator,
        })
    }

    /// Exact byte length of the block.
    pub fn len(&self) -> usize {
        self.len
    }

    /// A block is never empty: the clamp guarantees at least one byte.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// View the block's bytes.
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr covers exactly `len` initialized (zeroed) bytes.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Mutable view of the block's bytes.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above; &mut self guarantees exclusivity.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<A: Allocator> Drop for Block<'_, A> {
    fn drop(&mut self) {
        self.allocator.deallocate(self.ptr, self.len);
    }
}

impl<A: Allocator> std::fmt::Debug for Block<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block").field("len", &self.len).finish()
    }
}
