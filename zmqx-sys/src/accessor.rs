//! Typed option access over the transport's three wire shapes.
//!
//! - Integers go through a buffer sized exactly to the option's width.
//! - Strings and byte values are read into a caller buffer and written with
//!   an explicit length.
//! - Raw-parameter options pass a null data pointer and put the parameter in
//!   the size argument. APUB_APPROVE is the one hybrid: a NUL-terminated
//!   string pointer whose size argument carries a peer id.
//!
//! Category and direction are checked against the catalog before the
//! transport is called. A non-zero return code aborts the operation with the
//! translated native error; nothing is retried.

use crate::last_error;
use crate::raw::{PeerControl, RawSocket};
use bytes::Bytes;
use std::ffi::{c_char, c_int, c_void, CStr, CString};
use std::mem::size_of;
use std::ptr;
use tracing::trace;
use zmqx_core::catalog::{Catalog, IntWidth, OptionCategory, OptionDescriptor, OptionName, RawShape};
use zmqx_core::config::{BindingConfig, DEFAULT_STRING_CAPACITY};
use zmqx_core::error::{Result, ZmqxError};

mod sealed {
    pub trait Sealed {}
}

/// Native integer types an integer option can be read as.
pub trait IntValue: Copy + sealed::Sealed {
    /// Width in bytes.
    const SIZE: usize;

    #[doc(hidden)]
    fn read_ne(buf: &[u8; 8]) -> Self;

    #[doc(hidden)]
    fn write_ne(self, buf: &mut [u8; 8]);
}

macro_rules! int_value {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl IntValue for $ty {
                const SIZE: usize = size_of::<$ty>();

                fn read_ne(buf: &[u8; 8]) -> Self {
                    let mut bytes = [0u8; size_of::<$ty>()];
                    bytes.copy_from_slice(&buf[..Self::SIZE]);
                    <$ty>::from_ne_bytes(bytes)
                }

                fn write_ne(self, buf: &mut [u8; 8]) {
                    buf[..Self::SIZE].copy_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

int_value!(i32, u32, i64, u64);

/// Option accessor bound to one socket and one revision catalog.
pub struct OptionAccessor<'s, S: ?Sized> {
    socket: &'s mut S,
    catalog: Catalog,
    string_capacity: usize,
}

impl<'s, S: RawSocket + ?Sized> OptionAccessor<'s, S> {
    pub fn new(socket: &'s mut S, catalog: Catalog) -> Self {
        Self {
            socket,
            catalog,
            string_capacity: DEFAULT_STRING_CAPACITY,
        }
    }

    pub fn with_config(socket: &'s mut S, config: &BindingConfig) -> Self {
        Self {
            socket,
            catalog: config.catalog(),
            string_capacity: config.string_capacity,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve `name` and check that it has an accepted category and the
    /// requested direction.
    fn resolve(
        &self,
        name: OptionName,
        expected: &'static str,
        accepts: fn(OptionCategory) -> bool,
        get: bool,
    ) -> Result<OptionDescriptor> {
        let desc = self.catalog.lookup(name)?;
        if !accepts(desc.category) {
            return Err(ZmqxError::CategoryMismatch {
                option: name,
                expected,
                actual: desc.category,
            });
        }
        let allowed = if get {
            desc.access.can_get()
        } else {
            desc.access.can_set()
        };
        if !allowed {
            return Err(ZmqxError::AccessDenied {
                option: name,
                access: desc.access,
            });
        }
        Ok(desc)
    }

    fn check(&self, rc: c_int, desc: &OptionDescriptor) -> Result<()> {
        if rc == 0 {
            Ok(())
        } else {
            Err(last_error(&*self.socket, &desc.name))
        }
    }

    /// Read an integer option as `T`; the option's width must match `T`.
    pub fn get_int<T: IntValue>(&mut self, name: OptionName) -> Result<T> {
        let desc = self.resolve(name, width_name::<T>(), int_category::<T>, true)?;

        let mut buf = [0u8; 8];
        let mut size = T::SIZE;
        trace!("[OPT] get {} ({} bytes)", name, size);
        // SAFETY: buf holds 8 bytes and size never exceeds 8.
        let rc = unsafe {
            self.socket
                .get_option_raw(desc.code, buf.as_mut_ptr().cast::<c_void>(), &mut size)
        };
        self.check(rc, &desc)?;

        if size != T::SIZE {
            return Err(ZmqxError::SizeMismatch {
                option: name,
                expected: T::SIZE,
                actual: size,
            });
        }
        Ok(T::read_ne(&buf))
    }

    /// Write an integer option from `T`; the option's width must match `T`.
    pub fn set_int<T: IntValue>(&mut self, name: OptionName, value: T) -> Result<()> {
        let desc = self.resolve(name, width_name::<T>(), int_category::<T>, false)?;

        let mut buf = [0u8; 8];
        value.write_ne(&mut buf);
        trace!("[OPT] set {} ({} bytes)", name, T::SIZE);
        // SAFETY: buf holds at least T::SIZE initialized bytes.
        let rc = unsafe {
            self.socket
                .set_option_raw(desc.code, buf.as_ptr().cast::<c_void>(), T::SIZE)
        };
        self.check(rc, &desc)
    }

    /// Read an unsigned 32-bit option (e.g. LAST_PEER_UNIQ_ID).
    pub fn get_uint(&mut self, name: OptionName) -> Result<u32> {
        self.get_int::<u32>(name)
    }

    /// Read a 32-bit option as a flag.
    pub fn get_bool(&mut self, name: OptionName) -> Result<bool> {
        Ok(self.get_int::<i32>(name)? != 0)
    }

    /// Write a 32-bit option as a flag.
    pub fn set_bool(&mut self, name: OptionName, value: bool) -> Result<()> {
        self.set_int::<i32>(name, i32::from(value))
    }

    fn get_buffer(&mut self, name: OptionName, expected: &'static str) -> Result<Vec<u8>> {
        let desc = self.resolve(name, expected, is_text_or_bytes, true)?;

        let mut buf = vec![0u8; self.string_capacity];
        let mut size = buf.len();
        trace!("[OPT] get {} (capacity {})", name, size);
        // SAFETY: buf is valid for writes of `size` bytes.
        let rc = unsafe {
            self.socket
                .get_option_raw(desc.code, buf.as_mut_ptr().cast::<c_void>(), &mut size)
        };
        self.check(rc, &desc)?;

        if size > buf.len() {
            return Err(ZmqxError::SizeMismatch {
                option: name,
                expected: buf.len(),
                actual: size,
            });
        }
        buf.truncate(size);
        if desc.category == OptionCategory::String && buf.last() == Some(&0) {
            buf.pop();
        }
        Ok(buf)
    }

    /// Read a string or binary option as bytes.
    pub fn get_bytes(&mut self, name: OptionName) -> Result<Bytes> {
        Ok(Bytes::from(self.get_buffer(name, "string or bytes")?))
    }

    /// Read a string option. The terminating NUL, if any, is dropped.
    pub fn get_string(&mut self, name: OptionName) -> Result<String> {
        Ok(String::from_utf8(self.get_buffer(name, "string")?)?)
    }

    /// Write a string or binary option with its exact length.
    pub fn set_bytes(&mut self, name: OptionName, value: &[u8]) -> Result<()> {
        let desc = self.resolve(name, "string or bytes", is_text_or_bytes, false)?;

        trace!("[OPT] set {} ({} bytes)", name, value.len());
        // SAFETY: value is valid for reads of value.len() bytes.
        let rc = unsafe {
            self.socket
                .set_option_raw(desc.code, value.as_ptr().cast::<c_void>(), value.len())
        };
        self.check(rc, &desc)
    }

    /// Write a string option with its exact length; no terminator is sent.
    pub fn set_string(&mut self, name: OptionName, value: &str) -> Result<()> {
        self.set_bytes(name, value.as_bytes())
    }

    /// Valueless call: null data pointer, `param` in the size argument.
    pub fn set_raw_param(&mut self, name: OptionName, param: u32) -> Result<()> {
        let desc = self.resolve(name, "raw(size-only)", is_size_only, false)?;

        trace!("[OPT] set {} (param {})", name, param);
        // SAFETY: a null data pointer is the calling convention for this shape.
        let rc = unsafe { self.socket.set_option_raw(desc.code, ptr::null(), param as usize) };
        self.check(rc, &desc)
    }

    /// Hybrid call: NUL-terminated `value` as data, `size_override` (a peer
    /// id) in the size argument instead of the string length.
    pub fn set_string_with_size_override(
        &mut self,
        name: OptionName,
        value: &str,
        size_override: u32,
    ) -> Result<()> {
        let desc = self.resolve(name, "raw(cstr+size-override)", is_size_override, false)?;
        let value = CString::new(value)
            .map_err(|_| ZmqxError::invalid_value(format!("{name} value contains a NUL byte")))?;

        trace!("[OPT] set {} (size override {})", name, size_override);
        // SAFETY: value is a live NUL-terminated string for the whole call;
        // the transport reads it up to the terminator for this option.
        let rc = unsafe {
            self.socket.set_option_raw(
                desc.code,
                value.as_ptr().cast::<c_void>(),
                size_override as usize,
            )
        };
        // `value` is released here on both paths.
        self.check(rc, &desc)
    }
}

impl<'s, S: PeerControl + ?Sized> OptionAccessor<'s, S> {
    /// Address of the peer the last message came from.
    ///
    /// The transport allocates the string; it is copied and released before
    /// this returns, on every path.
    pub fn last_recv_peer_addr(&mut self) -> Result<String> {
        let mut raw: *mut c_char = ptr::null_mut();
        trace!("[OPT] last_recv_peer_addr");
        // SAFETY: `raw` is a valid pointer slot.
        let rc = unsafe { self.socket.last_recv_peer_addr_raw(&mut raw) };
        if rc != 0 {
            return Err(last_error(&*self.socket, &"last_recv_peer_addr"));
        }

        let guard = TransportString {
            socket: &mut *self.socket,
            ptr: raw,
        };
        let bytes = guard.to_vec();
        drop(guard);
        Ok(String::from_utf8(bytes)?)
    }

    /// Disconnect the peer the last message came from.
    pub fn disconnect_last_recv_peer(&mut self) -> Result<()> {
        trace!("[OPT] disconnect_last_recv_peer");
        if self.socket.disconnect_last_recv_peer_raw() != 0 {
            return Err(last_error(&*self.socket, &"disconnect_last_recv_peer"));
        }
        Ok(())
    }

    /// Block the address of the peer the last message came from.
    pub fn block_last_recv_peer(&mut self) -> Result<()> {
        trace!("[OPT] block_last_recv_peer");
        if self.socket.block_last_recv_peer_raw() != 0 {
            return Err(last_error(&*self.socket, &"block_last_recv_peer"));
        }
        Ok(())
    }
}

/// Releases a transport-allocated string when dropped.
struct TransportString<'a, S: PeerControl + ?Sized> {
    socket: &'a mut S,
    ptr: *mut c_char,
}

impl<S: PeerControl + ?Sized> TransportString<'_, S> {
    fn to_vec(&self) -> Vec<u8> {
        if self.ptr.is_null() {
            return Vec::new();
        }
        // SAFETY: non-null pointers from last_recv_peer_addr_raw are live
        // C strings until freed (PeerControl contract).
        unsafe { CStr::from_ptr(self.ptr) }.to_bytes().to_vec()
    }
}

impl<S: PeerControl + ?Sized> Drop for TransportString<'_, S> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            // SAFETY: the pointer came from this socket and is freed once.
            unsafe { self.socket.free_transport_string(self.ptr) };
        }
    }
}

fn width_name<T: IntValue>() -> &'static str {
    if T::SIZE == IntWidth::I64.size() {
        "integer(64-bit)"
    } else {
        "integer(32-bit)"
    }
}

fn int_category<T: IntValue>(category: OptionCategory) -> bool {
    matches!(category, OptionCategory::Integer(width) if width.size() == T::SIZE)
}

fn is_text_or_bytes(category: OptionCategory) -> bool {
    matches!(category, OptionCategory::String | OptionCategory::Bytes)
}

fn is_size_only(category: OptionCategory) -> bool {
    category == OptionCategory::Raw(RawShape::SizeOnly)
}

fn is_size_override(category: OptionCategory) -> bool {
    category == OptionCategory::Raw(RawShape::CStrSizeOverride)
}
