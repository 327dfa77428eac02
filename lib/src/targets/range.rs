//! Provides the inclusive IPv4 address range used as sweep input

use std::{fmt::Display, net::Ipv4Addr};

use crate::error::{Result, SweepLibError};

/// Converts an address to its unsigned integer form
///
/// Octet `i` (most significant first) contributes `o_i << (24 - 8*i)`.
pub fn ip_to_int(ip: Ipv4Addr) -> u32 {
    ip.octets()
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, octet)| {
            acc | (u32::from(*octet) << (24 - 8 * i))
        })
}

/// Converts an unsigned integer back to its dotted-quad address
pub fn int_to_ip(value: u32) -> Ipv4Addr {
    Ipv4Addr::new(
        ((value >> 24) & 0xFF) as u8,
        ((value >> 16) & 0xFF) as u8,
        ((value >> 8) & 0xFF) as u8,
        (value & 0xFF) as u8,
    )
}

/// Parses a dotted-quad address string
///
/// Accepts exactly four dot-separated octets of one to three ASCII digits
/// each, with values 0-255. Leading zeros are tolerated on input and
/// canonicalized away when the parsed address is displayed.
///
/// # Errors
///
/// Returns [`SweepLibError::InvalidAddress`] for anything else
pub fn parse_dotted_quad(addr: &str) -> Result<Ipv4Addr> {
    let invalid = || SweepLibError::InvalidAddress {
        addr: addr.to_string(),
    };

    let mut octets = [0u8; 4];
    let mut parts = addr.split('.');

    for slot in octets.iter_mut() {
        let part = parts.next().ok_or_else(invalid)?;

        if part.is_empty()
            || part.len() > 3
            || !part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let value: u16 = part.parse().map_err(|_| invalid())?;
        *slot = u8::try_from(value).map_err(|_| invalid())?;
    }

    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(Ipv4Addr::from(octets))
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents an inclusive range of IPv4 addresses
///
/// Only the two endpoints are stored. The addresses in between are produced
/// lazily by [`AddressRange::iter`], so a range spanning the entire 32-bit
/// address space costs no more memory than a /30.
///
/// # Examples
///
/// ```
/// # use sweeplib::targets::range::AddressRange;
/// let range = AddressRange::new("192.168.1.1", "192.168.1.254").unwrap();
/// assert_eq!(range.len(), 254);
/// for ip in range.iter() {
///     println!("ip: {}", ip);
/// }
/// ```
pub struct AddressRange {
    start: Ipv4Addr,
    end: Ipv4Addr,
}

impl AddressRange {
    /// Returns a new range parsed from two dotted-quad strings
    ///
    /// # Errors
    ///
    /// Returns [`SweepLibError::InvalidAddress`] if either string is not a
    /// valid dotted-quad, or [`SweepLibError::InvalidRange`] if start
    /// exceeds end
    pub fn new(start: &str, end: &str) -> Result<Self> {
        Self::from_addrs(parse_dotted_quad(start)?, parse_dotted_quad(end)?)
    }

    /// Returns a new range from two already-parsed addresses
    ///
    /// # Errors
    ///
    /// Returns [`SweepLibError::InvalidRange`] if start exceeds end
    pub fn from_addrs(start: Ipv4Addr, end: Ipv4Addr) -> Result<Self> {
        if ip_to_int(start) > ip_to_int(end) {
            return Err(SweepLibError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self { start, end })
    }

    /// Returns the first address of the range
    pub fn start(&self) -> Ipv4Addr {
        self.start
    }

    /// Returns the last address of the range
    pub fn end(&self) -> Ipv4Addr {
        self.end
    }

    /// Returns the number of addresses in the range, endpoints included
    ///
    /// The count is a u64 because the full 32-bit span holds one more
    /// address than u32 can represent
    pub fn len(&self) -> u64 {
        u64::from(ip_to_int(self.end)) - u64::from(ip_to_int(self.start)) + 1
    }

    /// Returns true if the range contains no addresses. A constructed range
    /// always contains at least its start address, so this is always false
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a fresh iterator over every address in the range, ascending,
    /// both endpoints included. The sequence is restartable: each call
    /// starts over from the range start
    pub fn iter(&self) -> AddressRangeIter {
        AddressRangeIter {
            next: Some(ip_to_int(self.start)),
            end: ip_to_int(self.end),
        }
    }

    /// Invokes the callback once per address in ascending order, stopping
    /// at the first callback error
    ///
    /// # Errors
    ///
    /// Returns the first error produced by the callback
    pub fn lazy_loop<F: FnMut(Ipv4Addr) -> Result<()>>(
        &self,
        mut cb: F,
    ) -> Result<()> {
        for ip in self.iter() {
            cb(ip)?;
        }
        Ok(())
    }
}

impl Display for AddressRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Lazy iterator over the addresses of an [`AddressRange`]
#[derive(Debug)]
pub struct AddressRangeIter {
    next: Option<u32>,
    end: u32,
}

impl Iterator for AddressRangeIter {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        // stop before incrementing past the end so the full 32-bit span
        // terminates without overflow
        self.next = if current == self.end {
            None
        } else {
            Some(current + 1)
        };
        Some(int_to_ip(current))
    }
}

#[cfg(test)]
#[path = "./range_tests.rs"]
mod tests;
