//! Network membership classification.
//!
//! - [`AddressSpace`]: The trusted internal range, fixed for the process lifetime
//! - [`NetworkMembership`]: Classifies an endpoint address as inside or outside it

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{FlowguardError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// ADDRESS SPACE
// ═══════════════════════════════════════════════════════════════════════════════

/// A contiguous CIDR range treated as the internal network.
///
/// Host bits are truncated on construction, so `10.1.2.3/8` and `10.0.0.0/8`
/// describe the same space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressSpace {
    net: IpNet,
}

impl AddressSpace {
    /// Creates an address space from an already parsed network.
    pub fn new(net: IpNet) -> Self {
        Self { net: net.trunc() }
    }

    /// Returns the underlying network.
    pub fn net(&self) -> IpNet {
        self.net
    }

    /// Returns true if `ip` falls inside this space.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.net.contains(ip)
    }
}

impl FromStr for AddressSpace {
    type Err = FlowguardError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<IpNet>()
            .map(Self::new)
            .map_err(|_| FlowguardError::InvalidAddressSpace(s.to_string()))
    }
}

impl fmt::Display for AddressSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.net, f)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MEMBERSHIP
// ═══════════════════════════════════════════════════════════════════════════════

/// Classifies endpoint addresses against a configured [`AddressSpace`].
///
/// Classification is pure and holds no locks, so one instance can be shared
/// by any number of concurrent checks.
#[derive(Clone, Debug)]
pub struct NetworkMembership {
    space: AddressSpace,
}

impl NetworkMembership {
    /// Creates a classifier for the given address space.
    pub fn new(space: AddressSpace) -> Self {
        Self { space }
    }

    /// Returns the configured address space.
    pub fn address_space(&self) -> AddressSpace {
        self.space
    }

    /// Returns true if `address` parses as an IP inside the address space.
    ///
    /// An address that fails to parse is not a member. IPv4-mapped IPv6
    /// addresses are compared as their IPv4 form.
    pub fn is_member(&self, address: &str) -> bool {
        let ip = match address.parse::<IpAddr>() {
            Ok(ip) => ip.to_canonical(),
            Err(_) => {
                warn!(address, "Could not parse address");
                return false;
            }
        };

        self.space.contains(&ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::net::Ipv4Addr;
    use test_case::test_case;

    fn private_ten() -> NetworkMembership {
        NetworkMembership::new("10.0.0.0/8".parse().unwrap())
    }

    #[test_case("127.0.0.1", false ; "loopback")]
    #[test_case("10.0.0.5", true ; "inside")]
    #[test_case("10.255.255.255", true ; "upper edge")]
    #[test_case("11.0.0.0", false ; "just above")]
    #[test_case("123.123.123.123", false ; "public")]
    #[test_case("::ffff:10.0.0.7", true ; "ipv4 mapped ipv6")]
    #[test_case("fd7a:115c:a1e0::1", false ; "ipv6 outside v4 space")]
    #[test_case("", false ; "empty")]
    #[test_case("10.0.0", false ; "truncated")]
    #[test_case("10.0.0.5:443", false ; "with port")]
    #[test_case("localhost", false ; "hostname")]
    fn test_is_member(address: &str, expected: bool) {
        assert_eq!(private_ten().is_member(address), expected);
    }

    #[test]
    fn test_ipv6_space() {
        let membership = NetworkMembership::new("fd7a:115c:a1e0::/48".parse().unwrap());
        assert!(membership.is_member("fd7a:115c:a1e0:ab12::1"));
        assert!(!membership.is_member("fd7a:115c:a1e1::1"));
        assert!(!membership.is_member("10.0.0.1"));
    }

    #[test]
    fn test_address_space_truncates_host_bits() {
        let space: AddressSpace = "10.1.2.3/8".parse().unwrap();
        assert_eq!(space.to_string(), "10.0.0.0/8");
    }

    #[test]
    fn test_address_space_rejects_garbage() {
        let err = "10.0.0.0/33".parse::<AddressSpace>().unwrap_err();
        assert!(matches!(err, FlowguardError::InvalidAddressSpace(_)));
        assert!("tailnet".parse::<AddressSpace>().is_err());
    }

    #[test]
    fn test_address_space_serde() {
        let space: AddressSpace = "100.64.0.0/10".parse().unwrap();
        let json = serde_json::to_string(&space).unwrap();
        assert_eq!(json, "\"100.64.0.0/10\"");
        let back: AddressSpace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, space);
    }

    proptest! {
        #[test]
        fn prop_outside_ten_is_never_member(raw in any::<u32>()) {
            let ip = Ipv4Addr::from(raw);
            prop_assume!(ip.octets()[0] != 10);
            prop_assert!(!private_ten().is_member(&ip.to_string()));
        }

        #[test]
        fn prop_inside_ten_is_member(rest in 0u32..(1 << 24)) {
            let ip = Ipv4Addr::from((10u32 << 24) | rest);
            prop_assert!(private_ten().is_member(&ip.to_string()));
        }
    }
}
