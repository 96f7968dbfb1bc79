//! Strongly-typed identifiers for SoftLayer objects.
//!
//! SoftLayer identifies every object with an integer. These wrappers keep a VLAN id from
//! being passed where a billing item id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed numeric id wrappers.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $label:literal, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw SoftLayer id.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw id.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Parses an id from its decimal string form.
            ///
            /// # Errors
            ///
            /// Returns [`Error::ValidationError`] if the string is not an unsigned integer.
            pub fn parse_str(input: &str) -> Result<Self> {
                input.trim().parse::<u64>().map(Self).map_err(|err| {
                    Error::ValidationError(format!(
                        "Not a valid {} ID, must be an integer: {err}",
                        $label
                    ))
                })
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(VlanId, "vlan", "Network VLAN id");
id_type!(OrderId, "order", "Product order id");
id_type!(BillingItemId, "billing item", "Billing item id");
id_type!(PackageId, "package", "Product package id");
id_type!(ItemId, "item", "Product item id");
id_type!(PriceId, "price", "Product item price id");
id_type!(LocationId, "location", "Datacenter location id");
id_type!(HardwareId, "hardware", "Hardware (router) id");
id_type!(SubnetId, "subnet", "Subnet id");
