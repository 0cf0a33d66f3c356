//! Identity types shared across the E2 node crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Public Land Mobile Network identifier.
///
/// MCC is 3 decimal digits, MNC is 2 or 3 digits; `long_mnc` selects the
/// 3-digit form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plmn {
    /// Mobile Country Code (0-999)
    pub mcc: u16,
    /// Mobile Network Code (0-999)
    pub mnc: u16,
    /// True if MNC is 3 digits
    #[serde(default)]
    pub long_mnc: bool,
}

impl Plmn {
    /// Creates a new PLMN.
    pub const fn new(mcc: u16, mnc: u16, long_mnc: bool) -> Self {
        Self { mcc, mnc, long_mnc }
    }

    /// Encodes the PLMN into the 3-octet TBCD form used by `PLMN-Identity`.
    ///
    /// - Octet 0: MCC digit 2 | MCC digit 1
    /// - Octet 1: MNC digit 3 (or 0xF) | MCC digit 3
    /// - Octet 2: MNC digit 2 | MNC digit 1
    pub fn encode(&self) -> [u8; 3] {
        let mcc1 = ((self.mcc / 100) % 10) as u8;
        let mcc2 = ((self.mcc / 10) % 10) as u8;
        let mcc3 = (self.mcc % 10) as u8;

        let (mnc1, mnc2, mnc3) = if self.long_mnc {
            (
                ((self.mnc / 100) % 10) as u8,
                ((self.mnc / 10) % 10) as u8,
                (self.mnc % 10) as u8,
            )
        } else {
            (((self.mnc / 10) % 10) as u8, (self.mnc % 10) as u8, 0x0F)
        };

        [(mcc2 << 4) | mcc1, (mnc3 << 4) | mcc3, (mnc2 << 4) | mnc1]
    }

    /// Decodes a PLMN from its 3-octet TBCD form.
    pub fn decode(bytes: [u8; 3]) -> Self {
        let mcc1 = u16::from(bytes[0] & 0x0F);
        let mcc2 = u16::from(bytes[0] >> 4);
        let mcc3 = u16::from(bytes[1] & 0x0F);
        let mnc3 = bytes[1] >> 4;
        let mnc1 = u16::from(bytes[2] & 0x0F);
        let mnc2 = u16::from(bytes[2] >> 4);

        let mcc = 100 * mcc1 + 10 * mcc2 + mcc3;
        if mnc3 == 0x0F {
            Self::new(mcc, 10 * mnc1 + mnc2, false)
        } else {
            Self::new(mcc, 100 * mnc1 + 10 * mnc2 + u16::from(mnc3), true)
        }
    }

    /// Returns true if every digit is in range for its width.
    pub fn is_valid(&self) -> bool {
        let mnc_max = if self.long_mnc { 999 } else { 99 };
        self.mcc <= 999 && self.mnc <= mnc_max
    }
}

impl fmt::Debug for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.long_mnc {
            write!(f, "Plmn({:03}-{:03})", self.mcc, self.mnc)
        } else {
            write!(f, "Plmn({:03}-{:02})", self.mcc, self.mnc)
        }
    }
}

impl fmt::Display for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.long_mnc {
            write!(f, "{:03}{:03}", self.mcc, self.mnc)
        } else {
            write!(f, "{:03}{:02}", self.mcc, self.mnc)
        }
    }
}

impl Default for Plmn {
    fn default() -> Self {
        Self::new(1, 1, false)
    }
}
