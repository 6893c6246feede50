//! Protocol configuration
//!
//! Receivers differ in how far they distort pulse widths, so the matching
//! parameters are configuration rather than constants. With the `serde`
//! feature the whole record can be stored in flash as postcard binary.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::timing::{TimingTable, MAX_BITS};
use crate::tolerance::TolerancePolicy;

/// Current configuration record version
pub const CONFIG_VERSION: u8 = 1;

/// Maximum serialized size of an [`IrConfig`]
pub const MAX_CONFIG_SIZE: usize = 64;

/// Decoder behaviour settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecoderConfig {
    /// Tolerance applied to every mark and space
    pub tolerance: TolerancePolicy,
    /// Check each bit-cell mark against the nominal bit mark
    ///
    /// When false the mark's duration is ignored and only the space decides
    /// the bit.
    pub validate_bit_mark_duration: bool,
}

impl DecoderConfig {
    /// Default tolerance, bit marks validated
    pub const DEFAULT: DecoderConfig = DecoderConfig {
        tolerance: TolerancePolicy::DEFAULT,
        validate_bit_mark_duration: true,
    };
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete persisted protocol configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IrConfig {
    /// Record version, see [`CONFIG_VERSION`]
    pub version: u8,
    /// Frame timings
    pub timing: TimingTable,
    /// Decoder settings
    pub decoder: DecoderConfig,
}

impl Default for IrConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            timing: TimingTable::HAIER,
            decoder: DecoderConfig::DEFAULT,
        }
    }
}

/// Configuration persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed (usually buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Stored record has an unsupported version
    VersionMismatch {
        /// Version found in the record
        found: u8,
    },
    /// Payload width larger than a decode result can hold
    BitsOutOfRange {
        /// Width found in the record
        bits: u8,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Serialize => f.write_str("config serialization failed"),
            ConfigError::Deserialize => f.write_str("config deserialization failed"),
            ConfigError::VersionMismatch { found } => write!(
                f,
                "config version mismatch: found {}, expected {}",
                found, CONFIG_VERSION
            ),
            ConfigError::BitsOutOfRange { bits } => write!(
                f,
                "config payload width {} exceeds {} bits",
                bits, MAX_BITS
            ),
        }
    }
}

#[cfg(feature = "serde")]
impl IrConfig {
    /// Serialize into `buf`, returning the used part
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Load a record previously written with [`IrConfig::to_slice`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: IrConfig = postcard::from_bytes(bytes).map_err(|_| {
            ir_warn!("Failed to deserialize IR config ({} bytes)", bytes.len());
            ConfigError::Deserialize
        })?;

        if config.version != CONFIG_VERSION {
            ir_warn!(
                "IR config version mismatch: found {}, expected {}",
                config.version,
                CONFIG_VERSION
            );
            return Err(ConfigError::VersionMismatch {
                found: config.version,
            });
        }

        if config.timing.bits > MAX_BITS {
            ir_warn!(
                "IR config payload width {} exceeds {} bits",
                config.timing.bits,
                MAX_BITS
            );
            return Err(ConfigError::BitsOutOfRange {
                bits: config.timing.bits,
            });
        }

        ir_debug!(
            "Loaded IR config: {} bits, tolerance {}%",
            config.timing.bits,
            config.decoder.tolerance.percent
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IrConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.timing, TimingTable::HAIER);
        assert!(config.decoder.validate_bit_mark_duration);
        assert_eq!(config.decoder.tolerance, TolerancePolicy::DEFAULT);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_roundtrip() {
        let mut config = IrConfig::default();
        config.decoder.validate_bit_mark_duration = false;
        config.decoder.tolerance = TolerancePolicy::new(30, 50);

        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let used = config.to_slice(&mut buf).unwrap();
        let loaded = IrConfig::from_bytes(used).unwrap();

        assert_eq!(loaded, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_version_mismatch() {
        let config = IrConfig {
            version: CONFIG_VERSION + 1,
            ..IrConfig::default()
        };

        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let used = config.to_slice(&mut buf).unwrap();

        assert_eq!(
            IrConfig::from_bytes(used),
            Err(ConfigError::VersionMismatch {
                found: CONFIG_VERSION + 1
            })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_oversized_width_rejected() {
        let mut config = IrConfig::default();
        config.timing.bits = 200;

        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let used = config.to_slice(&mut buf).unwrap();

        assert_eq!(
            IrConfig::from_bytes(used),
            Err(ConfigError::BitsOutOfRange { bits: 200 })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_max_width_accepted() {
        let mut config = IrConfig::default();
        config.timing.bits = MAX_BITS;

        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let used = config.to_slice(&mut buf).unwrap();

        assert_eq!(IrConfig::from_bytes(used).unwrap().timing.bits, 128);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_buffer_too_small() {
        let mut buf = [0u8; 2];
        assert_eq!(
            IrConfig::default().to_slice(&mut buf).err(),
            Some(ConfigError::Serialize)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_garbage() {
        assert_eq!(IrConfig::from_bytes(&[]), Err(ConfigError::Deserialize));
    }
}
