use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::RateTableError;

/// Identifier of the zero-fee sentinel platform whose fee must be supplied
/// by the user.
pub const CUSTOM_PLATFORM_ID: &str = "custom";

/// A content-distribution channel and the share of gross revenue it keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub id: String,
    pub name: String,
    pub fee_percentage: Decimal,
    pub description: String,
    pub icon: String,
}

impl PlatformConfig {
    pub fn is_custom(&self) -> bool {
        self.id.eq_ignore_ascii_case(CUSTOM_PLATFORM_ID)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformTable {
    platforms: Vec<PlatformConfig>,
}

impl PlatformTable {
    pub fn new(platforms: Vec<PlatformConfig>) -> Result<Self, RateTableError> {
        let table = Self { platforms };
        table.validate()?;
        Ok(table)
    }

    pub(crate) fn from_static(platforms: Vec<PlatformConfig>) -> Self {
        Self { platforms }
    }

    pub fn platforms(&self) -> &[PlatformConfig] {
        &self.platforms
    }

    pub fn get(
        &self,
        platform_id: &str,
    ) -> Option<&PlatformConfig> {
        let key = platform_id.trim();
        self.platforms.iter().find(|p| p.id.eq_ignore_ascii_case(key))
    }

    /// Inserts or replaces the entry with the same id.
    pub fn upsert(
        &mut self,
        platform: PlatformConfig,
    ) {
        match self
            .platforms
            .iter_mut()
            .find(|p| p.id.eq_ignore_ascii_case(&platform.id))
        {
            Some(existing) => *existing = platform,
            None => self.platforms.push(platform),
        }
    }

    pub fn validate(&self) -> Result<(), RateTableError> {
        if self.platforms.is_empty() {
            return Err(RateTableError::Empty);
        }
        for (index, platform) in self.platforms.iter().enumerate() {
            if platform.fee_percentage < Decimal::ZERO || platform.fee_percentage >= Decimal::ONE {
                return Err(RateTableError::InvalidRate {
                    key: platform.id.clone(),
                    rate: platform.fee_percentage,
                });
            }
            if self.platforms[..index]
                .iter()
                .any(|p| p.id.eq_ignore_ascii_case(&platform.id))
            {
                return Err(RateTableError::DuplicateKey(platform.id.clone()));
            }
        }
        Ok(())
    }
}
