//! Filter dimensions.
//!
//! Each dimension is a closed enum whose `All` variant means "no
//! constraint". Serialized keys match the keys used by the result
//! consumers (`"2016-today"`, `"cashDeal"`, `"0-2%"`, ...).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::DealType;

/// Common behaviour of every filter dimension.
pub trait FilterDimension: Copy + Eq + Sized + 'static {
    /// Dimension name used in breakdowns.
    const NAME: &'static str;

    /// Every value of the dimension, `All` first.
    const VALUES: &'static [Self];

    /// Machine key.
    fn key(&self) -> &'static str;

    /// Human-readable label.
    fn label(&self) -> &'static str;

    /// Whether this is the "no constraint" sentinel.
    fn is_all(&self) -> bool;

    /// Parse a machine key.
    fn from_key(key: &str) -> Option<Self> {
        Self::VALUES.iter().copied().find(|value| value.key() == key)
    }

    /// Every concrete value (all except the sentinel).
    fn concrete_values() -> impl Iterator<Item = Self> {
        Self::VALUES.iter().copied().filter(|value| !value.is_all())
    }
}

/// Half-open band `[low, high)`; `high = None` is unbounded.
fn in_band(value: Decimal, low: Decimal, high: Option<Decimal>) -> bool {
    value >= low && high.is_none_or(|high| value < high)
}

// =============================================================================
// Date range
// =============================================================================

/// Announcement date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    /// No constraint.
    #[serde(rename = "all")]
    All,
    /// 2000-01-01 to 2007-12-31.
    #[serde(rename = "2000-2007")]
    From2000To2007,
    /// 2008-01-01 to 2015-12-31.
    #[serde(rename = "2008-2015")]
    From2008To2015,
    /// 2016-01-01 to today.
    #[serde(rename = "2016-today")]
    From2016ToToday,
}

impl DateRange {
    /// Inclusive bounds of the window; `today` closes open-ended ranges.
    #[must_use]
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let ymd = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);
        match self {
            Self::All => (ymd(1900, 1, 1), today),
            Self::From2000To2007 => (ymd(2000, 1, 1), ymd(2007, 12, 31)),
            Self::From2008To2015 => (ymd(2008, 1, 1), ymd(2015, 12, 31)),
            Self::From2016ToToday => (ymd(2016, 1, 1), today),
        }
    }

    /// Whether an announcement date falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        if self.is_all() {
            return true;
        }
        let (start, end) = self.bounds(today);
        date >= start && date <= end
    }
}

impl FilterDimension for DateRange {
    const NAME: &'static str = "dateRange";
    const VALUES: &'static [Self] = &[
        Self::All,
        Self::From2000To2007,
        Self::From2008To2015,
        Self::From2016ToToday,
    ];

    fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::From2000To2007 => "2000-2007",
            Self::From2008To2015 => "2008-2015",
            Self::From2016ToToday => "2016-today",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::From2000To2007 => "2000-2007",
            Self::From2008To2015 => "2008-2015",
            Self::From2016ToToday => "2016-Today",
        }
    }

    fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

// =============================================================================
// Deal type
// =============================================================================

/// Deal-type membership filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealTypeFilter {
    /// No constraint.
    All,
    /// The deal must carry this tag.
    Only(DealType),
}

impl DealTypeFilter {
    /// Whether a deal's tags satisfy the filter.
    #[must_use]
    pub fn matches(&self, deal_types: &[DealType]) -> bool {
        match self {
            Self::All => true,
            Self::Only(required) => deal_types.contains(required),
        }
    }
}

impl FilterDimension for DealTypeFilter {
    const NAME: &'static str = "dealType";
    const VALUES: &'static [Self] = &[
        Self::All,
        Self::Only(DealType::NewShareholderMajority),
        Self::Only(DealType::CashDeal),
        Self::Only(DealType::StockDeal),
        Self::Only(DealType::EarnoutPayment),
        Self::Only(DealType::CrossBorder),
        Self::Only(DealType::TermsNotDisclosed),
        Self::Only(DealType::Lbo),
        Self::Only(DealType::ReverseMerger),
        Self::Only(DealType::BackdoorIpo),
        Self::Only(DealType::CorporateDivestiture),
        Self::Only(DealType::ManagementParticipated),
        Self::Only(DealType::BankruptcySale),
        Self::Only(DealType::AddOn),
        Self::Only(DealType::MinorityIncreasingStake),
        Self::Only(DealType::MinorityGainingMajority),
        Self::Only(DealType::TenderOffer),
    ];

    fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(deal_type) => deal_type.key(),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::All => "All Deal Types",
            Self::Only(deal_type) => deal_type.label(),
        }
    }

    fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl Serialize for DealTypeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for DealTypeFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Self::from_key(&key)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown deal type filter '{key}'")))
    }
}

// =============================================================================
// Status
// =============================================================================

/// Deal completion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcquisitionStatus {
    /// No constraint.
    #[serde(rename = "all")]
    All,
    /// Withdrawn or terminated deals.
    #[serde(rename = "withdrawn/terminated")]
    WithdrawnTerminated,
    /// Everything that was not withdrawn.
    #[serde(rename = "completed")]
    Completed,
}

impl AcquisitionStatus {
    /// Whether a deal's withdrawn flag satisfies the filter.
    #[must_use]
    pub const fn matches(&self, is_withdrawn: bool) -> bool {
        match self {
            Self::All => true,
            Self::WithdrawnTerminated => is_withdrawn,
            Self::Completed => !is_withdrawn,
        }
    }
}

impl FilterDimension for AcquisitionStatus {
    const NAME: &'static str = "status";
    const VALUES: &'static [Self] = &[Self::All, Self::WithdrawnTerminated, Self::Completed];

    fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::WithdrawnTerminated => "withdrawn/terminated",
            Self::Completed => "completed",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::All => "All Withdrawn/Terminated/Completed",
            Self::WithdrawnTerminated => "Withdrawn/Terminated",
            Self::Completed => "Completed",
        }
    }

    fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

// =============================================================================
// Size by transaction value
// =============================================================================

/// Transaction size relative to the buyer's market value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionSize {
    /// No constraint.
    #[serde(rename = "all")]
    All,
    /// `[0, 0.02)`
    #[serde(rename = "0-2%")]
    UpTo2Pct,
    /// `[0.02, 0.1)`
    #[serde(rename = "2-10%")]
    From2To10Pct,
    /// `[0.1, 0.25)`
    #[serde(rename = "10-25%")]
    From10To25Pct,
    /// `[0.25, 0.5)`
    #[serde(rename = "25-50%")]
    From25To50Pct,
    /// `[0.5, 1)`
    #[serde(rename = "50-100%")]
    From50To100Pct,
    /// `[1, ∞)`
    #[serde(rename = ">100%")]
    Over100Pct,
}

impl TransactionSize {
    /// Ratio band as `[low, high)`. `None` for the sentinel.
    #[must_use]
    pub const fn band(&self) -> Option<(Decimal, Option<Decimal>)> {
        match self {
            Self::All => None,
            Self::UpTo2Pct => Some((Decimal::ZERO, Some(Decimal::from_parts(2, 0, 0, false, 2)))),
            Self::From2To10Pct => Some((
                Decimal::from_parts(2, 0, 0, false, 2),
                Some(Decimal::from_parts(1, 0, 0, false, 1)),
            )),
            Self::From10To25Pct => Some((
                Decimal::from_parts(1, 0, 0, false, 1),
                Some(Decimal::from_parts(25, 0, 0, false, 2)),
            )),
            Self::From25To50Pct => Some((
                Decimal::from_parts(25, 0, 0, false, 2),
                Some(Decimal::from_parts(5, 0, 0, false, 1)),
            )),
            Self::From50To100Pct => Some((
                Decimal::from_parts(5, 0, 0, false, 1),
                Some(Decimal::ONE),
            )),
            Self::Over100Pct => Some((Decimal::ONE, None)),
        }
    }

    /// Whether a size ratio satisfies the filter.
    ///
    /// Concrete buckets fail closed when the ratio is unknown.
    #[must_use]
    pub fn matches(&self, ratio: Option<Decimal>) -> bool {
        let Some((low, high)) = self.band() else {
            return true;
        };
        ratio.is_some_and(|ratio| in_band(ratio, low, high))
    }
}

impl FilterDimension for TransactionSize {
    const NAME: &'static str = "sizeByTransactionValue";
    const VALUES: &'static [Self] = &[
        Self::All,
        Self::UpTo2Pct,
        Self::From2To10Pct,
        Self::From10To25Pct,
        Self::From25To50Pct,
        Self::From50To100Pct,
        Self::Over100Pct,
    ];

    fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::UpTo2Pct => "0-2%",
            Self::From2To10Pct => "2-10%",
            Self::From10To25Pct => "10-25%",
            Self::From25To50Pct => "25-50%",
            Self::From50To100Pct => "50-100%",
            Self::Over100Pct => ">100%",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::All => "All Transaction sizes",
            other => other.key(),
        }
    }

    fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

// =============================================================================
// Public or private
// =============================================================================

/// Whether the seller is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicOrPrivate {
    /// No constraint.
    All,
    /// Listed sellers.
    Public,
    /// Private sellers.
    Private,
}

impl PublicOrPrivate {
    /// Whether the seller's listing flag satisfies the filter.
    #[must_use]
    pub const fn matches(&self, is_public_company: bool) -> bool {
        match self {
            Self::All => true,
            Self::Public => is_public_company,
            Self::Private => !is_public_company,
        }
    }
}

impl FilterDimension for PublicOrPrivate {
    const NAME: &'static str = "publicOrPrivate";
    const VALUES: &'static [Self] = &[Self::All, Self::Public, Self::Private];

    fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Public => "public",
            Self::Private => "private",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::All => "All Public/Private",
            Self::Public => "Public",
            Self::Private => "Private",
        }
    }

    fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

// =============================================================================
// Acquisitions number
// =============================================================================

/// Total number of acquisitions made by the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcquisitionsNumber {
    /// No constraint.
    #[serde(rename = "all")]
    All,
    /// Exactly one.
    #[serde(rename = "1")]
    One,
    /// `[2, 5)`
    #[serde(rename = "2-5")]
    TwoToFive,
    /// `[5, 20)`
    #[serde(rename = "5-20")]
    FiveToTwenty,
    /// `[20, ∞)`
    #[serde(rename = ">20")]
    TwentyOrMore,
}

impl AcquisitionsNumber {
    /// Whether a buyer's acquisition count satisfies the filter.
    #[must_use]
    pub const fn matches(&self, count: usize) -> bool {
        match self {
            Self::All => true,
            Self::One => count == 1,
            Self::TwoToFive => count >= 2 && count < 5,
            Self::FiveToTwenty => count >= 5 && count < 20,
            Self::TwentyOrMore => count >= 20,
        }
    }
}

impl FilterDimension for AcquisitionsNumber {
    const NAME: &'static str = "acquisitionsNumber";
    const VALUES: &'static [Self] = &[
        Self::All,
        Self::One,
        Self::TwoToFive,
        Self::FiveToTwenty,
        Self::TwentyOrMore,
    ];

    fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::One => "1",
            Self::TwoToFive => "2-5",
            Self::FiveToTwenty => "5-20",
            Self::TwentyOrMore => ">20",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::All => "All Acquisition Numbers",
            other => other.key(),
        }
    }

    fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

// =============================================================================
// Acquirer market cap
// =============================================================================

/// Buyer market value band, in millions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcquirerMarketCap {
    /// No constraint.
    #[serde(rename = "all")]
    All,
    /// `[10, 50)`
    #[serde(rename = "10M-50M")]
    Nano,
    /// `[50, 300)`
    #[serde(rename = "50M-300M")]
    Micro,
    /// `[300, 2000)`
    #[serde(rename = "300M-2B")]
    Small,
    /// `[2000, 10000)`
    #[serde(rename = "2B-10B")]
    Mid,
    /// `[10000, 200000)`
    #[serde(rename = "10B-200B")]
    Large,
    /// `[200000, ∞)`
    #[serde(rename = ">200B")]
    Mega,
}

impl AcquirerMarketCap {
    /// Market value band as `[low, high)` in millions. `None` for the sentinel.
    #[must_use]
    pub const fn band(&self) -> Option<(Decimal, Option<Decimal>)> {
        const fn millions(value: u32) -> Decimal {
            Decimal::from_parts(value, 0, 0, false, 0)
        }

        match self {
            Self::All => None,
            Self::Nano => Some((millions(10), Some(millions(50)))),
            Self::Micro => Some((millions(50), Some(millions(300)))),
            Self::Small => Some((millions(300), Some(millions(2_000)))),
            Self::Mid => Some((millions(2_000), Some(millions(10_000)))),
            Self::Large => Some((millions(10_000), Some(millions(200_000)))),
            Self::Mega => Some((millions(200_000), None)),
        }
    }

    /// Whether a (validated) market value falls in the band.
    #[must_use]
    pub fn matches(&self, market_value: Decimal) -> bool {
        self.band()
            .is_none_or(|(low, high)| in_band(market_value, low, high))
    }
}

impl FilterDimension for AcquirerMarketCap {
    const NAME: &'static str = "acquirerMarketCap";
    const VALUES: &'static [Self] = &[
        Self::All,
        Self::Nano,
        Self::Micro,
        Self::Small,
        Self::Mid,
        Self::Large,
        Self::Mega,
    ];

    fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Nano => "10M-50M",
            Self::Micro => "50M-300M",
            Self::Small => "300M-2B",
            Self::Mid => "2B-10B",
            Self::Large => "10B-200B",
            Self::Mega => ">200B",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::All => "All Market Caps",
            Self::Nano => "Nano Cap ($10M-$50M)",
            Self::Micro => "Micro Cap ($50M-$300M)",
            Self::Small => "Small Cap ($300M-$2B)",
            Self::Mid => "Mid Cap ($2B-$10B)",
            Self::Large => "Large Cap ($10B-$200B)",
            Self::Mega => "Mega Cap (>$200B)",
        }
    }

    fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

// =============================================================================
// Majority / minority
// =============================================================================

/// Size of the acquired stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionType {
    /// No constraint.
    All,
    /// Majority stakes.
    Majority,
    /// Minority stakes.
    Minority,
}

impl AcquisitionType {
    /// Whether a deal's minority flag satisfies the filter.
    #[must_use]
    pub const fn matches(&self, is_minority_acquisition: bool) -> bool {
        match self {
            Self::All => true,
            Self::Majority => !is_minority_acquisition,
            Self::Minority => is_minority_acquisition,
        }
    }
}

impl FilterDimension for AcquisitionType {
    const NAME: &'static str = "acquisitionType";
    const VALUES: &'static [Self] = &[Self::All, Self::Majority, Self::Minority];

    fn key(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Majority => "majority",
            Self::Minority => "minority",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::All => "All Majority/Minority",
            Self::Majority => "Majority",
            Self::Minority => "Minority",
        }
    }

    fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}
