//! Acquisition records: the deal, its buyer and its seller.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deal feature tag attached to an acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DealType {
    /// New shareholder gaining majority control.
    #[serde(alias = "newShareholderGainingMajorityControl")]
    NewShareholderMajority,
    /// Cash consideration.
    CashDeal,
    /// Stock consideration.
    StockDeal,
    /// Earnout payment.
    EarnoutPayment,
    /// Cross-border transaction.
    CrossBorder,
    /// Terms not disclosed.
    TermsNotDisclosed,
    /// Leveraged buyout.
    Lbo,
    /// Reverse merger.
    ReverseMerger,
    /// Backdoor IPO.
    BackdoorIpo,
    /// Corporate divestiture.
    CorporateDivestiture,
    /// Management participated.
    ManagementParticipated,
    /// Bankruptcy sale.
    BankruptcySale,
    /// Add-on, bolt-on, consolidation or tuck-in.
    AddOn,
    /// Minority shareholder increasing ownership stake.
    MinorityIncreasingStake,
    /// Minority shareholder gaining majority control.
    MinorityGainingMajority,
    /// Tender offer.
    TenderOffer,
}

impl DealType {
    /// Every deal type, in display order.
    pub const ALL: [Self; 16] = [
        Self::NewShareholderMajority,
        Self::CashDeal,
        Self::StockDeal,
        Self::EarnoutPayment,
        Self::CrossBorder,
        Self::TermsNotDisclosed,
        Self::Lbo,
        Self::ReverseMerger,
        Self::BackdoorIpo,
        Self::CorporateDivestiture,
        Self::ManagementParticipated,
        Self::BankruptcySale,
        Self::AddOn,
        Self::MinorityIncreasingStake,
        Self::MinorityGainingMajority,
        Self::TenderOffer,
    ];

    /// Machine key, identical to the serialized form.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::NewShareholderMajority => "newShareholderMajority",
            Self::CashDeal => "cashDeal",
            Self::StockDeal => "stockDeal",
            Self::EarnoutPayment => "earnoutPayment",
            Self::CrossBorder => "crossBorder",
            Self::TermsNotDisclosed => "termsNotDisclosed",
            Self::Lbo => "lbo",
            Self::ReverseMerger => "reverseMerger",
            Self::BackdoorIpo => "backdoorIpo",
            Self::CorporateDivestiture => "corporateDivestiture",
            Self::ManagementParticipated => "managementParticipated",
            Self::BankruptcySale => "bankruptcySale",
            Self::AddOn => "addOn",
            Self::MinorityIncreasingStake => "minorityIncreasingStake",
            Self::MinorityGainingMajority => "minorityGainingMajority",
            Self::TenderOffer => "tenderOffer",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NewShareholderMajority => "New Shareholder Gaining Majority Control",
            Self::CashDeal => "Cash Deal",
            Self::StockDeal => "Stock Deal",
            Self::EarnoutPayment => "Earnout Payment",
            Self::CrossBorder => "Cross-Border",
            Self::TermsNotDisclosed => "Terms Not Disclosed",
            Self::Lbo => "Leveraged Buyout (LBO)",
            Self::ReverseMerger => "Reverse Merger",
            Self::BackdoorIpo => "Backdoor IPO",
            Self::CorporateDivestiture => "Corporate Divestiture",
            Self::ManagementParticipated => "Management Participated",
            Self::BankruptcySale => "Bankruptcy Sale",
            Self::AddOn => "Add-on/Bolt-on/Consolidation/Tuck-in",
            Self::MinorityIncreasingStake => "Minority Shareholder Increasing Ownership Stake",
            Self::MinorityGainingMajority => "Minority Shareholder Gaining Majority Control",
            Self::TenderOffer => "Tender Offer",
        }
    }

    /// Parse a machine key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|deal_type| deal_type.key() == key)
    }
}

/// The acquiring company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    /// Stable buyer identifier (e.g. "IQ97870").
    pub identifier: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Market value in millions.
    #[serde(default)]
    pub market_value: Option<Decimal>,
}

/// The acquired company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    /// Seller identifier.
    #[serde(default)]
    pub identifier: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the seller is a listed company.
    pub is_public_company: bool,
}

/// One acquisition announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    /// Announcement date.
    pub announced_date: NaiveDate,
    /// Deal was withdrawn or terminated.
    pub is_withdrawn: bool,
    /// Deal acquires a minority stake.
    pub is_minority_acquisition: bool,
    /// Deal feature tags.
    #[serde(default)]
    pub deal_types: Vec<DealType>,
    /// Total transaction value in millions.
    #[serde(default)]
    pub transaction_size: Option<Decimal>,
    /// Acquirer.
    pub buyer: Buyer,
    /// Target.
    pub seller: Seller,
}

impl CompanyRecord {
    /// Transaction size relative to the buyer's market value.
    ///
    /// `None` when either side is missing or the market value is zero.
    #[must_use]
    pub fn size_ratio(&self) -> Option<Decimal> {
        let size = self.transaction_size?;
        let market_value = self.buyer.market_value?;
        size.checked_div(market_value)
    }
}
