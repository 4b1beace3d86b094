use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Rule family (business domain). The set is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    FraudDetection,
    CustomerSegmentation,
    PricingEngine,
    MarketingAutomation,
    RiskAssessment,
    ComplianceCheck,
    PaymentProcessing,
    InventoryManagement,
    OrderFulfillment,
    UserAuthentication,
}

/// All families in catalog order. Round-robin assignment indexes into this.
pub const FAMILIES: [Family; 10] = [
    Family::FraudDetection,
    Family::CustomerSegmentation,
    Family::PricingEngine,
    Family::MarketingAutomation,
    Family::RiskAssessment,
    Family::ComplianceCheck,
    Family::PaymentProcessing,
    Family::InventoryManagement,
    Family::OrderFulfillment,
    Family::UserAuthentication,
];

/// Values drawn for set-membership operators, regardless of field.
pub const COUNTRY_CODES: [&str; 7] = ["US", "UK", "CA", "DE", "FR", "JP", "AU"];

/// Values drawn for equality operators on non-boolean fields.
pub const STATUS_VALUES: [&str; 4] = ["ACTIVE", "INACTIVE", "PENDING", "SUSPENDED"];

impl Family {
    pub fn as_str(self) -> &'static str {
        match self {
            Family::FraudDetection => "fraud_detection",
            Family::CustomerSegmentation => "customer_segmentation",
            Family::PricingEngine => "pricing_engine",
            Family::MarketingAutomation => "marketing_automation",
            Family::RiskAssessment => "risk_assessment",
            Family::ComplianceCheck => "compliance_check",
            Family::PaymentProcessing => "payment_processing",
            Family::InventoryManagement => "inventory_management",
            Family::OrderFulfillment => "order_fulfillment",
            Family::UserAuthentication => "user_authentication",
        }
    }

    /// Field vocabulary conditions of this family may reference.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Family::FraudDetection => &[
                "transaction_amount",
                "country",
                "device_fingerprint",
                "ip_address",
                "transaction_count_24h",
            ],
            Family::CustomerSegmentation => &[
                "customer_tier",
                "lifetime_value",
                "account_age_days",
                "purchase_frequency",
                "avg_order_value",
            ],
            Family::PricingEngine => &[
                "product_category",
                "quantity",
                "customer_segment",
                "season",
                "competitor_price",
            ],
            Family::MarketingAutomation => &[
                "email_open_rate",
                "click_through_rate",
                "campaign_type",
                "customer_engagement_score",
            ],
            Family::RiskAssessment => &[
                "credit_score",
                "debt_to_income_ratio",
                "employment_status",
                "payment_history_score",
            ],
            Family::ComplianceCheck => &[
                "jurisdiction",
                "document_type",
                "verification_status",
                "kyc_level",
            ],
            Family::PaymentProcessing => &[
                "payment_method",
                "amount",
                "currency",
                "merchant_category",
                "card_type",
            ],
            Family::InventoryManagement => &[
                "stock_level",
                "reorder_point",
                "product_category",
                "warehouse_location",
            ],
            Family::OrderFulfillment => &[
                "order_status",
                "shipping_method",
                "delivery_priority",
                "package_weight",
            ],
            Family::UserAuthentication => &[
                "login_attempts",
                "last_login_days_ago",
                "mfa_enabled",
                "account_status",
            ],
        }
    }

    pub fn has_field(self, field: &str) -> bool {
        self.fields().contains(&field)
    }

    /// Family for the `index`-th record of a generation group.
    pub fn round_robin(index: usize) -> Family {
        FAMILIES[index % FAMILIES.len()]
    }

    /// Human-readable name: underscores become spaces, words capitalized.
    pub fn title(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FAMILIES
            .iter()
            .copied()
            .find(|family| family.as_str() == value)
            .ok_or_else(|| Error::UnknownFamily(value.to_string()))
    }
}

/// Fields whose equality conditions compare against booleans.
pub fn is_boolean_field(field: &str) -> bool {
    field.ends_with("_enabled")
}
