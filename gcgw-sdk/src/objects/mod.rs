pub mod actions;
pub mod discount;
pub mod redeem;

pub use actions::{
    CancelRedeemRequest, CancelRedeemResponse, CheckUsageRequest, CreateCodeRequest,
    DeleteCodeRequest, DeleteCodeResponse, ErrorResponse, GetAllCodesRequest, UsageResponse,
};
pub use discount::{
    AllCodesResponse, CreateCodeResponse, DiscountCode, DiscountCodeEnvelope, DiscountCodeSummary,
};
pub use redeem::{Card, RedeemData};

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An identifier that the storefront may send either as a JSON string or as
/// a JSON number. It is always carried as its decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the identifier carries no text at all.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns `Some(self)` unless the identifier is blank.
    pub fn present(this: Option<&Self>) -> Option<&Self> {
        this.filter(|id| !id.is_blank())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for Identifier {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdentifierVisitor;

        impl Visitor<'_> for IdentifierVisitor {
            type Value = Identifier;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or a number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Identifier, E> {
                Ok(Identifier(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Identifier, E> {
                Ok(Identifier(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Identifier, E> {
                Ok(Identifier(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Identifier, E> {
                Ok(Identifier(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Identifier, E> {
                Ok(Identifier(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdentifierVisitor)
    }
}

/// The five actions understood by the gateway endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionKind {
    Create,
    CheckUsage,
    DeleteCode,
    GetAllCode,
    CancelRedeem,
}

impl ActionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Create => "CREATE",
            ActionKind::CheckUsage => "CHECKUSAGE",
            ActionKind::DeleteCode => "DELETECODE",
            ActionKind::GetAllCode => "GETALLCODE",
            ActionKind::CancelRedeem => "CANCELREDEEM",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for ActionKind {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(ActionKind::Create),
            "CHECKUSAGE" => Ok(ActionKind::CheckUsage),
            "DELETECODE" => Ok(ActionKind::DeleteCode),
            "GETALLCODE" => Ok(ActionKind::GetAllCode),
            "CANCELREDEEM" => Ok(ActionKind::CancelRedeem),
            other => Err(UnknownAction(other.to_owned())),
        }
    }
}

/// Body accepted by the gateway endpoint: `{"action": ..., "data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: ActionKind,
    pub data: serde_json::Value,
}
