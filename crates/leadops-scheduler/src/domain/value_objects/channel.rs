//! Outreach channel

use leadops_common::ChannelLimits;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Voice,
    Sms,
    WhatsApp,
    Email,
}

impl ChannelType {
    pub const ALL: [ChannelType; 4] = [Self::Voice, Self::Sms, Self::WhatsApp, Self::Email];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Voice => "voice",
            Self::Sms => "sms",
            Self::WhatsApp => "whatsapp",
            Self::Email => "email",
        }
    }

    pub fn is_email(&self) -> bool {
        matches!(self, Self::Email)
    }

    /// Configured per-sender daily limit for this channel
    pub fn daily_limit(&self, limits: &ChannelLimits) -> u32 {
        match self {
            Self::Voice => limits.voice,
            Self::Sms => limits.sms,
            Self::WhatsApp => limits.whatsapp,
            Self::Email => limits.email,
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown channel type: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for ChannelType {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("WhatsApp".parse::<ChannelType>().unwrap(), ChannelType::WhatsApp);
        assert_eq!(" email ".parse::<ChannelType>().unwrap(), ChannelType::Email);
        assert!("fax".parse::<ChannelType>().is_err());
        assert_eq!(ChannelType::Sms.to_string(), "sms");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ChannelType::WhatsApp).unwrap();
        assert_eq!(json, "\"whatsapp\"");
        let back: ChannelType = serde_json::from_str("\"voice\"").unwrap();
        assert_eq!(back, ChannelType::Voice);
    }

    #[test]
    fn test_daily_limits() {
        let limits = ChannelLimits::default();
        assert_eq!(ChannelType::Voice.daily_limit(&limits), 200);
        assert_eq!(ChannelType::Sms.daily_limit(&limits), 500);
        assert_eq!(ChannelType::WhatsApp.daily_limit(&limits), 250);
        assert_eq!(ChannelType::Email.daily_limit(&limits), 100);
    }
}
