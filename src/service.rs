//! Twilio service identifiers exposed by the MCP endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};

/// One callable capability group on the Twilio MCP server.
///
/// The wire form is the variant name itself, which is what ends up inside the signed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ServiceName {
    Conversations,
    PhoneNumbers,
    Studio,
    Voice,
    Messaging,
    Verify,
    Lookups,
}

impl ServiceName {
    /// Every recognized service, in the default endpoint order.
    pub const ALL: [ServiceName; 7] = [
        ServiceName::Conversations,
        ServiceName::PhoneNumbers,
        ServiceName::Studio,
        ServiceName::Voice,
        ServiceName::Messaging,
        ServiceName::Verify,
        ServiceName::Lookups,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceName::Conversations => "Conversations",
            ServiceName::PhoneNumbers => "PhoneNumbers",
            ServiceName::Studio => "Studio",
            ServiceName::Voice => "Voice",
            ServiceName::Messaging => "Messaging",
            ServiceName::Verify => "Verify",
            ServiceName::Lookups => "Lookups",
        }
    }

    /// Parse a list of identifiers, failing on the first unrecognized one.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<ServiceName>> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl FromStr for ServiceName {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self> {
        ServiceName::ALL
            .into_iter()
            .find(|svc| svc.as_str() == s)
            .ok_or_else(|| AgentError::UnknownService(s.to_string()))
    }
}

impl TryFrom<String> for ServiceName {
    type Error = AgentError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ServiceName> for String {
    fn from(value: ServiceName) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_round_trip_through_str() {
        for svc in ServiceName::ALL {
            assert_eq!(svc.as_str().parse::<ServiceName>().unwrap(), svc);
        }
    }

    #[test]
    fn test_default_order() {
        let names: Vec<&str> = ServiceName::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            vec!["Conversations", "PhoneNumbers", "Studio", "Voice", "Messaging", "Verify", "Lookups"]
        );
    }

    #[test]
    fn test_unknown_rejected() {
        let err = "Fax".parse::<ServiceName>().unwrap_err();
        assert!(matches!(err, AgentError::UnknownService(ref s) if s == "Fax"));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("voice".parse::<ServiceName>().is_err());
        assert!("VOICE".parse::<ServiceName>().is_err());
    }

    #[test]
    fn test_parse_list_preserves_order() {
        let parsed = ServiceName::parse_list(&["Verify", "Voice"]).unwrap();
        assert_eq!(parsed, vec![ServiceName::Verify, ServiceName::Voice]);
    }

    #[test]
    fn test_parse_list_fails_on_any_unknown() {
        assert!(ServiceName::parse_list(&["Voice", "Sms"]).is_err());
    }

    #[test]
    fn test_yaml_deserialization() {
        let parsed: Vec<ServiceName> = serde_yaml::from_str("- Studio\n- Lookups\n").unwrap();
        assert_eq!(parsed, vec![ServiceName::Studio, ServiceName::Lookups]);

        let bad: std::result::Result<Vec<ServiceName>, _> = serde_yaml::from_str("- Pager\n");
        assert!(bad.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ServiceName::PhoneNumbers.to_string(), "PhoneNumbers");
    }
}
