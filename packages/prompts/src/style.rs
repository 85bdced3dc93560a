// ABOUTME: Architecture styles a user can steer the plan towards
// ABOUTME: Display gives the human label; parsing accepts labels and short slugs

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ArchitectureStyle {
    #[strum(to_string = "Microservices", serialize = "microservices")]
    Microservices,
    #[strum(to_string = "Monolithic", serialize = "monolith")]
    Monolithic,
    #[strum(to_string = "Serverless")]
    Serverless,
    #[strum(to_string = "Event-Driven", serialize = "event-driven", serialize = "event_driven")]
    EventDriven,
    #[strum(to_string = "Service-Oriented Architecture", serialize = "soa")]
    ServiceOriented,
    #[strum(to_string = "Layered")]
    Layered,
    #[strum(to_string = "Microkernel", serialize = "plugin")]
    Microkernel,
    #[strum(to_string = "Pipe and Filter", serialize = "pipe-filter", serialize = "pipe-and-filter")]
    PipeAndFilter,
    #[strum(to_string = "Peer-to-Peer", serialize = "p2p", serialize = "peer-to-peer")]
    PeerToPeer,
    #[strum(to_string = "Space-Based", serialize = "space-based")]
    SpaceBased,
}

impl ArchitectureStyle {
    /// Short command-line friendly identifier
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Microservices => "microservices",
            Self::Monolithic => "monolith",
            Self::Serverless => "serverless",
            Self::EventDriven => "event-driven",
            Self::ServiceOriented => "soa",
            Self::Layered => "layered",
            Self::Microkernel => "microkernel",
            Self::PipeAndFilter => "pipe-filter",
            Self::PeerToPeer => "p2p",
            Self::SpaceBased => "space-based",
        }
    }

    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn test_ten_styles() {
        assert_eq!(ArchitectureStyle::all().len(), 10);
        assert_eq!(ArchitectureStyle::all()[0], ArchitectureStyle::Microservices);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(
            ArchitectureStyle::ServiceOriented.to_string(),
            "Service-Oriented Architecture"
        );
        assert_eq!(ArchitectureStyle::EventDriven.to_string(), "Event-Driven");
    }

    #[rstest]
    #[case("microservices", ArchitectureStyle::Microservices)]
    #[case("SOA", ArchitectureStyle::ServiceOriented)]
    #[case("Service-Oriented Architecture", ArchitectureStyle::ServiceOriented)]
    #[case("event_driven", ArchitectureStyle::EventDriven)]
    #[case("pipe and filter", ArchitectureStyle::PipeAndFilter)]
    #[case("P2P", ArchitectureStyle::PeerToPeer)]
    fn test_parse(#[case] raw: &str, #[case] expected: ArchitectureStyle) {
        assert_eq!(ArchitectureStyle::from_str(raw).unwrap(), expected);
    }

    #[test]
    fn test_every_slug_parses_back() {
        for style in ArchitectureStyle::all() {
            assert_eq!(ArchitectureStyle::from_str(style.slug()).unwrap(), style);
        }
    }

    #[test]
    fn test_unknown_style() {
        assert!(ArchitectureStyle::from_str("blockchain").is_err());
    }
}
