//! Static reference catalogs.
//!
//! Protocols, regions, deployment targets, the glossary, and wizard step
//! definitions. Everything here is immutable and looked up by identifier;
//! unknown identifiers fall back to the first catalog row.

use serde::Serialize;

/// A tunnelling protocol the user can pick in the wizard.
#[derive(Debug, PartialEq)]
pub struct Protocol {
    pub id: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub speed: &'static str,
    pub security: &'static str,
    pub compatibility: &'static str,
    pub ports: &'static str,
    pub best_for: &'static str,
}

/// A gateway location with fixed, illustrative latency and load figures.
#[derive(Debug, PartialEq)]
pub struct Region {
    pub id: &'static str,
    pub name: &'static str,
    /// Estimated round trip in milliseconds.
    pub latency: u32,
    /// Gateway load as a fraction in `[0, 1]`.
    pub load: f64,
    pub country: &'static str,
    /// Cloud region code used to look up AWS presets.
    pub aws_region: &'static str,
}

impl Region {
    /// Rough distance bucket derived from the latency estimate.
    pub fn distance_sense(&self) -> &'static str {
        if self.latency < 80 {
            "Nearby"
        } else if self.latency < 150 {
            "Medium"
        } else {
            "Far"
        }
    }

    /// Load rendered as a whole percent.
    pub fn load_percent(&self) -> String {
        format!("{:.0}%", self.load * 100.0)
    }
}

/// Gateway topology being simulated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DeploymentTarget {
    /// Self-managed gateways on metal or cloud instances.
    #[serde(rename = "custom")]
    Custom,
    /// AWS-managed client endpoint for workforce access.
    #[default]
    #[serde(rename = "aws-client-vpn")]
    AwsClientVpn,
    /// AWS site-to-site IPsec tunnels.
    #[serde(rename = "aws-site-to-site")]
    AwsSiteToSite,
    /// Service-to-service sidecar tunnels.
    #[serde(rename = "aws-sidecar")]
    AwsSidecar,
}

impl DeploymentTarget {
    /// Every target in display order.
    pub const ALL: [DeploymentTarget; 4] = [
        DeploymentTarget::Custom,
        DeploymentTarget::AwsClientVpn,
        DeploymentTarget::AwsSiteToSite,
        DeploymentTarget::AwsSidecar,
    ];

    /// Wire identifier used in the settings record.
    pub fn id(self) -> &'static str {
        match self {
            DeploymentTarget::Custom => "custom",
            DeploymentTarget::AwsClientVpn => "aws-client-vpn",
            DeploymentTarget::AwsSiteToSite => "aws-site-to-site",
            DeploymentTarget::AwsSidecar => "aws-sidecar",
        }
    }

    /// Parses a wire identifier. Anything unknown yields `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// True for the AWS-managed targets that carry VPC/subnet/SG/CIDR fields.
    pub fn is_managed(self) -> bool {
        !matches!(self, DeploymentTarget::Custom)
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn info(self) -> &'static TargetInfo {
        match self {
            DeploymentTarget::Custom => &TARGETS[0],
            DeploymentTarget::AwsClientVpn => &TARGETS[1],
            DeploymentTarget::AwsSiteToSite => &TARGETS[2],
            DeploymentTarget::AwsSidecar => &TARGETS[3],
        }
    }

    /// Next target in display order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous target in display order, wrapping around.
    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Fixed map colour for managed targets; `None` means "use the accent".
    pub fn map_color(self) -> Option<&'static str> {
        match self {
            DeploymentTarget::Custom => None,
            DeploymentTarget::AwsClientVpn => Some("#7cf6d2"),
            DeploymentTarget::AwsSiteToSite => Some("#89a8ff"),
            DeploymentTarget::AwsSidecar => Some("#f6d27c"),
        }
    }

    /// Where the simulated metrics pretend to come from.
    pub fn telemetry_source(self) -> &'static str {
        if self.is_managed() {
            "Simulated AWS CloudWatch"
        } else {
            "Simulated local agent"
        }
    }
}

impl std::fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Display text for a deployment target.
#[derive(Debug)]
pub struct TargetInfo {
    pub name: &'static str,
    pub summary: &'static str,
    pub notes: &'static str,
}

/// One glossary entry shown in the help overlay.
pub struct GlossaryEntry {
    pub term: &'static str,
    pub definition: &'static str,
}

/// One step of the guided setup.
pub struct WizardStep {
    pub title: &'static str,
    pub detail: &'static str,
}

pub static PROTOCOLS: [Protocol; 5] = [
    Protocol {
        id: "wireguard",
        name: "WireGuard",
        summary: "Modern, lean tunneling with rapid handshakes.",
        description: "Built on ChaCha20 and Curve25519. Low overhead and quick roaming make it ideal for laptops and mobile devices.",
        speed: "Ultra-fast",
        security: "ChaCha20-Poly1305, Curve25519, PFS",
        compatibility: "Windows, macOS, Linux, iOS, Android, routers",
        ports: "UDP 51820",
        best_for: "Remote work, streaming, mobile roaming",
    },
    Protocol {
        id: "openvpn",
        name: "OpenVPN",
        summary: "Battle-tested standard with deep configurability.",
        description: "Runs over TCP or UDP and can masquerade as HTTPS on port 443. Great when you need compatibility and resilience.",
        speed: "Balanced",
        security: "AES-256-GCM, RSA/ECDSA, TLS-based control channel",
        compatibility: "Every major OS and network appliance",
        ports: "TCP/UDP 1194 or 443",
        best_for: "Restrictive networks, cross-platform fleets",
    },
    Protocol {
        id: "ikev2",
        name: "IKEv2/IPsec",
        summary: "Stable on the move with automatic re-keying.",
        description: "Pairs the IKEv2 key exchange with IPsec encryption. Strong choice for mobile devices that change networks.",
        speed: "Fast",
        security: "AES-GCM suites, MOBIKE mobility, certificate-based",
        compatibility: "Windows, macOS, iOS, some Android builds",
        ports: "UDP 500 / 4500",
        best_for: "Phones, tablets, quick failover",
    },
    Protocol {
        id: "aws-client-vpn",
        name: "AWS Client VPN (OpenVPN)",
        summary: "Managed AWS endpoint for user/device access.",
        description: "AWS-managed OpenVPN service. Integrates with VPC subnets, security groups, and directory/SSO options.",
        speed: "Balanced",
        security: "AES-256-GCM, cert or SSO auth via IAM/AD",
        compatibility: "OpenVPN clients; works with AWS CLI/SSO flows",
        ports: "UDP/TCP 443",
        best_for: "Hybrid remote access with AWS identity",
    },
    Protocol {
        id: "aws-site-to-site",
        name: "AWS Site-to-Site (IPsec)",
        summary: "Attach on-prem to AWS VPC/TGW with IPsec.",
        description: "Traditional IPsec tunnel for connecting data centers to AWS VPCs or Transit Gateways. High-availability via multi-AZ endpoints.",
        speed: "Balanced",
        security: "IPsec (AES-GCM), BGP/route-based",
        compatibility: "Routers/firewalls supporting IPsec+BGP",
        ports: "UDP 500 / 4500",
        best_for: "Branch/VPC interconnects and sidecars",
    },
];

pub static REGIONS: [Region; 5] = [
    Region {
        id: "nyc",
        name: "New York",
        latency: 32,
        load: 0.35,
        country: "United States",
        aws_region: "us-east-1",
    },
    Region {
        id: "ams",
        name: "Amsterdam",
        latency: 58,
        load: 0.42,
        country: "Netherlands",
        aws_region: "eu-west-1",
    },
    Region {
        id: "sin",
        name: "Singapore",
        latency: 183,
        load: 0.51,
        country: "Singapore",
        aws_region: "ap-southeast-1",
    },
    Region {
        id: "syd",
        name: "Sydney",
        latency: 212,
        load: 0.38,
        country: "Australia",
        aws_region: "ap-southeast-2",
    },
    Region {
        id: "sao",
        name: "São Paulo",
        latency: 145,
        load: 0.46,
        country: "Brazil",
        aws_region: "sa-east-1",
    },
];

static TARGETS: [TargetInfo; 4] = [
    TargetInfo {
        name: "Custom / on-prem",
        summary: "Self-hosted VPN gateways on metal or cloud instances.",
        notes: "Use when managing your own WireGuard/OpenVPN fleet.",
    },
    TargetInfo {
        name: "AWS Client VPN",
        summary: "AWS-managed OpenVPN endpoint for workforce access.",
        notes: "Attach to subnets and security groups; supports SSO/AD and split tunneling.",
    },
    TargetInfo {
        name: "AWS Site-to-Site",
        summary: "IPsec tunnels for VPC/TGW connectivity.",
        notes: "Great for Navina sidecars or hybrid branch links.",
    },
    TargetInfo {
        name: "AWS Sidecar",
        summary: "Service-to-service tunnels riding alongside apps.",
        notes: "Place sidecar with ECS/EKS tasks; route via VPC endpoints.",
    },
];

pub static GLOSSARY: [GlossaryEntry; 5] = [
    GlossaryEntry {
        term: "Tunnel",
        definition: "An encrypted path your traffic travels through to the VPN gateway.",
    },
    GlossaryEntry {
        term: "Handshake",
        definition: "How two peers authenticate and agree on keys before data flows.",
    },
    GlossaryEntry {
        term: "MTU",
        definition: "Maximum packet size. Lowering it can fix stalls on some networks.",
    },
    GlossaryEntry {
        term: "Kill switch",
        definition: "Blocks traffic if the VPN drops, preventing leaks.",
    },
    GlossaryEntry {
        term: "DNS leak",
        definition: "When DNS requests bypass the tunnel. Prevent with VPN DNS servers.",
    },
];

pub static WIZARD_STEPS: [WizardStep; 4] = [
    WizardStep {
        title: "Identity",
        detail: "Name the tunnel and set how you sign in.",
    },
    WizardStep {
        title: "Region",
        detail: "Choose a gateway close to your users.",
    },
    WizardStep {
        title: "Protocol",
        detail: "Pick the balance of speed and security.",
    },
    WizardStep {
        title: "Review & launch",
        detail: "Visualize the route, then connect.",
    },
];

/// Index of the final "Review & launch" step.
pub const LAST_STEP: usize = WIZARD_STEPS.len() - 1;

/// Looks up a protocol, falling back to the first catalog entry.
pub fn protocol(id: &str) -> &'static Protocol {
    PROTOCOLS.iter().find(|p| p.id == id).unwrap_or(&PROTOCOLS[0])
}

/// Looks up a region, falling back to the first catalog entry.
pub fn region(id: &str) -> &'static Region {
    REGIONS.iter().find(|r| r.id == id).unwrap_or(&REGIONS[0])
}

/// Position of a region in [`REGIONS`], if the id is known.
pub fn region_index(id: &str) -> Option<usize> {
    REGIONS.iter().position(|r| r.id == id)
}

/// Position of a protocol in [`PROTOCOLS`], if the id is known.
pub fn protocol_index(id: &str) -> Option<usize> {
    PROTOCOLS.iter().position(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_protocol_falls_back_to_first() {
        assert_eq!(protocol("pptp").id, "wireguard");
        assert_eq!(protocol("ikev2").name, "IKEv2/IPsec");
    }

    #[test]
    fn test_unknown_region_falls_back_to_first() {
        assert_eq!(region("mars").id, "nyc");
        assert_eq!(region("sin").aws_region, "ap-southeast-1");
    }

    #[test]
    fn test_distance_sense_buckets() {
        assert_eq!(region("ams").distance_sense(), "Nearby");
        assert_eq!(region("sao").distance_sense(), "Medium");
        assert_eq!(region("syd").distance_sense(), "Far");
    }

    #[test]
    fn test_load_percent() {
        assert_eq!(region("sin").load_percent(), "51%");
    }

    #[test]
    fn test_target_id_round_trip() {
        for target in DeploymentTarget::ALL {
            assert_eq!(DeploymentTarget::from_id(target.id()), Some(target));
        }
        assert_eq!(DeploymentTarget::from_id("bogus"), None);
    }

    #[test]
    fn test_target_serde_uses_wire_ids() {
        let json = serde_json::to_string(&DeploymentTarget::AwsSiteToSite).unwrap();
        assert_eq!(json, "\"aws-site-to-site\"");
        for target in DeploymentTarget::ALL {
            let json = serde_json::to_string(&target).unwrap();
            assert_eq!(json, format!("\"{}\"", target.id()));
        }
    }

    #[test]
    fn test_target_cycle_wraps() {
        assert_eq!(DeploymentTarget::AwsSidecar.next(), DeploymentTarget::Custom);
        assert_eq!(DeploymentTarget::Custom.previous(), DeploymentTarget::AwsSidecar);
    }

    #[test]
    fn test_telemetry_source_label() {
        assert_eq!(
            DeploymentTarget::Custom.telemetry_source(),
            "Simulated local agent"
        );
        assert_eq!(
            DeploymentTarget::AwsSidecar.telemetry_source(),
            "Simulated AWS CloudWatch"
        );
    }
}
