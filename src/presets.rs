//! AWS resource presets and default resolution.
//!
//! Each managed deployment target owns a small table of preset rows keyed by
//! cloud region code. [`resolve_defaults`] picks the row for a target+region
//! pair without touching any state; the session decides whether to adopt it.

use crate::catalog::DeploymentTarget;

/// Preset for an AWS Client VPN endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientVpnEndpoint {
    pub id: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub vpc_id: &'static str,
    pub subnet_id: &'static str,
    pub security_group_id: &'static str,
    pub cidr: &'static str,
    pub split_tunnel: bool,
}

/// Preset for an AWS Site-to-Site IPsec tunnel.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteToSiteTunnel {
    pub id: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub vpc_id: &'static str,
    pub tunnel_cidr: &'static str,
    pub customer_gateway: &'static str,
    pub transit_gateway: Option<&'static str>,
    pub bgp_asn: Option<u32>,
}

/// Preset for a service sidecar.
#[derive(Clone, Debug, PartialEq)]
pub struct Sidecar {
    pub id: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub vpc_id: &'static str,
    pub security_group_id: &'static str,
    pub service: &'static str,
}

/// A resolved preset row, shaped by the target it belongs to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PresetBundle {
    ClientVpn(&'static ClientVpnEndpoint),
    SiteToSite(&'static SiteToSiteTunnel),
    Sidecar(&'static Sidecar),
}

impl PresetBundle {
    pub fn region(self) -> &'static str {
        match self {
            PresetBundle::ClientVpn(p) => p.region,
            PresetBundle::SiteToSite(p) => p.region,
            PresetBundle::Sidecar(p) => p.region,
        }
    }

    pub fn vpc_id(self) -> Option<&'static str> {
        let vpc = match self {
            PresetBundle::ClientVpn(p) => p.vpc_id,
            PresetBundle::SiteToSite(p) => p.vpc_id,
            PresetBundle::Sidecar(p) => p.vpc_id,
        };
        non_empty(vpc)
    }

    pub fn subnet_id(self) -> Option<&'static str> {
        match self {
            PresetBundle::ClientVpn(p) => non_empty(p.subnet_id),
            PresetBundle::SiteToSite(_) | PresetBundle::Sidecar(_) => None,
        }
    }

    pub fn security_group_id(self) -> Option<&'static str> {
        match self {
            PresetBundle::ClientVpn(p) => non_empty(p.security_group_id),
            PresetBundle::Sidecar(p) => non_empty(p.security_group_id),
            PresetBundle::SiteToSite(_) => None,
        }
    }

    /// Label/value pairs describing the preset row, for the identity step.
    pub fn details(self) -> Vec<(&'static str, String)> {
        match self {
            PresetBundle::ClientVpn(p) => vec![
                ("Endpoint", format!("{} ({})", p.name, p.id)),
                ("Region", p.region.to_string()),
                (
                    "Split tunnel",
                    if p.split_tunnel { "on" } else { "off" }.to_string(),
                ),
            ],
            PresetBundle::SiteToSite(p) => {
                let mut rows = vec![
                    ("Tunnel", format!("{} ({})", p.name, p.id)),
                    ("Region", p.region.to_string()),
                    ("Customer GW", p.customer_gateway.to_string()),
                ];
                if let Some(tgw) = p.transit_gateway {
                    rows.push(("Transit GW", tgw.to_string()));
                }
                if let Some(asn) = p.bgp_asn {
                    rows.push(("BGP ASN", asn.to_string()));
                }
                rows
            }
            PresetBundle::Sidecar(p) => vec![
                ("Sidecar", format!("{} ({})", p.name, p.id)),
                ("Region", p.region.to_string()),
                ("Service", p.service.to_string()),
            ],
        }
    }

    /// Route CIDR; a site-to-site tunnel reports its inside tunnel CIDR here.
    pub fn cidr(self) -> Option<&'static str> {
        match self {
            PresetBundle::ClientVpn(p) => non_empty(p.cidr),
            PresetBundle::SiteToSite(p) => non_empty(p.tunnel_cidr),
            PresetBundle::Sidecar(_) => None,
        }
    }
}

fn non_empty(value: &'static str) -> Option<&'static str> {
    (!value.is_empty()).then_some(value)
}

pub static CLIENT_VPN_ENDPOINTS: [ClientVpnEndpoint; 2] = [
    ClientVpnEndpoint {
        id: "cvpn-endpoint-0a12bc3d45",
        name: "Navina Workforce EU",
        region: "eu-west-1",
        vpc_id: "vpc-0e12aa10",
        subnet_id: "subnet-08ff2c01",
        security_group_id: "sg-0cafe12a",
        cidr: "10.42.0.0/16",
        split_tunnel: true,
    },
    ClientVpnEndpoint {
        id: "cvpn-endpoint-0de98f7a1",
        name: "Navina Workforce US",
        region: "us-east-1",
        vpc_id: "vpc-0ba9cd31",
        subnet_id: "subnet-0c91d2b3",
        security_group_id: "sg-0123ab45",
        cidr: "10.20.0.0/16",
        split_tunnel: true,
    },
];

pub static SITE_TO_SITE_TUNNELS: [SiteToSiteTunnel; 2] = [
    SiteToSiteTunnel {
        id: "vpn-0aa1bb22",
        name: "Sidecar IPsec to TGW",
        region: "eu-west-1",
        vpc_id: "vpc-0e12aa10",
        tunnel_cidr: "169.254.12.0/30",
        customer_gateway: "cgw-012aa0bb",
        transit_gateway: Some("tgw-0dd11ff2"),
        bgp_asn: Some(65010),
    },
    SiteToSiteTunnel {
        id: "vpn-0cc44dd5",
        name: "On-prem to VPC",
        region: "us-east-1",
        vpc_id: "vpc-0ba9cd31",
        tunnel_cidr: "169.254.28.0/30",
        customer_gateway: "cgw-0acbd12e",
        transit_gateway: Some("tgw-0bd09c12"),
        bgp_asn: Some(65020),
    },
];

pub static SIDECARS: [Sidecar; 2] = [
    Sidecar {
        id: "sidecar-eu-app",
        name: "ECS App Sidecar",
        region: "eu-west-1",
        vpc_id: "vpc-0e12aa10",
        security_group_id: "sg-0cafe12a",
        service: "ECS Service navina-app",
    },
    Sidecar {
        id: "sidecar-us-batch",
        name: "Batch Sidecar",
        region: "us-east-1",
        vpc_id: "vpc-0ba9cd31",
        security_group_id: "sg-0123ab45",
        service: "EKS batch namespace",
    },
];

/// Returns the row whose region matches, else the first row, else `None`.
fn pick<'a, T>(table: &'a [T], region_code: &str, region_of: impl Fn(&T) -> &str) -> Option<&'a T> {
    table
        .iter()
        .find(|row| region_of(row) == region_code)
        .or_else(|| table.first())
}

/// Resolves the preset bundle a target+region pair should default to.
///
/// `Custom` never has AWS defaults. Managed targets return the first row in
/// their table matching `region_code`, falling back to the table's first row.
pub fn resolve_defaults(target: DeploymentTarget, region_code: &str) -> Option<PresetBundle> {
    match target {
        DeploymentTarget::Custom => None,
        DeploymentTarget::AwsClientVpn => {
            pick(&CLIENT_VPN_ENDPOINTS, region_code, |e| e.region).map(PresetBundle::ClientVpn)
        }
        DeploymentTarget::AwsSiteToSite => {
            pick(&SITE_TO_SITE_TUNNELS, region_code, |t| t.region).map(PresetBundle::SiteToSite)
        }
        DeploymentTarget::AwsSidecar => {
            pick(&SIDECARS, region_code, |s| s.region).map(PresetBundle::Sidecar)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_has_no_defaults() {
        assert_eq!(resolve_defaults(DeploymentTarget::Custom, "eu-west-1"), None);
        assert_eq!(resolve_defaults(DeploymentTarget::Custom, "nowhere"), None);
    }

    #[test]
    fn test_exact_region_match() {
        let bundle = resolve_defaults(DeploymentTarget::AwsClientVpn, "us-east-1").unwrap();
        assert_eq!(bundle, PresetBundle::ClientVpn(&CLIENT_VPN_ENDPOINTS[1]));
        assert_eq!(bundle.vpc_id(), Some("vpc-0ba9cd31"));
        assert_eq!(bundle.subnet_id(), Some("subnet-0c91d2b3"));
        assert_eq!(bundle.cidr(), Some("10.20.0.0/16"));
    }

    #[test]
    fn test_unknown_region_falls_back_to_first_row() {
        for target in DeploymentTarget::ALL.into_iter().filter(|t| t.is_managed()) {
            let bundle = resolve_defaults(target, "ap-southeast-1").unwrap();
            assert_eq!(bundle.region(), "eu-west-1", "{target}");
        }
    }

    #[test]
    fn test_resolution_is_pure() {
        for target in DeploymentTarget::ALL {
            for code in ["eu-west-1", "us-east-1", "sa-east-1", ""] {
                assert_eq!(resolve_defaults(target, code), resolve_defaults(target, code));
            }
        }
    }

    #[test]
    fn test_bundle_shapes_omit_missing_fields() {
        let s2s = resolve_defaults(DeploymentTarget::AwsSiteToSite, "eu-west-1").unwrap();
        assert_eq!(s2s.cidr(), Some("169.254.12.0/30"));
        assert_eq!(s2s.subnet_id(), None);
        assert_eq!(s2s.security_group_id(), None);

        let sidecar = resolve_defaults(DeploymentTarget::AwsSidecar, "us-east-1").unwrap();
        assert_eq!(sidecar.security_group_id(), Some("sg-0123ab45"));
        assert_eq!(sidecar.cidr(), None);
        assert_eq!(sidecar.subnet_id(), None);
    }

    #[test]
    fn test_site_to_site_details_include_bgp() {
        let bundle = resolve_defaults(DeploymentTarget::AwsSiteToSite, "us-east-1").unwrap();
        let details = bundle.details();
        assert!(details.contains(&("Customer GW", "cgw-0acbd12e".to_string())));
        assert!(details.contains(&("Transit GW", "tgw-0bd09c12".to_string())));
        assert!(details.contains(&("BGP ASN", "65020".to_string())));
    }

    #[test]
    fn test_empty_table_yields_none() {
        let empty: [Sidecar; 0] = [];
        assert!(pick(&empty, "eu-west-1", |s| s.region).is_none());
    }
}
