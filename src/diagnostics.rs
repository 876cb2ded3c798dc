//! Canned diagnostic reports.
//!
//! Both reports are pure functions of their inputs. Target-specific lines come
//! first, followed by four universal lines.

use crate::catalog::{DeploymentTarget, Region};
use crate::session::AwsFields;

const CONNECT_BASE: [&str; 4] = [
    "✅ Key exchange succeeded (Curve25519) in 63ms.",
    "✅ Gateway responds over UDP 51820.",
    "✅ VPN DNS reachable, no leaks detected.",
    "ℹ️ Suggested MTU 1420 for this path.",
];

const TROUBLESHOOT_BASE: [&str; 4] = [
    "✅ Auth endpoint reachable.",
    "✅ Certificate chain valid.",
    "⚠️ High latency upstream (212ms). Consider closer region.",
    "⚠️ UDP 1194 blocked by firewall. Try TCP/443 fallback.",
];

/// Report shown after "connect", interpolating the live AWS fields and region.
pub fn connect(target: DeploymentTarget, aws: &AwsFields, region: &Region) -> Vec<String> {
    let mut lines = match target {
        DeploymentTarget::AwsClientVpn => vec![
            format!(
                "✅ VPC {} attached; SG {} allows 443.",
                aws.vpc_id, aws.security_group
            ),
            format!(
                "ℹ️ Subnet {} advertises {} with split tunnel enabled.",
                aws.subnet, aws.cidr
            ),
        ],
        DeploymentTarget::AwsSiteToSite => vec![
            format!("✅ IPsec phase 1/2 established; CIDR {} routed.", aws.cidr),
            format!(
                "ℹ️ BGP neighbor up on {}; check TGW propagation.",
                region.name
            ),
        ],
        DeploymentTarget::AwsSidecar => vec![
            "✅ Sidecar ready for ECS/EKS task attachment.".to_string(),
            "ℹ️ Ensure ENI has SGs permitting app→sidecar traffic.".to_string(),
        ],
        DeploymentTarget::Custom => Vec::new(),
    };
    lines.extend(CONNECT_BASE.iter().map(ToString::to_string));
    lines
}

/// Report shown by "run checks". Canned text, independent of live metrics.
pub fn troubleshoot(target: DeploymentTarget) -> Vec<String> {
    let specific: &[&str] = match target {
        DeploymentTarget::AwsClientVpn => &[
            "⚠️ Verify SG allows 443 from clients to endpoint.",
            "ℹ️ Ensure split tunnel matches advertised routes.",
            "ℹ️ Directory/SSO mapping required for user auth.",
        ],
        DeploymentTarget::AwsSiteToSite => &[
            "⚠️ Confirm IPsec policy matches customer gateway (phase 1/2).",
            "ℹ️ Check BGP routes propagated to TGW/VPC route tables.",
        ],
        DeploymentTarget::AwsSidecar => &[
            "⚠️ Confirm sidecar ENI has correct SGs for app egress.",
            "ℹ️ Ensure task IAM role allows CreateNetworkInterface if needed.",
        ],
        DeploymentTarget::Custom => &[],
    };
    specific
        .iter()
        .chain(TROUBLESHOOT_BASE.iter())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn aws() -> AwsFields {
        AwsFields {
            vpc_id: "vpc-1".to_string(),
            subnet: "subnet-2".to_string(),
            security_group: "sg-3".to_string(),
            cidr: "10.9.0.0/16".to_string(),
        }
    }

    #[test]
    fn test_connect_custom_has_only_universal_lines() {
        let lines = connect(DeploymentTarget::Custom, &aws(), catalog::region("nyc"));
        assert_eq!(lines, CONNECT_BASE.map(String::from).to_vec());
    }

    #[test]
    fn test_connect_client_vpn_interpolates_fields() {
        let lines = connect(DeploymentTarget::AwsClientVpn, &aws(), catalog::region("nyc"));
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "✅ VPC vpc-1 attached; SG sg-3 allows 443.");
        assert_eq!(
            lines[1],
            "ℹ️ Subnet subnet-2 advertises 10.9.0.0/16 with split tunnel enabled."
        );
        assert_eq!(lines[2], CONNECT_BASE[0]);
    }

    #[test]
    fn test_connect_site_to_site_names_region() {
        let lines = connect(DeploymentTarget::AwsSiteToSite, &aws(), catalog::region("sin"));
        assert_eq!(lines[0], "✅ IPsec phase 1/2 established; CIDR 10.9.0.0/16 routed.");
        assert_eq!(
            lines[1],
            "ℹ️ BGP neighbor up on Singapore; check TGW propagation."
        );
        assert_eq!(&lines[2..], &CONNECT_BASE.map(String::from));
    }

    #[test]
    fn test_troubleshoot_ordering() {
        let lines = troubleshoot(DeploymentTarget::AwsSidecar);
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("sidecar ENI"));
        assert_eq!(lines[5], TROUBLESHOOT_BASE[3]);

        let custom = troubleshoot(DeploymentTarget::Custom);
        assert_eq!(custom, TROUBLESHOOT_BASE.map(String::from).to_vec());
    }

    #[test]
    fn test_reports_are_deterministic() {
        let region = catalog::region("ams");
        for target in DeploymentTarget::ALL {
            assert_eq!(connect(target, &aws(), region), connect(target, &aws(), region));
            assert_eq!(troubleshoot(target), troubleshoot(target));
        }
    }
}
