//! Config preview builder.
//!
//! Maps the current selection to one of four textual templates. Total and
//! pure: connection state and metrics are never read.

use crate::catalog::DeploymentTarget;
use crate::session::SelectionState;

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// Builds the export-ready snippet for `selection`.
pub fn build(selection: &SelectionState) -> String {
    let region = selection.region();
    let protocol = selection.protocol();
    let aws = &selection.aws;
    let region_code = region.aws_region;

    match selection.deployment_target {
        DeploymentTarget::AwsClientVpn => format!(
            "client\n\
             dev tun\n\
             proto udp\n\
             remote {region_code}.clientvpn.amazonaws.com 443\n\
             auth-user-pass\n\
             remote-cert-tls server\n\
             explicit-exit-notify\n\
             ; Attachments\n\
             ; VPC {vpc}, Subnet {subnet}, SG {sg}\n\
             ; Routes {cidr} (split-tunnel {split})",
            vpc = aws.vpc_id,
            subnet = aws.subnet,
            sg = aws.security_group,
            cidr = aws.cidr,
            split = if aws.cidr.is_empty() { "pending" } else { "enabled" },
        ),
        DeploymentTarget::AwsSiteToSite => format!(
            "# AWS Site-to-Site (IPsec) runbook\n\
             Phase1: AES256-GCM / SHA256 / DH14\n\
             Phase2: AES256-GCM / PFS14 / 3600s\n\
             Tunnel CIDR: {tunnel}\n\
             Customer Gateway: {cgw}\n\
             Region: {region_code}\n\
             Route: advertise {route} via BGP",
            tunnel = or_placeholder(&aws.cidr, "169.254.x.x/30"),
            cgw = or_placeholder(&aws.security_group, "cgw-xxxx"),
            route = or_placeholder(&aws.cidr, "10.0.0.0/16"),
        ),
        DeploymentTarget::AwsSidecar => format!(
            "# AWS Sidecar notes\n\
             Service region: {region_code}\n\
             Sidecar SG: {sg}\n\
             VPC: {vpc}, Subnet: {subnet}\n\
             Ensure task/service role allows ENI mgmt and SG rules permit app -> sidecar egress.",
            sg = aws.security_group,
            vpc = aws.vpc_id,
            subnet = aws.subnet,
        ),
        DeploymentTarget::Custom => format!(
            "[Interface]\n\
             PrivateKey = <your-private-key>\n\
             Address = 10.7.0.2/32\n\
             DNS = 10.7.0.1\n\
             \n\
             [Peer]\n\
             PublicKey = <peer-public-key>\n\
             AllowedIPs = {allowed}\n\
             Endpoint = {host}.vpn.local:51820\n\
             # Protocol {protocol}",
            allowed = or_placeholder(&aws.cidr, "0.0.0.0/0"),
            host = region.name.to_lowercase(),
            protocol = protocol.name,
        ),
    }
}
