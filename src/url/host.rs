use crate::UrlError;
use std::net::{Ipv4Addr, Ipv6Addr};
use url::Host;

/// Rejects hosts on loopback, private, or link-local networks
///
/// The rendering provider fetches on our behalf, so targets inside local
/// networks are refused before any request is made.
///
/// # Examples
///
/// ```
/// use seo_lens::url::check_host;
/// use url::Host;
///
/// assert!(check_host(&Host::Domain("example.com")).is_ok());
/// assert!(check_host(&Host::Domain("localhost")).is_err());
/// ```
pub fn check_host(host: &Host<&str>) -> Result<(), UrlError> {
    let disallowed = match host {
        Host::Domain(domain) => is_local_domain(domain),
        Host::Ipv4(ip) => is_private_ipv4(*ip),
        Host::Ipv6(ip) => is_private_ipv6(*ip),
    };

    if disallowed {
        Err(UrlError::DisallowedHost(host.to_string()))
    } else {
        Ok(())
    }
}

fn is_local_domain(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.').to_lowercase();
    domain == "localhost" || domain.ends_with(".localhost") || domain.ends_with(".local")
}

fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
}

fn is_private_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(mapped) = ip.to_ipv4_mapped() {
        return is_private_ipv4(mapped);
    }

    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
        // fe80::/10 link local
        || (first & 0xffc0) == 0xfe80
}
