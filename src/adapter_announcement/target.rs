//! Restricts the hosts an announcement can be fetched from.
//!
//! The url is checked before sending, redirects go through the same check and
//! resolved names only keep public addresses.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use crate::domain::error::AnnouncementError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const MAX_REDIRECTS: usize = 5;

#[derive(Clone, Debug, Default)]
pub(super) struct TargetPolicy {
    /// lowercase host names or addresses, when empty every public host is reachable
    allowed_hosts: Arc<[String]>,
}

impl TargetPolicy {
    pub fn new<I, S>(allowed_hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_hosts: allowed_hosts
                .into_iter()
                .map(|host| {
                    host.as_ref()
                        .trim()
                        .trim_start_matches('[')
                        .trim_end_matches(']')
                        .to_lowercase()
                })
                .filter(|host| !host.is_empty())
                .collect(),
        }
    }

    fn is_allowed(&self, host: &str) -> bool {
        self.allowed_hosts.iter().any(|allowed| allowed == host)
    }

    /// Parses and checks an announcement url without resolving its host.
    pub fn check(&self, raw: &str) -> Result<url::Url, AnnouncementError> {
        let url =
            url::Url::parse(raw).map_err(|err| AnnouncementError::InvalidUrl(err.to_string()))?;
        self.check_url(&url)?;
        Ok(url)
    }

    pub fn check_url(&self, url: &url::Url) -> Result<(), AnnouncementError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AnnouncementError::InvalidUrl(format!(
                "unsupported scheme {:?}",
                url.scheme()
            )));
        }
        let (host, ip) = match url.host() {
            Some(url::Host::Domain(domain)) => (domain.to_lowercase(), None),
            Some(url::Host::Ipv4(ip)) => (ip.to_string(), Some(IpAddr::V4(ip))),
            Some(url::Host::Ipv6(ip)) => (ip.to_string(), Some(IpAddr::V6(ip))),
            None => return Err(AnnouncementError::InvalidUrl("missing host".into())),
        };
        if self.is_allowed(&host) {
            return Ok(());
        }
        let local_name = host == "localhost" || host.ends_with(".localhost");
        let forbidden = !self.allowed_hosts.is_empty()
            || local_name
            || ip.is_some_and(|ip| !is_public(ip));
        if forbidden {
            return Err(AnnouncementError::Forbidden(host));
        }
        Ok(())
    }

    /// Follows a bounded number of redirects, each target being checked like the first url.
    pub fn redirect(&self) -> reqwest::redirect::Policy {
        let policy = self.clone();
        reqwest::redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                return attempt.error("too many redirects");
            }
            match policy.check_url(attempt.url()) {
                Ok(()) => attempt.follow(),
                Err(err) => attempt.error(err),
            }
        })
    }
}

impl reqwest::dns::Resolve for TargetPolicy {
    fn resolve(&self, name: reqwest::dns::Name) -> reqwest::dns::Resolving {
        Box::pin(resolve_public(self.clone(), name.as_str().to_lowercase()))
    }
}

/// Resolves `host`, keeping only the public addresses unless the host is allowed.
async fn resolve_public(
    policy: TargetPolicy,
    host: String,
) -> Result<reqwest::dns::Addrs, BoxError> {
    let trusted = policy.is_allowed(&host);
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), 0))
        .await?
        .filter(|addr| trusted || is_public(addr.ip()))
        .collect();
    if addrs.is_empty() {
        return Err(Box::new(AnnouncementError::Forbidden(host)));
    }
    Ok(Box::new(addrs.into_iter()))
}

/// Whether the address is routable on the public internet.
pub(super) fn is_public(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ip) => is_public_v4(ip),
        IpAddr::V6(ip) => match ip.to_ipv4_mapped() {
            Some(ip) => is_public_v4(ip),
            None => is_public_v6(ip),
        },
    }
}

fn is_public_v4(ip: Ipv4Addr) -> bool {
    let [first, second, ..] = ip.octets();
    // 0/8, 100.64/10 (shared address space) and 240/4 (reserved)
    let reserved = first == 0 || (first == 100 && (64..128).contains(&second)) || first >= 240;
    !(reserved
        || ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_documentation()
        || ip.is_multicast())
}

fn is_public_v6(ip: Ipv6Addr) -> bool {
    let segments = ip.segments();
    let unique_local = segments[0] & 0xfe00 == 0xfc00;
    let link_local = segments[0] & 0xffc0 == 0xfe80;
    let documentation = segments[0] == 0x2001 && segments[1] == 0x0db8;
    !(ip.is_unspecified()
        || ip.is_loopback()
        || ip.is_multicast()
        || unique_local
        || link_local
        || documentation)
}
