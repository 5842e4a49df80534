//! Ad Blocker for Stark Browser.
//!
//! Blocks outgoing requests whose URL contains a known ad-serving domain.
//! Top-level navigations are checked from the web view's navigation handler;
//! subresources are checked in the page by the shim returned from
//! [`AdBlocker::shim_script`], which reports each block back over IPC.

use tracing::{debug, info};

/// Ad-serving domains blocked out of the box.
const AD_DOMAINS: &[&str] = &[
    "doubleclick.net",
    "adservice.google.com",
    "googlesyndication.com",
    "ads.pubmatic.com",
    "amazon-adsystem.com",
    "adroll.com",
    "taboola.com",
];

const SHIM_TEMPLATE: &str = include_str!("../../resources/ui/adblock_shim.js");
const SHIM_DOMAINS_PLACEHOLDER: &str = "__STARK_AD_DOMAINS__";

/// Outcome of intercepting a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    Allow,
    Block,
}

/// Substring-based request filter over a fixed domain list.
pub struct AdBlocker {
    domains: Vec<String>,
    enabled: bool,
    blocked_count: u64,
}

impl AdBlocker {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut blocker = Self {
            domains: Vec::new(),
            enabled: true,
            blocked_count: 0,
        };
        blocker.push_domains(domains);
        blocker
    }

    pub fn with_default_domains() -> Self {
        Self::new(Self::default_domains())
    }

    /// The built-in ad domain list.
    pub fn default_domains() -> &'static [&'static str] {
        AD_DOMAINS
    }

    /// Appends extra domains, skipping blanks and entries already present.
    pub fn with_extra_domains<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push_domains(extra);
        self
    }

    fn push_domains<I, S>(&mut self, domains: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for domain in domains {
            let domain = domain.as_ref().trim().to_lowercase();
            if domain.is_empty() || self.domains.contains(&domain) {
                continue;
            }
            self.domains.push(domain);
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn blocked_count(&self) -> u64 {
        self.blocked_count
    }

    /// True when blocking is on and any listed domain occurs in `url`.
    pub fn should_block(&self, url: &str) -> bool {
        if !self.enabled {
            return false;
        }
        let url_lower = url.to_lowercase();
        self.domains.iter().any(|domain| url_lower.contains(domain.as_str()))
    }

    /// Decides a single outgoing request, logging and counting blocks.
    pub fn intercept(&mut self, url: &str) -> RequestDecision {
        if self.should_block(url) {
            self.note_blocked(url);
            RequestDecision::Block
        } else {
            RequestDecision::Allow
        }
    }

    /// Counts a block reported by the page shim.
    ///
    /// Reports for URLs this blocker would not block are ignored.
    pub fn record_blocked(&mut self, url: &str) -> bool {
        if !self.should_block(url) {
            debug!("Ignoring block report for {}", url);
            return false;
        }
        self.note_blocked(url);
        true
    }

    fn note_blocked(&mut self, url: &str) {
        self.blocked_count += 1;
        info!("Blocked: {}", url);
    }

    /// The in-page request interceptor, with the domain list embedded.
    ///
    /// Returns an empty string when blocking is disabled.
    pub fn shim_script(&self) -> String {
        if !self.enabled {
            return String::new();
        }
        let list = serde_json::to_string(&self.domains).unwrap_or_else(|_| "[]".to_string());
        SHIM_TEMPLATE.replace(SHIM_DOMAINS_PLACEHOLDER, &list)
    }
}

impl Default for AdBlocker {
    fn default() -> Self {
        Self::with_default_domains()
    }
}
