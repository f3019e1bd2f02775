//! Generic-URI splitting of raw URL text.
//!
//! The splitter never normalizes: no default `/` path is inserted, nothing
//! is percent-encoded, scheme-less text is accepted with an empty scheme and
//! hostname. Only the scheme and hostname are lower-cased. Input whose
//! authority cannot be split (bad IPv6 brackets) yields
//! [`ParseOutcome::Degraded`] instead of an error.
use std::fmt;
use std::net::Ipv6Addr;

use once_cell::sync::Lazy;
use regex::Regex;

/// Schemes whose last path segment may carry `;params`.
const PARAM_SCHEMES: [&str; 16] = [
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtsps", "rtspu",
    "sip", "sips", "mms", "sftp", "tel",
];

static IP_FUTURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\Av[a-fA-F0-9]+\..+\z").expect("valid IPvFuture pattern"));

/// Components of a URL used by the feature extractor and the pre-filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: String,
    pub hostname: String,
    pub path: String,
}

/// Why a URL could not be split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeReason {
    /// Empty or whitespace-only input.
    Blank,
    /// `[` without `]` (or the reverse) in the authority.
    UnbalancedBrackets,
    /// Bracketed host that is neither an IPv6 literal nor IPvFuture.
    InvalidBracketedHost,
    /// Text before `[` or after `]` that is not a port.
    MalformedAuthority,
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            DegradeReason::Blank => "blank input",
            DegradeReason::UnbalancedBrackets => "unbalanced IPv6 brackets",
            DegradeReason::InvalidBracketedHost => "bracketed host is not an IPv6 literal",
            DegradeReason::MalformedAuthority => "malformed authority around IPv6 literal",
        };
        f.write_str(msg)
    }
}

/// Result of splitting raw URL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed(ParsedUrl),
    Degraded(DegradeReason),
}

/// Split `url` into scheme, hostname and path.
pub fn parse_url(url: &str) -> ParseOutcome {
    if url.trim().is_empty() {
        return ParseOutcome::Degraded(DegradeReason::Blank);
    }

    // Leading C0 controls/spaces are dropped, tabs and newlines removed anywhere.
    let cleaned: String = url
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let (scheme, rest) = split_scheme(&cleaned);

    let (netloc, rest) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after
                .find(|c: char| matches!(c, '/' | '?' | '#'))
                .unwrap_or(after.len());
            (&after[..end], &after[end..])
        }
        None => ("", rest),
    };

    if let Err(reason) = check_netloc(netloc) {
        return ParseOutcome::Degraded(reason);
    }

    let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
    let rest = rest.split_once('?').map_or(rest, |(before, _)| before);
    let path = if PARAM_SCHEMES.contains(&scheme.as_str()) {
        strip_params(rest)
    } else {
        rest
    };

    ParseOutcome::Parsed(ParsedUrl {
        hostname: hostname_of(netloc),
        path: path.to_string(),
        scheme,
    })
}

fn split_scheme(url: &str) -> (String, &str) {
    if let Some(idx) = url.find(':') {
        let candidate = &url[..idx];
        let valid = candidate
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && candidate
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if valid {
            return (candidate.to_ascii_lowercase(), &url[idx + 1..]);
        }
    }
    (String::new(), url)
}

fn check_netloc(netloc: &str) -> Result<(), DegradeReason> {
    let open = netloc.contains('[');
    let close = netloc.contains(']');
    if open != close {
        return Err(DegradeReason::UnbalancedBrackets);
    }
    if !open {
        return Ok(());
    }

    let hostinfo = netloc.rsplit_once('@').map_or(netloc, |(_, host)| host);
    let Some((before, bracketed)) = hostinfo.split_once('[') else {
        // The only '[' sits in the userinfo.
        return Ok(());
    };
    if !before.is_empty() {
        return Err(DegradeReason::MalformedAuthority);
    }
    let (host, after) = bracketed.split_once(']').unwrap_or((bracketed, ""));
    if !after.is_empty() && !after.starts_with(':') {
        return Err(DegradeReason::MalformedAuthority);
    }

    if host.starts_with('v') {
        if IP_FUTURE.is_match(host) {
            return Ok(());
        }
        return Err(DegradeReason::InvalidBracketedHost);
    }
    let address = host.split_once('%').map_or(host, |(addr, _)| addr);
    address
        .parse::<Ipv6Addr>()
        .map(|_| ())
        .map_err(|_| DegradeReason::InvalidBracketedHost)
}

fn hostname_of(netloc: &str) -> String {
    let hostinfo = netloc.rsplit_once('@').map_or(netloc, |(_, host)| host);
    let host = match hostinfo.split_once('[') {
        Some((_, bracketed)) => bracketed.split_once(']').map_or(bracketed, |(h, _)| h),
        None => hostinfo.split_once(':').map_or(hostinfo, |(h, _)| h),
    };
    // Only the address part is folded; an IPv6 zone id keeps its case.
    match host.split_once('%') {
        Some((addr, zone)) => format!("{}%{}", addr.to_lowercase(), zone),
        None => host.to_lowercase(),
    }
}

fn strip_params(path: &str) -> &str {
    let search_from = path.rfind('/').unwrap_or(0);
    match path[search_from..].find(';') {
        Some(offset) => &path[..search_from + offset],
        None => path,
    }
}
